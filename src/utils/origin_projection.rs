//! Projection of the origin on the boundary of low-dimensional simplices.
//!
//! Each projection also classifies the Voronoï region of the simplex the origin falls into,
//! together with the barycentric coordinates of the projected point inside of that region.

use crate::math::{Point, Real, DEFAULT_EPSILON};

/// Description of the feature of a simplex the origin projects onto.
///
/// Vertex indices refer to the order in which the simplex vertices were passed to the
/// projection function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OriginLocation {
    /// The projection is the `i`-th vertex.
    OnVertex(usize),
    /// The projection lies on the interior of the edge joining two vertices.
    OnEdge([usize; 2], [Real; 2]),
    /// The projection lies on the interior of the triangle joining three vertices.
    OnFace([usize; 3], [Real; 3]),
    /// The origin lies inside of the tetrahedron.
    OnSolid,
}

impl OriginLocation {
    fn remap(self, ids: [usize; 3]) -> Self {
        match self {
            OriginLocation::OnVertex(i) => OriginLocation::OnVertex(ids[i]),
            OriginLocation::OnEdge(e, bcoords) => {
                OriginLocation::OnEdge([ids[e[0]], ids[e[1]]], bcoords)
            }
            OriginLocation::OnFace(f, bcoords) => {
                OriginLocation::OnFace([ids[f[0]], ids[f[1]], ids[f[2]]], bcoords)
            }
            OriginLocation::OnSolid => OriginLocation::OnSolid,
        }
    }

    /// The number of simplex vertices supporting the projection.
    ///
    /// Returns `0` for [`OriginLocation::OnSolid`].
    pub fn num_vertices(&self) -> usize {
        match self {
            OriginLocation::OnVertex(_) => 1,
            OriginLocation::OnEdge(..) => 2,
            OriginLocation::OnFace(..) => 3,
            OriginLocation::OnSolid => 0,
        }
    }
}

/// Projects the origin on the segment `[a, b]`.
pub fn project_origin_on_segment(a: &Point<Real>, b: &Point<Real>) -> (Point<Real>, OriginLocation) {
    let ab = b - a;
    let ab_ao = -ab.dot(&a.coords);
    let sqnab = ab.norm_squared();

    if ab_ao <= 0.0 {
        (*a, OriginLocation::OnVertex(0))
    } else if ab_ao >= sqnab {
        (*b, OriginLocation::OnVertex(1))
    } else {
        let u = ab_ao / sqnab;
        (a + ab * u, OriginLocation::OnEdge([0, 1], [1.0 - u, u]))
    }
}

/// Projects the origin on the triangle `(a, b, c)`.
///
/// Flat triangles are handled by projecting on their closest edge.
pub fn project_origin_on_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> (Point<Real>, OriginLocation) {
    let ab = b - a;
    let ac = c - a;
    let ao = -a.coords;

    let d1 = ab.dot(&ao);
    let d2 = ac.dot(&ao);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (*a, OriginLocation::OnVertex(0));
    }

    let bo = -b.coords;
    let d3 = ab.dot(&bo);
    let d4 = ac.dot(&bo);
    if d3 >= 0.0 && d4 <= d3 {
        return (*b, OriginLocation::OnVertex(1));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return (a + ab * v, OriginLocation::OnEdge([0, 1], [1.0 - v, v]));
    }

    let co = -c.coords;
    let d5 = ab.dot(&co);
    let d6 = ac.dot(&co);
    if d6 >= 0.0 && d5 <= d6 {
        return (*c, OriginLocation::OnVertex(2));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return (a + ac * w, OriginLocation::OnEdge([0, 2], [1.0 - w, w]));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (b + (c - b) * w, OriginLocation::OnEdge([1, 2], [1.0 - w, w]));
    }

    let denom = va + vb + vc;

    if denom <= DEFAULT_EPSILON * (ab.norm_squared() * ac.norm_squared()) {
        // The triangle is flat: the closest feature is one of its edges.
        return closest_edge_projection(a, b, c);
    }

    let inv_denom = 1.0 / denom;
    let v = vb * inv_denom;
    let w = vc * inv_denom;
    let bcoords = [1.0 - v - w, v, w];

    (
        a + ab * v + ac * w,
        OriginLocation::OnFace([0, 1, 2], bcoords),
    )
}

fn closest_edge_projection(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> (Point<Real>, OriginLocation) {
    let edges = [([0, 1], a, b), ([0, 2], a, c), ([1, 2], b, c)];
    let mut best: Option<(Real, Point<Real>, OriginLocation)> = None;

    for (ids, p1, p2) in edges {
        let (proj, loc) = project_origin_on_segment(p1, p2);
        let loc = match loc {
            OriginLocation::OnVertex(i) => OriginLocation::OnVertex(ids[i]),
            OriginLocation::OnEdge(_, bcoords) => OriginLocation::OnEdge(ids, bcoords),
            _ => unreachable!(),
        };
        let sq_dist = proj.coords.norm_squared();

        if best.map(|b| sq_dist < b.0).unwrap_or(true) {
            best = Some((sq_dist, proj, loc));
        }
    }

    // There are always three candidate edges.
    let (_, proj, loc) = best.unwrap_or((0.0, *a, OriginLocation::OnVertex(0)));
    (proj, loc)
}

/// Tests whether the origin lies strictly on the other side of the plane of `(a, b, c)`
/// than `d`.
///
/// Returns `true` as well if `d` (almost) lies on that plane so flat tetrahedra have all
/// their faces tested.
fn origin_outside_of_plane(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> bool {
    let n = (b - a).cross(&(c - a));
    let ad = d - a;
    let sign_origin = -a.coords.dot(&n);
    let sign_d = ad.dot(&n);

    if sign_d * sign_d <= DEFAULT_EPSILON * n.norm_squared() * ad.norm_squared() {
        return true;
    }

    sign_origin * sign_d < 0.0
}

/// Projects the origin on the tetrahedron `(a, b, c, d)`.
///
/// Returns [`OriginLocation::OnSolid`] (and the origin itself) if the origin lies inside of
/// the tetrahedron.
pub fn project_origin_on_tetrahedron(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> (Point<Real>, OriginLocation) {
    let pts = [a, b, c, d];
    // Each face, followed by the vertex opposite to it.
    let faces = [[0, 1, 2, 3], [0, 3, 1, 2], [0, 2, 3, 1], [1, 3, 2, 0]];
    let mut best: Option<(Real, Point<Real>, OriginLocation)> = None;

    for face in faces {
        let (p1, p2, p3, opp) = (pts[face[0]], pts[face[1]], pts[face[2]], pts[face[3]]);

        if origin_outside_of_plane(p1, p2, p3, opp) {
            let (proj, loc) = project_origin_on_triangle(p1, p2, p3);
            let sq_dist = proj.coords.norm_squared();

            if best.map(|b| sq_dist < b.0).unwrap_or(true) {
                best = Some((sq_dist, proj, loc.remap([face[0], face[1], face[2]])));
            }
        }
    }

    match best {
        Some((_, proj, loc)) => (proj, loc),
        None => (Point::origin(), OriginLocation::OnSolid),
    }
}

/// Tests if three points are (almost) collinear.
pub fn is_affinely_dependent_triangle(
    p1: &Point<Real>,
    p2: &Point<Real>,
    p3: &Point<Real>,
) -> bool {
    let p1p2 = p2 - p1;
    let p1p3 = p3 - p1;
    relative_eq!(
        p1p2.cross(&p1p3).norm_squared(),
        0.0,
        epsilon = DEFAULT_EPSILON * DEFAULT_EPSILON
    )
}
