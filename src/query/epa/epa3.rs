//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint, ConstantOrigin, VoronoiSimplex};
use crate::query::{EpaFailure, QueryOptions};
use crate::shape::SupportMap;
use crate::utils::{self, OriginLocation};
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use na::{self, Unit};
use num::Bounded;

#[derive(Copy, Clone, PartialEq)]
struct FaceId {
    id: usize,
    neg_dist: Real,
}

impl FaceId {
    fn new(id: usize, neg_dist: Real) -> Result<Self, EpaFailure> {
        if neg_dist > gjk::eps_tol() {
            Err(EpaFailure::OriginNotEnclosed)
        } else {
            Ok(FaceId { id, neg_dist })
        }
    }
}

impl Eq for FaceId {}

impl PartialOrd for FaceId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FaceId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.neg_dist < other.neg_dist {
            Ordering::Less
        } else if self.neg_dist > other.neg_dist {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[derive(Clone, Debug)]
struct Face {
    pts: [usize; 3],
    adj: [usize; 3],
    normal: Unit<Vector<Real>>,
    bcoords: [Real; 3],
    deleted: bool,
}

impl Face {
    fn new_with_proj(
        vertices: &[CSOPoint],
        bcoords: [Real; 3],
        pts: [usize; 3],
        adj: [usize; 3],
    ) -> Self {
        // Degenerate faces get a zero normal. They are never pushed on the heap and
        // `can_be_seen_by` always reports them as visible, so they get removed as soon
        // as they are reached by a silhouette computation.
        let normal = utils::ccw_face_normal([
            &vertices[pts[0]].point,
            &vertices[pts[1]].point,
            &vertices[pts[2]].point,
        ])
        .unwrap_or_else(|| Unit::new_unchecked(na::zero()));

        Face {
            pts,
            bcoords,
            adj,
            normal,
            deleted: false,
        }
    }

    fn new(vertices: &[CSOPoint], pts: [usize; 3], adj: [usize; 3]) -> (Self, bool) {
        let (proj, loc) = utils::project_origin_on_triangle(
            &vertices[pts[0]].point,
            &vertices[pts[1]].point,
            &vertices[pts[2]].point,
        );

        match loc {
            OriginLocation::OnVertex(i) => {
                let mut bcoords = [0.0; 3];
                bcoords[i] = 1.0;
                (
                    Self::new_with_proj(vertices, bcoords, pts, adj),
                    proj.coords.norm() <= EPA_EPS_TOL,
                )
            }
            OriginLocation::OnEdge(ids, coords) => {
                let mut bcoords = [0.0; 3];
                bcoords[ids[0]] = coords[0];
                bcoords[ids[1]] = coords[1];
                (
                    Self::new_with_proj(vertices, bcoords, pts, adj),
                    proj.coords.norm() <= EPA_EPS_TOL,
                )
            }
            OriginLocation::OnFace(_, bcoords) => {
                (Self::new_with_proj(vertices, bcoords, pts, adj), true)
            }
            OriginLocation::OnSolid => (Self::new_with_proj(vertices, [0.0; 3], pts, adj), false),
        }
    }

    fn closest_points(&self, vertices: &[CSOPoint]) -> (Point<Real>, Point<Real>) {
        CSOPoint::witnesses(
            self.pts
                .iter()
                .zip(self.bcoords.iter())
                .map(|(id, w)| (&vertices[*id], *w)),
        )
    }

    fn next_ccw_pt_id(&self, id: usize) -> usize {
        if self.pts[0] == id {
            1
        } else if self.pts[1] == id {
            2
        } else {
            if self.pts[2] != id {
                log::debug!(
                    "Hit unexpected state in EPA: found index {}, expected: {}.",
                    self.pts[2],
                    id
                );
            }

            0
        }
    }

    fn can_be_seen_by(&self, vertices: &[CSOPoint], point: usize, opp_pt_id: usize) -> bool {
        let p0 = &vertices[self.pts[opp_pt_id]].point;
        let p1 = &vertices[self.pts[(opp_pt_id + 1) % 3]].point;
        let p2 = &vertices[self.pts[(opp_pt_id + 2) % 3]].point;
        let pt = &vertices[point].point;

        // Must be `true` for a zero dot product so degenerate faces are skipped.
        (*pt - *p0).dot(&self.normal) >= -gjk::eps_tol()
            || utils::is_affinely_dependent_triangle(p1, p2, pt)
    }
}

const EPA_EPS_TOL: Real = DEFAULT_EPSILON * 100.0;

// Vertex indices and adjacency of the initial tetrahedron. `adj[i]` is the face sharing the
// edge `(pts[i], pts[(i + 1) % 3])`.
const TETRAHEDRON_PTS: [[usize; 3]; 4] = [[0, 1, 2], [1, 3, 2], [0, 2, 3], [0, 3, 1]];
const TETRAHEDRON_ADJ: [[usize; 3]; 4] = [[3, 1, 2], [3, 2, 0], [0, 1, 3], [2, 1, 0]];

// Two tetrahedra glued on the triangle `(0, 1, 2)`, with apexes `3` above and `4` below it.
const BIPYRAMID_PTS: [[usize; 3]; 6] = [
    [0, 1, 3],
    [1, 2, 3],
    [2, 0, 3],
    [1, 0, 4],
    [2, 1, 4],
    [0, 2, 4],
];
const BIPYRAMID_ADJ: [[usize; 3]; 6] = [
    [3, 1, 2],
    [4, 2, 0],
    [5, 0, 1],
    [0, 5, 4],
    [1, 3, 5],
    [2, 4, 3],
];

type Contact = (Point<Real>, Point<Real>, Unit<Vector<Real>>);

/// Flips `n` so that its largest component is positive.
fn canonical_orientation(n: Unit<Vector<Real>>) -> Unit<Vector<Real>> {
    if n[n.iamax()] < 0.0 {
        -n
    } else {
        n
    }
}

struct SilhouetteEdge {
    face_id: usize,
    opp_pt_id: usize,
}

impl SilhouetteEdge {
    fn new(face_id: usize, opp_pt_id: usize) -> Self {
        SilhouetteEdge { face_id, opp_pt_id }
    }
}

/// The Expanding Polytope Algorithm in 3D.
///
/// The internal buffers are kept between two calls to `closest_points` so a single `EPA`
/// can be reused to avoid allocations.
#[derive(Default)]
pub struct EPA {
    vertices: Vec<CSOPoint>,
    faces: Vec<Face>,
    silhouette: Vec<SilhouetteEdge>,
    heap: BinaryHeap<FaceId>,
}

impl EPA {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.heap.clear();
        self.silhouette.clear();
    }

    /// Projects the origin on boundary of the given shape.
    ///
    /// The origin is assumed to be inside of the shape. The simplex must be the final
    /// simplex of a GJK run reporting an intersection.
    pub fn project_origin<G: ?Sized + SupportMap>(
        &mut self,
        m: &Isometry<Real>,
        g: &G,
        simplex: &VoronoiSimplex,
        options: &QueryOptions,
    ) -> Result<Point<Real>, EpaFailure> {
        self.closest_points(&m.inverse(), g, &ConstantOrigin, simplex, options)
            .map(|(p, _, _)| m * p)
    }

    /// Computes the penetration of two shapes along with a contact normal.
    ///
    /// The shapes are assumed to be intersecting and `simplex` must be the final simplex of a
    /// GJK run reporting an intersection. Only the cores of the shapes are considered, exactly
    /// like with [`gjk::closest_points`].
    ///
    /// Returns the points on each shape realizing the minimum translation, in the local-space
    /// of the first shape, and the unit normal pointing from the first shape toward the second.
    /// The penetration depth is `-(p2 - p1).dot(n)`.
    ///
    /// A simplex with less than four vertices is first grown into a polytope enclosing the
    /// origin. If the Minkowski difference turns out to be flat around the origin, the shapes
    /// are only touching: the result has a zero depth and a normal orthogonal to the flat
    /// difference, oriented so that its largest component is positive.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &VoronoiSimplex,
        options: &QueryOptions,
    ) -> Result<Contact, EpaFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let _eps_tol = EPA_EPS_TOL;

        self.reset();

        if simplex.is_empty() {
            return Err(EpaFailure::DegenerateSimplex);
        }

        /*
         * Initialization.
         */
        for i in 0..simplex.dimension() + 1 {
            self.vertices.push(*simplex.point(i));
        }

        match simplex.dimension() {
            0 => {
                // The shapes are touching at a single point.
                let pt = self.vertices[0];
                return Ok((pt.on_a, pt.on_b, Vector::x_axis()));
            }
            3 => {
                let dp1 = self.vertices[1] - self.vertices[0];
                let dp2 = self.vertices[2] - self.vertices[0];
                let dp3 = self.vertices[3] - self.vertices[0];

                if dp1.cross(&dp2).dot(&dp3) > 0.0 {
                    self.vertices.swap(1, 2)
                }

                self.push_initial_faces(&TETRAHEDRON_PTS, &TETRAHEDRON_ADJ)?;
            }
            _ => {
                if self.vertices.len() == 3
                    && utils::is_affinely_dependent_triangle(
                        &self.vertices[0].point,
                        &self.vertices[1].point,
                        &self.vertices[2].point,
                    )
                {
                    self.keep_longest_edge();
                }

                if self.vertices.len() == 2 {
                    let Some(axis) = Unit::try_new(self.vertices[1] - self.vertices[0], _eps_tol)
                    else {
                        let pt = self.vertices[0];
                        return Ok((pt.on_a, pt.on_b, Vector::x_axis()));
                    };

                    match self.support_off_segment(pos12, g1, g2, &axis) {
                        Ok(pt) => self.vertices.push(pt),
                        Err(normal) => return Ok(self.segment_contact(normal)),
                    }
                }

                if let Some(contact) = self.enclose_triangle(pos12, g1, g2)? {
                    return Ok(contact);
                }
            }
        }

        let mut niter = 0;
        let mut max_dist = Real::max_value();

        /*
         * Run the expansion.
         */
        while let Some(face_id) = self.heap.pop() {
            // Create new faces.
            let face = self.faces[face_id.id].clone();

            if face.deleted {
                continue;
            }

            let cso_point = CSOPoint::from_shapes(pos12, g1, g2, &face.normal);
            let support_point_id = self.vertices.len();
            self.vertices.push(cso_point);

            max_dist = max_dist.min(cso_point.point.coords.dot(&face.normal));

            let curr_dist = -face_id.neg_dist;
            let tolerance = _eps_tol.max(options.epa_tolerance * curr_dist.max(0.0));

            if max_dist - curr_dist < tolerance {
                let points = face.closest_points(&self.vertices);
                return Ok((points.0, points.1, face.normal));
            }

            self.faces[face_id.id].deleted = true;

            let adj_opp_pt_id1 = self.faces[face.adj[0]].next_ccw_pt_id(face.pts[0]);
            let adj_opp_pt_id2 = self.faces[face.adj[1]].next_ccw_pt_id(face.pts[1]);
            let adj_opp_pt_id3 = self.faces[face.adj[2]].next_ccw_pt_id(face.pts[2]);

            self.compute_silhouette(support_point_id, face.adj[0], adj_opp_pt_id1);
            self.compute_silhouette(support_point_id, face.adj[1], adj_opp_pt_id2);
            self.compute_silhouette(support_point_id, face.adj[2], adj_opp_pt_id3);

            let first_new_face_id = self.faces.len();

            if self.silhouette.is_empty() {
                log::debug!("Hit unexpected state in EPA: empty silhouette.");
                return Err(EpaFailure::TopologyError);
            }

            for edge in &self.silhouette {
                if !self.faces[edge.face_id].deleted {
                    let new_face_id = self.faces.len();

                    let face_adj = &mut self.faces[edge.face_id];
                    let pt_id1 = face_adj.pts[(edge.opp_pt_id + 2) % 3];
                    let pt_id2 = face_adj.pts[(edge.opp_pt_id + 1) % 3];

                    let pts = [pt_id1, pt_id2, support_point_id];
                    let adj = [edge.face_id, new_face_id + 1, new_face_id - 1];
                    let new_face = Face::new(&self.vertices, pts, adj);

                    face_adj.adj[(edge.opp_pt_id + 1) % 3] = new_face_id;

                    self.faces.push(new_face.0);

                    if new_face.1 {
                        let pt = self.vertices[self.faces[new_face_id].pts[0]].point.coords;
                        let dist = self.faces[new_face_id].normal.dot(&pt);

                        if dist < curr_dist - _eps_tol {
                            log::debug!("Hit unexpected state in EPA: the polytope shrank.");
                            return Err(EpaFailure::TopologyError);
                        }

                        self.heap.push(FaceId::new(new_face_id, -dist)?);
                    }
                }
            }

            if first_new_face_id == self.faces.len() {
                log::debug!("Hit unexpected state in EPA: all the silhouette faces were deleted.");
                return Err(EpaFailure::TopologyError);
            }

            let last_face_id = self.faces.len() - 1;
            self.faces[first_new_face_id].adj[2] = last_face_id;
            self.faces[last_face_id].adj[1] = first_new_face_id;

            self.silhouette.clear();

            niter += 1;
            if niter >= options.epa_max_iterations {
                log::debug!("EPA reached its iteration limit ({niter}).");
                return Err(EpaFailure::DidNotConverge);
            }
        }

        log::debug!("Hit unexpected state in EPA: no face left to expand.");
        Err(EpaFailure::TopologyError)
    }

    fn push_initial_faces(
        &mut self,
        pts: &[[usize; 3]],
        adjs: &[[usize; 3]],
    ) -> Result<(), EpaFailure> {
        let mut any_inside = false;

        for (pts, adj) in pts.iter().zip(adjs) {
            let id = self.faces.len();
            let (face, proj_inside) = Face::new(&self.vertices, *pts, *adj);

            if proj_inside {
                let dist = face.normal.dot(&self.vertices[pts[0]].point.coords);
                self.heap.push(FaceId::new(id, -dist)?);
                any_inside = true;
            }

            self.faces.push(face);
        }

        if !any_inside {
            log::debug!("Hit unexpected state in EPA: failed to project the origin on the initial polytope.");
            return Err(EpaFailure::OriginNotEnclosed);
        }

        Ok(())
    }

    /// Replaces a flat triangle by its longest edge.
    fn keep_longest_edge(&mut self) {
        let [a, b, c] = [self.vertices[0], self.vertices[1], self.vertices[2]];
        let mut longest = (a, b);

        for (p, q) in [(b, c), (c, a)] {
            if (q - p).norm_squared() > (longest.1 - longest.0).norm_squared() {
                longest = (p, q);
            }
        }

        self.vertices.clear();
        self.vertices.push(longest.0);
        self.vertices.push(longest.1);
    }

    /// Finds a support point of the CSO that is not aligned with the segment formed by the
    /// two first vertices.
    ///
    /// If the CSO is itself contained in the line of the segment, returns instead a unit
    /// vector orthogonal to that line.
    fn support_off_segment<G1, G2>(
        &self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        axis: &Unit<Vector<Real>>,
    ) -> Result<CSOPoint, Unit<Vector<Real>>>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let a = self.vertices[0].point;
        let b = self.vertices[1].point;
        let mut basis = [Vector::zeros(); 2];
        let mut nbasis = 0;

        Vector::orthonormal_subspace_basis(&[axis.into_inner()], |dir| {
            basis[nbasis] = *dir;
            nbasis += 1;
            nbasis < 2
        });

        for dir in basis.iter().flat_map(|d| [*d, -*d]) {
            let pt = CSOPoint::from_shapes(pos12, g1, g2, &dir);

            if !utils::is_affinely_dependent_triangle(&a, &b, &pt.point) {
                return Ok(pt);
            }
        }

        Err(canonical_orientation(Unit::new_normalize(basis[0])))
    }

    /// The zero-depth contact at the projection of the origin on the two first vertices.
    fn segment_contact(&self, normal: Unit<Vector<Real>>) -> Contact {
        let (_, loc) =
            utils::project_origin_on_segment(&self.vertices[0].point, &self.vertices[1].point);
        let bcoords = match loc {
            OriginLocation::OnVertex(0) => [1.0, 0.0],
            OriginLocation::OnVertex(_) => [0.0, 1.0],
            OriginLocation::OnEdge(_, bcoords) => bcoords,
            OriginLocation::OnFace(..) | OriginLocation::OnSolid => [0.5, 0.5],
        };
        let (p1, p2) = CSOPoint::witnesses(self.vertices.iter().zip(bcoords));

        (p1, p2, normal)
    }

    /// Grows the triangle formed by the three first vertices into a bipyramid enclosing the
    /// origin, using the support points on both sides of the triangle plane.
    ///
    /// Returns a zero-depth contact instead if the CSO does not extend beyond that plane
    /// on at least one side.
    fn enclose_triangle<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Result<Option<Contact>, EpaFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let [a, b, c] = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
        ];
        let n = utils::ccw_face_normal([&a, &b, &c]).ok_or(EpaFailure::DegenerateSimplex)?;

        let above = CSOPoint::from_shapes(pos12, g1, g2, &n);
        let below = CSOPoint::from_shapes(pos12, g1, g2, &-*n);
        let flat_above = above.point.coords.dot(&n) <= EPA_EPS_TOL;
        let flat_below = -below.point.coords.dot(&n) <= EPA_EPS_TOL;

        let normal = match (flat_above, flat_below) {
            (false, false) => {
                self.vertices.push(above);
                self.vertices.push(below);
                self.push_initial_faces(&BIPYRAMID_PTS, &BIPYRAMID_ADJ)?;
                return Ok(None);
            }
            (true, true) => canonical_orientation(n),
            (true, false) => n,
            (false, true) => -n,
        };

        let (_, loc) = utils::project_origin_on_triangle(&a, &b, &c);
        let mut bcoords = [0.0; 3];
        match loc {
            OriginLocation::OnVertex(i) => bcoords[i] = 1.0,
            OriginLocation::OnEdge(ids, coords) => {
                bcoords[ids[0]] = coords[0];
                bcoords[ids[1]] = coords[1];
            }
            OriginLocation::OnFace(_, coords) => bcoords = coords,
            OriginLocation::OnSolid => bcoords = [1.0 / 3.0; 3],
        }
        let (p1, p2) = CSOPoint::witnesses(self.vertices.iter().zip(bcoords));

        Ok(Some((p1, p2, normal)))
    }

    fn compute_silhouette(&mut self, point: usize, id: usize, opp_pt_id: usize) {
        if !self.faces[id].deleted {
            if !self.faces[id].can_be_seen_by(&self.vertices, point, opp_pt_id) {
                self.silhouette.push(SilhouetteEdge::new(id, opp_pt_id));
            } else {
                self.faces[id].deleted = true;

                let adj_pt_id1 = (opp_pt_id + 2) % 3;
                let adj_pt_id2 = opp_pt_id;

                let adj1 = self.faces[id].adj[adj_pt_id1];
                let adj2 = self.faces[id].adj[adj_pt_id2];

                let adj_opp_pt_id1 =
                    self.faces[adj1].next_ccw_pt_id(self.faces[id].pts[adj_pt_id1]);
                let adj_opp_pt_id2 =
                    self.faces[adj2].next_ccw_pt_id(self.faces[id].pts[adj_pt_id2]);

                self.compute_silhouette(point, adj1, adj_opp_pt_id1);
                self.compute_silhouette(point, adj2, adj_opp_pt_id2);
            }
        }
    }
}
