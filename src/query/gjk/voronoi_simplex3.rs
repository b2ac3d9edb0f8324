use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint};
use crate::utils::{self, OriginLocation};
#[cfg(not(feature = "std"))]
use na::ComplexField; // for .abs()

/// Barycentric coordinates smaller than this are snapped to zero when reducing a simplex.
///
/// The vertex carrying such a coordinate is dropped so that nearly degenerate simplices
/// don't keep flipping between two sub-simplices from one iteration to the next.
pub const BARYCENTRIC_EPSILON: Real = DEFAULT_EPSILON * 100.0;

/// A simplex of dimension up to 3 that uses Voronoï regions for computing point projections.
///
/// A `VoronoiSimplex` is the mutable state of a single GJK run. It must be cleared with
/// [`VoronoiSimplex::reset`] before being reused for another pair of shapes: a simplex
/// left over from a previous query describes a different Minkowski difference and makes
/// the next query start from meaningless points.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    // `prev_vertices[i]` is the index in `vertices` of the i-th vertex of the simplex
    // as it was before the last call to `add_point`.
    prev_vertices: [usize; 4],
    prev_proj: [Real; 4],
    prev_len: usize,

    vertices: [CSOPoint; 4],
    proj: [Real; 4],
    len: usize,
    origin_inside: bool,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            prev_vertices: [0, 1, 2, 3],
            prev_proj: [0.0; 4],
            prev_len: 0,
            vertices: [CSOPoint::origin(); 4],
            proj: [0.0; 4],
            len: 0,
            origin_inside: false,
        }
    }

    /// Clears this simplex, removing all its vertices and all the memory of its previous
    /// states.
    pub fn reset(&mut self) {
        self.prev_vertices = [0, 1, 2, 3];
        self.prev_proj = [0.0; 4];
        self.prev_len = 0;
        self.proj = [0.0; 4];
        self.len = 0;
        self.origin_inside = false;
    }

    /// Does this simplex have no vertex at all?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point was not added because it is (almost) a duplicate of a
    /// vertex already part of this simplex, or if the simplex is already a tetrahedron.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        if self.len == 0 {
            self.prev_len = 0;
            self.vertices[0] = pt;
            self.proj[0] = 1.0;
            self.len = 1;
            self.origin_inside = false;
            return true;
        }

        if self.len == 4 {
            return false;
        }

        self.prev_len = self.len;
        self.prev_proj = self.proj;
        self.prev_vertices = [0, 1, 2, 3];

        if self.contains_almost(&pt.point) {
            return false;
        }

        self.vertices[self.len] = pt;
        self.len += 1;
        true
    }

    fn contains_almost(&self, pt: &Point<Real>) -> bool {
        self.vertices[..self.len]
            .iter()
            .any(|v| (v.point - pt).norm_squared() < gjk::eps_tol())
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th by the last call to
    /// `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i < self.len, "Index out of bounds.");
        self.proj[i]
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i < self.len, "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th before the last call to
    /// `project_origin_and_reduce`.
    pub fn prev_proj_coord(&self, i: usize) -> Real {
        assert!(i < self.prev_len, "Index out of bounds.");
        self.prev_proj[i]
    }

    /// The i-th point of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_point(&self, i: usize) -> &CSOPoint {
        assert!(i < self.prev_len, "Index out of bounds.");
        &self.vertices[self.prev_vertices[i]]
    }

    /// Reorders the vertices so that `kept` come first, in that order.
    ///
    /// Dropped vertices stay stored after the kept ones so the previous simplex remains
    /// accessible.
    fn reduce_to(&mut self, kept: &[usize]) {
        let mut perm = [0usize; 4];
        let mut used = [false; 4];

        for (k, id) in kept.iter().enumerate() {
            perm[k] = *id;
            used[*id] = true;
        }

        let mut k = kept.len();
        for (id, is_used) in used.iter().enumerate() {
            if !is_used {
                perm[k] = id;
                k += 1;
            }
        }

        let mut inv_perm = [0usize; 4];
        for (new_id, old_id) in perm.iter().enumerate() {
            inv_perm[*old_id] = new_id;
        }

        let old = self.vertices;
        for (new_id, old_id) in perm.iter().enumerate() {
            self.vertices[new_id] = old[*old_id];
        }

        for prev_id in &mut self.prev_vertices {
            *prev_id = inv_perm[*prev_id];
        }

        self.len = kept.len();
    }

    /// Keeps the vertices of `ids` with a barycentric coordinate above
    /// [`BARYCENTRIC_EPSILON`] and returns the projection recomputed from them.
    fn snap_and_reduce(&mut self, ids: &[usize], bcoords: &[Real]) -> Point<Real> {
        let mut kept = [0usize; 3];
        let mut coords = [0.0; 3];
        let mut nkept = 0;

        for (id, coord) in ids.iter().zip(bcoords.iter()) {
            if *coord > BARYCENTRIC_EPSILON {
                kept[nkept] = *id;
                coords[nkept] = *coord;
                nkept += 1;
            }
        }

        if nkept == 0 {
            // Only possible with a NaN coordinate. Fall back to the first vertex.
            kept[0] = ids[0];
            coords[0] = 1.0;
            nkept = 1;
        }

        let total: Real = coords[..nkept].iter().sum();
        let mut proj = Point::origin();

        for k in 0..nkept {
            coords[k] /= total;
            proj += self.vertices[kept[k]].point.coords * coords[k];
        }

        self.reduce_to(&kept[..nkept]);
        self.proj[..nkept].copy_from_slice(&coords[..nkept]);
        proj
    }

    /// Computes the barycentric coordinates of the origin inside of the current tetrahedron.
    fn solid_coords(&self) -> [Real; 4] {
        let [a, b, c, d] = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
            self.vertices[3].point,
        ];
        let ab = b - a;
        let ac = c - a;
        let ad = d - a;
        let ao = -a.coords;
        let det = ab.dot(&ac.cross(&ad));

        if det.abs() <= DEFAULT_EPSILON {
            return [0.25; 4];
        }

        let vb = ao.dot(&ac.cross(&ad)) / det;
        let vc = ab.dot(&ao.cross(&ad)) / det;
        let vd = ab.dot(&ac.cross(&ao)) / det;
        [1.0 - vb - vc - vd, vb, vc, vd]
    }

    /// Projects the origin on the boundary of this simplex and reduces `self` the smallest
    /// simplex containing the projection.
    ///
    /// Returns the result of the projection or `Point::origin()` if the origin lies inside of
    /// the simplex. The state of the projected point before reduction remains accessible
    /// through the `prev_` methods.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        let v = self.vertices.map(|v| v.point);
        self.origin_inside = false;

        let proj = match self.len {
            0 => return Point::origin(),
            1 => {
                self.proj[0] = 1.0;
                v[0]
            }
            2 => match utils::project_origin_on_segment(&v[0], &v[1]).1 {
                OriginLocation::OnVertex(i) => self.snap_and_reduce(&[i], &[1.0]),
                OriginLocation::OnEdge(ids, bcoords) => self.snap_and_reduce(&ids, &bcoords),
                _ => unreachable!(),
            },
            3 => match utils::project_origin_on_triangle(&v[0], &v[1], &v[2]).1 {
                OriginLocation::OnVertex(i) => self.snap_and_reduce(&[i], &[1.0]),
                OriginLocation::OnEdge(ids, bcoords) => self.snap_and_reduce(&ids, &bcoords),
                OriginLocation::OnFace(ids, bcoords) => self.snap_and_reduce(&ids, &bcoords),
                OriginLocation::OnSolid => unreachable!(),
            },
            _ => match utils::project_origin_on_tetrahedron(&v[0], &v[1], &v[2], &v[3]).1 {
                OriginLocation::OnVertex(i) => self.snap_and_reduce(&[i], &[1.0]),
                OriginLocation::OnEdge(ids, bcoords) => self.snap_and_reduce(&ids, &bcoords),
                OriginLocation::OnFace(ids, bcoords) => self.snap_and_reduce(&ids, &bcoords),
                OriginLocation::OnSolid => {
                    self.proj = self.solid_coords();
                    self.origin_inside = true;
                    Point::origin()
                }
            },
        };

        if proj == Point::origin() {
            self.origin_inside = true;
        }

        proj
    }

    /// Whether the last call to `project_origin_and_reduce` found the origin inside of,
    /// or exactly on, this simplex.
    pub fn contains_origin(&self) -> bool {
        self.origin_inside
    }

    /// Reconstructs, from the current barycentric coordinates, the points on the first and
    /// second shapes that realize the projection of the origin.
    pub fn witness_points(&self) -> (Point<Real>, Point<Real>) {
        CSOPoint::witnesses(
            self.vertices[..self.len]
                .iter()
                .zip(self.proj[..self.len].iter().copied()),
        )
    }

    /// Same as `self.witness_points` but for the simplex as it was before the last call to
    /// `add_point`.
    pub fn prev_witness_points(&self) -> (Point<Real>, Point<Real>) {
        CSOPoint::witnesses((0..self.prev_len).map(|i| (self.prev_point(i), self.prev_proj[i])))
    }

    /// Checks that this simplex contains the given point.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.vertices[..self.len].iter().any(|v| v.point == *pt)
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    ///
    /// An empty simplex has dimension 0 as well, see [`VoronoiSimplex::is_empty`].
    pub fn dimension(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// The dimension of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_dimension(&self) -> usize {
        self.prev_len.saturating_sub(1)
    }

    /// The maximum squared length of the vertices of this simplex.
    pub fn max_sq_len(&self) -> Real {
        self.vertices[..self.len]
            .iter()
            .map(|v| v.point.coords.norm_squared())
            .fold(0.0, Real::max)
    }
}
