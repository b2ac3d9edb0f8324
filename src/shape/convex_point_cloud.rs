use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use crate::utils;
use alloc::vec::Vec;

/// The convex hull of a set of points, described only by its vertices.
///
/// No convex hull is actually computed: the support mapping of a point cloud is the same
/// as the support mapping of its convex hull.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPointCloud {
    points: Vec<Point<Real>>,
}

impl ConvexPointCloud {
    /// Creates a convex point cloud from its vertices.
    ///
    /// Returns `None` if `points` is empty.
    pub fn new(points: Vec<Point<Real>>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    /// The vertices of this point cloud.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl SupportMap for ConvexPointCloud {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        // Non-empty by construction.
        utils::point_cloud_support_point(dir, &self.points).unwrap_or_else(Point::origin)
    }
}
