use crate::math::{Real, Vector};
use na::Unit;

/// The set of points lying below a plane passing through the local origin.
///
/// Being unbounded, a half-space has no support point in most directions. It is kept as a
/// [`Shape`](crate::shape::Shape) so that queries on it are rejected with
/// [`Unsupported`](crate::query::Unsupported) instead of silently producing garbage.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HalfSpace {
    /// The outward normal of the bounding plane.
    pub normal: Unit<Vector<Real>>,
}

impl HalfSpace {
    /// The half-space bounded by the plane with the outward normal `normal`.
    #[inline]
    pub fn new(normal: Unit<Vector<Real>>) -> HalfSpace {
        HalfSpace { normal }
    }
}
