use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// A Ball shape.
///
/// A ball is represented as a single point core inflated by a margin equal to its radius.
/// Its core support point is therefore always its center.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball with the given radius.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        assert!(radius >= 0.0, "A ball radius must be non-negative.");
        Ball { radius }
    }
}

impl SupportMap for Ball {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_center(&self) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn margin(&self) -> Real {
        self.radius
    }
}
