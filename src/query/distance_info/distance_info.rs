use crate::math::{Isometry, Point, Real, Vector};
use crate::query::QueryFailure;
use na::Unit;

/// The signed distance between two shapes, along with the points realizing it.
///
/// Everything is expressed in world-space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DistanceInfo {
    /// The witness point on the first shape.
    pub point_on_a: Point<Real>,
    /// The witness point on the second shape.
    pub point_on_b: Point<Real>,
    /// The unit normal pointing from the second shape toward the first one.
    pub normal_b_to_a: Unit<Vector<Real>>,
    /// The signed distance between both shapes.
    ///
    /// Positive if the shapes are separated, zero if they are touching, and negative if
    /// they are penetrating, in which case its opposite is the penetration depth.
    pub distance: Real,
}

/// The description of a penetration: a [`DistanceInfo`] with a negative distance.
pub type PenetrationDescription = DistanceInfo;

/// The outcome of a distance query.
pub type QueryOutcome = Result<DistanceInfo, QueryFailure>;

impl DistanceInfo {
    /// Creates a new distance description.
    #[inline]
    pub fn new(
        point_on_a: Point<Real>,
        point_on_b: Point<Real>,
        normal_b_to_a: Unit<Vector<Real>>,
        distance: Real,
    ) -> Self {
        Self {
            point_on_a,
            point_on_b,
            normal_b_to_a,
            distance,
        }
    }

    /// Converts the output of a solver into a world-space distance description.
    ///
    /// `p1`, `p2` and the normal `n12` pointing from the first shape toward the second are
    /// expressed in the local-space of the first shape, placed at `pos1`.
    pub(crate) fn from_local(
        pos1: &Isometry<Real>,
        p1: &Point<Real>,
        p2: &Point<Real>,
        n12: &Unit<Vector<Real>>,
    ) -> Self {
        Self {
            point_on_a: pos1 * p1,
            point_on_b: pos1 * p2,
            normal_b_to_a: -(pos1 * n12),
            distance: (p2 - p1).dot(n12),
        }
    }

    /// The same description with the roles of both shapes swapped.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            point_on_a: self.point_on_b,
            point_on_b: self.point_on_a,
            normal_b_to_a: -self.normal_b_to_a,
            distance: self.distance,
        }
    }

    /// Is the distance negative?
    #[inline]
    pub fn is_penetrating(&self) -> bool {
        self.distance < 0.0
    }

    /// The penetration depth, or zero if the shapes are not penetrating.
    #[inline]
    pub fn depth(&self) -> Real {
        (-self.distance).max(0.0)
    }
}
