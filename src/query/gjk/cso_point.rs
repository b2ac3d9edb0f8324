use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use core::ops::Sub;
use na::Unit;

/// A point of the Minkowski difference `A - B` of two shapes.
///
/// Every point of the difference is remembered together with the pair of support points it
/// was built from, so that the solvers can map a result on the difference back to a pair
/// of witness points on `A` and `B`. All points are expressed in the local-space of `A`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point of the difference, equal to `on_a - on_b`.
    pub point: Point<Real>,
    /// The support point of `A` this point was built from.
    pub on_a: Point<Real>,
    /// The support point of `B` this point was built from.
    pub on_b: Point<Real>,
}

impl CSOPoint {
    /// Builds the difference point `on_a - on_b`.
    pub fn new(on_a: Point<Real>, on_b: Point<Real>) -> Self {
        CSOPoint {
            point: Point::from(on_a - on_b),
            on_a,
            on_b,
        }
    }

    /// The origin of the difference, built from the local origins of both shapes.
    pub fn origin() -> Self {
        CSOPoint::new(Point::origin(), Point::origin())
    }

    /// The support point of `g1 - g2` toward the unit direction `dir`.
    ///
    /// `g2` is positioned by `pos12` in the local-space of `g1`. The cores of both shapes are
    /// used; margins must be folded in by the caller, e.g. with
    /// [`DilatedShape`](crate::query::gjk::DilatedShape).
    pub fn from_shapes_toward<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        dir: &Unit<Vector<Real>>,
    ) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        CSOPoint::new(
            g1.local_support_point_toward(dir),
            g2.support_point_toward(pos12, &-*dir),
        )
    }

    /// The support point of `g1 - g2` toward the (not necessarily unit) direction `dir`.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        CSOPoint::new(g1.local_support_point(dir), g2.support_point(pos12, &-*dir))
    }

    /// Combines the witness points of weighted difference points.
    ///
    /// Returns the points of `A` and `B` whose difference is the weighted sum of the
    /// `point`s. The weights are expected to be barycentric coordinates.
    pub fn witnesses<'a>(
        weighted: impl IntoIterator<Item = (&'a CSOPoint, Real)>,
    ) -> (Point<Real>, Point<Real>) {
        weighted.into_iter().fold(
            (Point::origin(), Point::origin()),
            |(on_a, on_b), (pt, w)| (on_a + pt.on_a.coords * w, on_b + pt.on_b.coords * w),
        )
    }
}

impl Sub<CSOPoint> for CSOPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CSOPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
