use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::SupportMap;

/// A support mapping that is the point at (0.0, 0.0, 0.0).
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn support_point_toward(&self, m: &Isometry<Real>, _: &Unit<Vector<Real>>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_support_point_toward(&self, _: &Unit<Vector<Real>>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_center(&self) -> Point<Real> {
        Point::origin()
    }
}

/// The Minkowski sum of a shape and a ball.
///
/// The ball is folded into the core of the resulting support map, so a `DilatedShape`
/// has no margin of its own. The solvers use it to run on the margin-inflated surface
/// of a shape.
pub struct DilatedShape<'a, S: ?Sized + SupportMap> {
    /// The shape involved in the Minkowski sum.
    pub shape: &'a S,
    /// The radius of the ball involved in the Minkoski sum.
    pub radius: Real,
}

impl<'a, S: ?Sized + SupportMap> DilatedShape<'a, S> {
    /// Dilates `shape` by its own collision margin.
    pub fn with_own_margin(shape: &'a S) -> Self {
        DilatedShape {
            shape,
            radius: shape.margin(),
        }
    }
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        if self.radius == 0.0 {
            return self.shape.local_support_point(dir);
        }

        let dir = Unit::try_new(*dir, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.local_support_point_toward(&dir)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.local_support_point_toward(dir) + **dir * self.radius
    }

    #[inline]
    fn local_center(&self) -> Point<Real> {
        self.shape.local_center()
    }
}
