//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON, DIM};
use na::Unit;

/// Traits of convex shapes representable by a support mapping function.
///
/// A shape is described by a *core* geometry, returned by [`SupportMap::local_support_point`],
/// and a collision margin inflating that core by a ball of radius [`SupportMap::margin`].
/// The margin-inflated surface is the one used for contact generation.
pub trait SupportMap {
    /// Evaluates the support function of the core of this shape, i.e., without the margin.
    ///
    /// A support function is a function associating a vector to the shape point which maximizes
    /// their dot product.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Same as `self.local_support_point` except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// A point of the core of this shape, away from its boundary whenever the core has a
    /// non-empty interior.
    ///
    /// The default is the mean of the support points along both directions of each
    /// coordinate axis. Being a convex combination of core points, it always lies inside of
    /// the core, wherever the local origin is.
    fn local_center(&self) -> Point<Real> {
        let mut sum = Vector::zeros();

        for i in 0..DIM {
            let axis = Vector::ith_axis(i);
            sum += self.local_support_point_toward(&axis).coords;
            sum += self.local_support_point_toward(&-axis).coords;
        }

        Point::from(sum / (2 * DIM) as Real)
    }

    /// The collision margin inflating the core of this shape.
    fn margin(&self) -> Real {
        0.0
    }

    /// Evaluates the support function of this shape, including its margin.
    fn local_support_point_with_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        let margin = self.margin();

        if margin == 0.0 {
            return self.local_support_point(dir);
        }

        let dir = Unit::try_new(*dir, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.local_support_point_toward(&dir) + *dir * margin
    }

    /// Evaluates the support function of the core of this shape transformed by `transform`.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }

    /// Same as `self.support_point` except that `dir` is normalized.
    fn support_point_toward(
        &self,
        transform: &Isometry<Real>,
        dir: &Unit<Vector<Real>>,
    ) -> Point<Real> {
        let local_dir = Unit::new_unchecked(transform.inverse_transform_vector(dir));
        transform * self.local_support_point_toward(&local_dir)
    }
}
