use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use na::Unit;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug)]
/// A shape with rounded borders.
///
/// The border radius is exposed as an additional collision margin: the core of a
/// `RoundShape` is the core of its inner shape.
pub struct RoundShape<S> {
    /// The shape being rounded.
    pub inner_shape: S,
    /// The radius of the rounded border.
    pub border_radius: Real,
}

impl<S: SupportMap> SupportMap for RoundShape<S> {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.inner_shape.local_support_point(dir)
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.inner_shape.local_support_point_toward(dir)
    }

    fn local_center(&self) -> Point<Real> {
        self.inner_shape.local_center()
    }

    fn margin(&self) -> Real {
        self.inner_shape.margin() + self.border_radius
    }
}
