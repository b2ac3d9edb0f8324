use crate::math::{Isometry, Point, Real, Vector};
use crate::query::Unsupported;
use crate::shape::{Shape, SupportMap};
use na::Unit;

/// Selects which surface of a shape a support query is performed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SupportMode {
    /// The core of the shape inflated by its collision margin.
    WithMargin,
    /// The bare core of the shape.
    WithoutMargin,
}

/// A convex shape placed in world-space, together with its collision margin.
///
/// This is the only view of a shape the distance queries need. It is cheap to build and
/// never modified by the queries, so a shape can be shared between any number of
/// adapters used from different threads.
#[derive(Copy, Clone)]
pub struct SupportAdapter<'a> {
    shape: &'a dyn SupportMap,
    position: Isometry<Real>,
    margin: Real,
    core_sphere_radius: Option<Real>,
}

impl<'a> SupportAdapter<'a> {
    /// Wraps a shape placed at `position`.
    ///
    /// The margin is initialized with the shape's own collision margin. Fails if the shape
    /// has no support mapping.
    pub fn new(shape: &'a dyn Shape, position: Isometry<Real>) -> Result<Self, Unsupported> {
        let support_map = shape.as_support_map().ok_or(Unsupported)?;

        Ok(Self {
            shape: support_map,
            position,
            margin: support_map.margin(),
            core_sphere_radius: shape.core_sphere_radius(),
        })
    }

    /// Wraps a support mapping placed at `position`.
    ///
    /// Adapters built this way never take the sphere-sphere shortcut.
    pub fn from_support_map(shape: &'a dyn SupportMap, position: Isometry<Real>) -> Self {
        Self {
            shape,
            position,
            margin: shape.margin(),
            core_sphere_radius: None,
        }
    }

    /// Overrides the collision margin of this adapter.
    ///
    /// # Panics
    /// If `margin` is negative or not finite.
    pub fn with_margin(mut self, margin: Real) -> Self {
        assert!(
            margin >= 0.0 && margin.is_finite(),
            "A collision margin must be finite and non-negative."
        );
        self.margin = margin;
        self
    }

    /// The collision margin of this adapter.
    #[inline]
    pub fn margin(&self) -> Real {
        self.margin
    }

    /// The world-space position of the wrapped shape.
    #[inline]
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// The wrapped support mapping.
    #[inline]
    pub fn shape(&self) -> &'a dyn SupportMap {
        self.shape
    }

    /// The world-space origin of the wrapped shape.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from(self.position.translation.vector)
    }

    /// The radius, margin included, of the sphere this shape reduces to, if any.
    pub fn sphere_radius(&self) -> Option<Real> {
        self.core_sphere_radius.map(|r| r + self.margin)
    }

    /// The world-space support point of the shape inflated by the margin of this adapter.
    pub fn support_with_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = self.position.inverse_transform_vector(dir);
        self.position * self.local_support_point_with_margin(&local_dir)
    }

    /// The world-space support point of the bare core of the shape.
    pub fn support_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.shape.support_point(&self.position, dir)
    }

    /// The world-space support point of the surface selected by `mode`.
    pub fn support(&self, dir: &Vector<Real>, mode: SupportMode) -> Point<Real> {
        match mode {
            SupportMode::WithMargin => self.support_with_margin(dir),
            SupportMode::WithoutMargin => self.support_without_margin(dir),
        }
    }
}

// The local-space support mapping of the wrapped shape, with the margin of this adapter.
impl SupportMap for SupportAdapter<'_> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.shape.local_support_point(dir)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.local_support_point_toward(dir)
    }

    #[inline]
    fn local_center(&self) -> Point<Real> {
        self.shape.local_center()
    }

    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }
}
