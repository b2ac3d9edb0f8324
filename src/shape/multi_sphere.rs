//! Convex hull of a set of spheres.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::SupportMap;
use alloc::vec::Vec;
use na::Unit;

/// The collision margin assigned by default to shapes carrying their own rounding.
pub const DEFAULT_COLLISION_MARGIN: Real = 0.04;

/// The convex hull of a set of spheres.
///
/// Unlike [`Ball`](crate::shape::Ball), the radii are part of the geometry: the collision
/// margin lies *inside* of the spheres, and the core is made of the spheres shrunk by
/// that margin. The surface including the margin is always exactly the hull of the
/// original spheres.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct MultiSphere {
    spheres: Vec<(Point<Real>, Real)>,
    margin: Real,
}

impl MultiSphere {
    /// Creates the convex hull of the given spheres, given as `(center, radius)` pairs.
    ///
    /// The margin is set to [`DEFAULT_COLLISION_MARGIN`] clamped to the smallest radius.
    /// Returns `None` if there is no sphere or if any radius is negative.
    pub fn new(spheres: Vec<(Point<Real>, Real)>) -> Option<Self> {
        let min_radius = spheres.iter().map(|s| s.1).reduce(Real::min)?;

        if min_radius < 0.0 {
            return None;
        }

        Some(Self {
            spheres,
            margin: DEFAULT_COLLISION_MARGIN.min(min_radius),
        })
    }

    /// Creates a single sphere of the given radius, centered at the local-space origin.
    pub fn single(radius: Real) -> Option<Self> {
        Self::new(alloc::vec![(Point::origin(), radius)])
    }

    /// Sets the collision margin of this shape.
    ///
    /// The margin is clamped to the smallest radius so the core never turns inside-out.
    pub fn with_margin(mut self, margin: Real) -> Self {
        assert!(margin >= 0.0, "A collision margin must be non-negative.");
        let min_radius = self
            .spheres
            .iter()
            .map(|s| s.1)
            .fold(Real::MAX, Real::min);
        self.margin = margin.min(min_radius);
        self
    }

    /// The `(center, radius)` pairs of the spheres of this shape.
    pub fn spheres(&self) -> &[(Point<Real>, Real)] {
        &self.spheres
    }

    /// The radius of the `i`-th sphere once shrunk by the collision margin.
    pub fn core_radius(&self, i: usize) -> Real {
        self.spheres[i].1 - self.margin
    }
}

impl SupportMap for MultiSphere {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = Unit::try_new(*dir, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.local_support_point_toward(&dir)
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        let mut best = Point::origin();
        let mut best_dot = -Real::MAX;

        for (center, radius) in &self.spheres {
            let pt = center + **dir * (radius - self.margin);
            let dot = pt.coords.dot(dir);

            if dot > best_dot {
                best_dot = dot;
                best = pt;
            }
        }

        best
    }

    fn margin(&self) -> Real {
        self.margin
    }
}
