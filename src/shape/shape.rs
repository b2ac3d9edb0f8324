use crate::math::{Point, Real};
use crate::shape::{
    Ball, Capsule, ConvexPointCloud, Cuboid, HalfSpace, MultiSphere, RoundShape, SupportMap,
};
use downcast_rs::{impl_downcast, DowncastSync};
use num_derive::FromPrimitive;

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// Enum representing the type of a shape.
pub enum ShapeType {
    /// A ball shape.
    Ball = 0,
    /// The convex hull of a set of spheres.
    MultiSphere,
    /// A cuboid shape.
    Cuboid,
    /// A capsule shape.
    Capsule,
    /// The convex hull of a set of points.
    ConvexPointCloud,
    /// A shape dilated by a ball.
    RoundShape,
    /// A shape representing a full half-space.
    HalfSpace,
    /// A custom user-defined shape.
    Custom,
}

/// Trait implemented by all shapes supported by the queries of this crate.
///
/// Only shapes returning `Some` from [`Shape::as_support_map`] can take part in a
/// distance or penetration query.
pub trait Shape: DowncastSync {
    /// The type of this shape.
    fn shape_type(&self) -> ShapeType;

    /// Converts this shape to a support mapping, if it has one.
    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        None
    }

    /// The radius of the core of this shape if it reduces to a sphere centered at its
    /// local-space origin.
    ///
    /// The actual sphere radius is this core radius plus the collision margin.
    fn core_sphere_radius(&self) -> Option<Real> {
        None
    }
}

impl_downcast!(sync Shape);

impl dyn Shape {
    /// Converts this abstract shape to the given shape, if it is one.
    pub fn as_shape<T: Shape>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a ball, if it is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        self.downcast_ref()
    }

    /// Is this shape known to be convex and support-mapped?
    pub fn is_support_map(&self) -> bool {
        self.as_support_map().is_some()
    }
}

impl Shape for Ball {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Ball
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }

    fn core_sphere_radius(&self) -> Option<Real> {
        Some(0.0)
    }
}

impl Shape for MultiSphere {
    fn shape_type(&self) -> ShapeType {
        ShapeType::MultiSphere
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }

    fn core_sphere_radius(&self) -> Option<Real> {
        match self.spheres() {
            [(center, _)] if *center == Point::origin() => Some(self.core_radius(0)),
            _ => None,
        }
    }
}

impl Shape for Cuboid {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Cuboid
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }
}

impl Shape for Capsule {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Capsule
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }

    fn core_sphere_radius(&self) -> Option<Real> {
        if self.a == self.b && self.a == Point::origin() {
            Some(0.0)
        } else {
            None
        }
    }
}

impl Shape for ConvexPointCloud {
    fn shape_type(&self) -> ShapeType {
        ShapeType::ConvexPointCloud
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }
}

impl<S: Shape + SupportMap> Shape for RoundShape<S> {
    fn shape_type(&self) -> ShapeType {
        ShapeType::RoundShape
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(self as &dyn SupportMap)
    }

    fn core_sphere_radius(&self) -> Option<Real> {
        self.inner_shape.core_sphere_radius()
    }
}

impl Shape for HalfSpace {
    fn shape_type(&self) -> ShapeType {
        ShapeType::HalfSpace
    }
}
