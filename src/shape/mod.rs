//! Shapes supported by the distance queries.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::convex_point_cloud::ConvexPointCloud;
pub use self::cuboid::Cuboid;
pub use self::half_space::HalfSpace;
pub use self::multi_sphere::{MultiSphere, DEFAULT_COLLISION_MARGIN};
pub use self::round_shape::RoundShape;
#[doc(inline)]
pub use self::shape::{Shape, ShapeType};
#[doc(inline)]
pub use self::support_map::SupportMap;

/// A cuboid dilated by a sphere (so it has round corners).
pub type RoundCuboid = RoundShape<Cuboid>;
/// A convex point cloud dilated by a sphere (so it has round corners).
pub type RoundConvexPointCloud = RoundShape<ConvexPointCloud>;

mod ball;
mod capsule;
mod convex_point_cloud;
mod cuboid;
mod half_space;
mod multi_sphere;
mod round_shape;
mod shape;
pub(crate) mod support_map;
