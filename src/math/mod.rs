//! Compilation flags dependent aliases for mathematical types.

pub use na::{Isometry3, Matrix3, Point3, Translation3, UnitVector3, Vector3};
use na::{UnitQuaternion, U3};

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub type Real = f64;

/// The scalar type used throughout this crate.
#[cfg(feature = "f32")]
pub type Real = f32;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The dimension of the ambient space.
pub type Dim = U3;

/// The point type.
pub use Point3 as Point;

/// The vector type.
pub use Vector3 as Vector;

/// The unit vector type.
pub use UnitVector3 as UnitVector;

/// The matrix type.
pub use Matrix3 as Matrix;

/// The transformation matrix type.
pub use Isometry3 as Isometry;

/// The rotation matrix type.
pub type Rotation<N> = UnitQuaternion<N>;

/// The translation type.
pub use Translation3 as Translation;
