//! GJK distance computation, with the simplex and Minkowski-difference points it works on.

pub use self::cso_point::CSOPoint;
pub use self::voronoi_simplex3::{VoronoiSimplex, BARYCENTRIC_EPSILON};
pub use gjk::*;
pub use special_support_maps::*;

mod cso_point;
mod gjk;
mod special_support_maps;
mod voronoi_simplex3;
