//! Signed distance between convex shapes, with witness points.

pub use self::distance_info::{DistanceInfo, PenetrationDescription, QueryOutcome};
pub use self::distance_info_ball_ball::{
    distance_info_ball_ball, distance_info_ball_ball_gjk, SphereSphereCollisionDescription,
};
pub use self::distance_info_support_map_support_map::distance_info_support_map_support_map;

mod distance_info;
mod distance_info_ball_ball;
mod distance_info_support_map_support_map;
