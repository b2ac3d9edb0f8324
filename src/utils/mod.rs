//! Various unsorted geometrical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::origin_projection::{
    is_affinely_dependent_triangle, project_origin_on_segment, project_origin_on_tetrahedron,
    project_origin_on_triangle, OriginLocation,
};
pub use self::point_cloud_support_point::point_cloud_support_point;

mod ccw_face_normal;
mod origin_projection;
mod point_cloud_support_point;
