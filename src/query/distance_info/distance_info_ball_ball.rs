use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::details::distance_info_support_map_support_map;
use crate::query::gjk::VoronoiSimplex;
use crate::query::{
    DistanceInfo, GjkStrategy, QueryFailure, QueryOptions, QueryOutcome, SupportAdapter,
};
use crate::shape::{Ball, MultiSphere};
use na::Unit;

/// Two spheres placed in world-space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SphereSphereCollisionDescription {
    /// The position of the first sphere. Only its translation matters.
    pub sphere_transform_a: Isometry<Real>,
    /// The position of the second sphere. Only its translation matters.
    pub sphere_transform_b: Isometry<Real>,
    /// The radius of the first sphere.
    pub radius_a: Real,
    /// The radius of the second sphere.
    pub radius_b: Real,
}

impl SphereSphereCollisionDescription {
    /// Describes two spheres centered at `center_a` and `center_b`.
    pub fn new(
        center_a: &Point<Real>,
        radius_a: Real,
        center_b: &Point<Real>,
        radius_b: Real,
    ) -> Self {
        Self {
            sphere_transform_a: Isometry::translation(center_a.x, center_a.y, center_a.z),
            sphere_transform_b: Isometry::translation(center_b.x, center_b.y, center_b.z),
            radius_a,
            radius_b,
        }
    }

    /// The world-space center of the first sphere.
    #[inline]
    pub fn center_a(&self) -> Point<Real> {
        self.sphere_transform_a.translation.vector.into()
    }

    /// The world-space center of the second sphere.
    #[inline]
    pub fn center_b(&self) -> Point<Real> {
        self.sphere_transform_b.translation.vector.into()
    }
}

/// Signed distance between two spheres, computed in closed form.
///
/// This cannot fail. If both centers coincide, the normal is the `x` axis. The distance
/// always uses the actual distance between the centers, however small.
#[inline]
pub fn distance_info_ball_ball(desc: &SphereSphereCollisionDescription) -> DistanceInfo {
    let center_a = desc.center_a();
    let center_b = desc.center_b();
    let diff = center_a - center_b;

    let len = diff.norm();
    let normal = Unit::try_new(diff, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);

    DistanceInfo {
        point_on_a: center_a - *normal * desc.radius_a,
        point_on_b: center_b + *normal * desc.radius_b,
        normal_b_to_a: normal,
        distance: len - (desc.radius_a + desc.radius_b),
    }
}

/// Signed distance between two spheres, computed with the iterative algorithms of `strategy`.
///
/// The spheres are modeled the way a physics engine would:
/// - with [`GjkStrategy::GjkEpa`] and [`GjkStrategy::GjkMpr`], as [`Ball`]s, i.e., a point
///   inflated by a margin equal to the radius;
/// - with [`GjkStrategy::GjkEpaUnmarginedRadius`], as single-sphere [`MultiSphere`]s
///   carrying their radius in their core geometry.
///
/// The sphere-sphere shortcut is never taken, so this is mostly useful to check the
/// iterative algorithms against [`distance_info_ball_ball`].
///
/// # Panics
/// If any radius is negative.
pub fn distance_info_ball_ball_gjk(
    desc: &SphereSphereCollisionDescription,
    strategy: GjkStrategy,
    options: &QueryOptions,
) -> QueryOutcome {
    assert!(
        desc.radius_a >= 0.0 && desc.radius_b >= 0.0,
        "Sphere radii must be non-negative."
    );

    let mut simplex = VoronoiSimplex::new();

    match strategy {
        GjkStrategy::GjkEpaUnmarginedRadius => {
            let sphere_a = MultiSphere::single(desc.radius_a).ok_or(QueryFailure::Unsupported)?;
            let sphere_b = MultiSphere::single(desc.radius_b).ok_or(QueryFailure::Unsupported)?;
            let a = SupportAdapter::from_support_map(&sphere_a, desc.sphere_transform_a);
            let b = SupportAdapter::from_support_map(&sphere_b, desc.sphere_transform_b);
            distance_info_support_map_support_map(&a, &b, strategy, &mut simplex, options)
        }
        GjkStrategy::GjkEpa | GjkStrategy::GjkMpr => {
            let ball_a = Ball::new(desc.radius_a);
            let ball_b = Ball::new(desc.radius_b);
            let a = SupportAdapter::from_support_map(&ball_a, desc.sphere_transform_a);
            let b = SupportAdapter::from_support_map(&ball_b, desc.sphere_transform_b);
            distance_info_support_map_support_map(&a, &b, strategy, &mut simplex, options)
        }
    }
}
