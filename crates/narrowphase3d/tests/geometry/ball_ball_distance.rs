use approx::assert_relative_eq;
use narrowphase3d::math::{Isometry, Point, Real, Vector};
use narrowphase3d::query::details::{
    distance_info_ball_ball, distance_info_ball_ball_gjk, SphereSphereCollisionDescription,
};
use narrowphase3d::query::{
    DefaultQueryDispatcher, GjkStrategy, QueryDispatcher, QueryOptions, SupportAdapter,
};
use narrowphase3d::shape::Ball;
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn random_point(rng: &mut IsaacRng) -> Point<Real> {
    Point::new(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

#[test]
fn ball_ball_matches_closed_form() {
    let mut rng = IsaacRng::seed_from_u64(0);

    for _ in 0..1000 {
        let center_a = random_point(&mut rng);
        let center_b = random_point(&mut rng);
        let radius_a = rng.gen_range(0.0..5.0);
        let radius_b = rng.gen_range(0.0..5.0);

        let desc = SphereSphereCollisionDescription::new(&center_a, radius_a, &center_b, radius_b);
        let info = distance_info_ball_ball(&desc);
        let expected = (center_a - center_b).norm() - (radius_a + radius_b);

        assert_relative_eq!(info.distance, expected, epsilon = 1.0e-4);
        assert_relative_eq!(info.normal_b_to_a.norm(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(
            info.point_on_a,
            center_a - *info.normal_b_to_a * radius_a,
            epsilon = 1.0e-4
        );
        assert_relative_eq!(
            info.point_on_b,
            center_b + *info.normal_b_to_a * radius_b,
            epsilon = 1.0e-4
        );
        assert_relative_eq!((info.point_on_a - center_a).norm(), radius_a, epsilon = 1.0e-4);
        assert_relative_eq!((info.point_on_b - center_b).norm(), radius_b, epsilon = 1.0e-4);
    }
}

#[test]
fn ball_ball_is_symmetric() {
    let mut rng = IsaacRng::seed_from_u64(1);

    for _ in 0..1000 {
        let center_a = random_point(&mut rng);
        let center_b = random_point(&mut rng);
        let radius_a = rng.gen_range(0.0..5.0);
        let radius_b = rng.gen_range(0.0..5.0);

        let ab = distance_info_ball_ball(&SphereSphereCollisionDescription::new(
            &center_a, radius_a, &center_b, radius_b,
        ));
        let ba = distance_info_ball_ball(&SphereSphereCollisionDescription::new(
            &center_b, radius_b, &center_a, radius_a,
        ))
        .flipped();

        assert_relative_eq!(ab.distance, ba.distance, epsilon = 1.0e-5);
        assert_relative_eq!(*ab.normal_b_to_a, *ba.normal_b_to_a, epsilon = 1.0e-5);
        assert_relative_eq!(ab.point_on_a, ba.point_on_a, epsilon = 1.0e-4);
        assert_relative_eq!(ab.point_on_b, ba.point_on_b, epsilon = 1.0e-4);
    }
}

#[test]
fn coincident_balls_are_deterministic() {
    let ball_a = Ball::new(1.0);
    let ball_b = Ball::new(0.25);
    let pos = Isometry::translation(1.0, -2.0, 3.0);
    let a = SupportAdapter::new(&ball_a, pos).unwrap();
    let b = SupportAdapter::new(&ball_b, pos).unwrap();
    let dispatcher = DefaultQueryDispatcher::default();

    let first = dispatcher
        .distance_info(&a, &b, GjkStrategy::GjkEpa)
        .unwrap();
    assert_eq!(first.distance, -1.25);
    assert_eq!(first.normal_b_to_a, Vector::x_axis());

    for _ in 0..10 {
        let again = dispatcher
            .distance_info(&a, &b, GjkStrategy::GjkEpa)
            .unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn deeply_overlapping_balls_with_every_strategy() {
    let desc = SphereSphereCollisionDescription::new(
        &Point::new(0.0, 0.0, 0.0),
        1.0,
        &Point::new(0.0, 0.5, 0.0),
        1.0,
    );
    let options = QueryOptions::without_sphere_fast_path();
    let exact = distance_info_ball_ball(&desc);
    assert_relative_eq!(exact.distance, -1.5);

    for strategy in [
        GjkStrategy::GjkEpa,
        GjkStrategy::GjkEpaUnmarginedRadius,
        GjkStrategy::GjkMpr,
    ] {
        let info = distance_info_ball_ball_gjk(&desc, strategy, &options).unwrap();
        assert_relative_eq!(info.distance, -1.5, epsilon = 1.0e-2);
        assert_relative_eq!(*info.normal_b_to_a, -Vector::y(), epsilon = 5.0e-2);
    }
}

#[test]
fn unmargined_radius_is_exact_on_point_cores() {
    let ball = Ball::new(1.0);
    let dispatcher = DefaultQueryDispatcher::new(QueryOptions::without_sphere_fast_path());
    let a = SupportAdapter::new(&ball, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&ball, Isometry::translation(0.5, 0.0, 0.0)).unwrap();

    let info = dispatcher
        .distance_info(&a, &b, GjkStrategy::GjkEpaUnmarginedRadius)
        .unwrap();
    assert_relative_eq!(info.distance, -1.5, epsilon = 1.0e-5);
    assert_relative_eq!(*info.normal_b_to_a, -Vector::x(), epsilon = 1.0e-5);
}

#[test]
fn separated_balls_gjk_matches_closed_form() {
    let mut rng = IsaacRng::seed_from_u64(2);
    let options = QueryOptions::without_sphere_fast_path();

    for _ in 0..100 {
        let center_a = random_point(&mut rng);
        let radius_a = rng.gen_range(0.1..2.0);
        let radius_b = rng.gen_range(0.1..2.0);
        let dir = random_point(&mut rng).coords.normalize();
        let gap = rng.gen_range(0.1..5.0);
        let center_b = center_a + dir * (radius_a + radius_b + gap);

        let desc = SphereSphereCollisionDescription::new(&center_a, radius_a, &center_b, radius_b);
        let exact = distance_info_ball_ball(&desc);

        for strategy in [GjkStrategy::GjkEpa, GjkStrategy::GjkMpr] {
            let info = distance_info_ball_ball_gjk(&desc, strategy, &options).unwrap();
            assert_relative_eq!(info.distance, exact.distance, epsilon = 1.0e-3);
            assert_relative_eq!(
                *info.normal_b_to_a,
                *exact.normal_b_to_a,
                epsilon = 1.0e-2
            );
        }
    }
}
