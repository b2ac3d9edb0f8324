use approx::assert_relative_eq;
use narrowphase3d::math::{Isometry, Real, Vector};
use narrowphase3d::query::gjk::{self, DilatedShape, GJKResult, VoronoiSimplex};
use narrowphase3d::query::{
    DefaultQueryDispatcher, GjkStrategy, QueryDispatcher, QueryOptions, SupportAdapter,
};
use narrowphase3d::shape::{Capsule, Cuboid, RoundShape};
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn random_isometry(rng: &mut IsaacRng, extent: Real) -> Isometry<Real> {
    Isometry::new(
        Vector::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        ),
        Vector::new(
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
        ),
    )
}

#[test]
fn gjk_mpr_returns_the_gjk_result_when_separated() {
    let mut rng = IsaacRng::seed_from_u64(3);
    let capsule = Capsule::new_y(1.0, 0.3);
    let cuboid = RoundShape {
        inner_shape: Cuboid::new(Vector::new(0.5, 1.0, 1.5)),
        border_radius: 0.1,
    };
    let dispatcher = DefaultQueryDispatcher::default();
    let mut separated = 0;

    for _ in 0..300 {
        let a = SupportAdapter::new(&capsule, random_isometry(&mut rng, 5.0)).unwrap();
        let b = SupportAdapter::new(&cuboid, random_isometry(&mut rng, 5.0)).unwrap();

        let pos12 = a.position().inv_mul(b.position());
        let g1 = DilatedShape::with_own_margin(&a);
        let g2 = DilatedShape::with_own_margin(&b);
        let mut simplex = VoronoiSimplex::new();

        if let GJKResult::ClosestPoints(..) = gjk::closest_points(
            &pos12,
            &g1,
            &g2,
            &mut simplex,
            &QueryOptions::default(),
        ) {
            let epa = dispatcher
                .distance_info(&a, &b, GjkStrategy::GjkEpa)
                .unwrap();
            let mpr = dispatcher
                .distance_info(&a, &b, GjkStrategy::GjkMpr)
                .unwrap();
            assert_eq!(mpr, epa);
            assert!(mpr.distance >= -1.0e-5);
            separated += 1;
        }
    }

    assert!(separated > 0);
}

#[test]
fn repeated_queries_are_identical() {
    let mut rng = IsaacRng::seed_from_u64(4);
    let capsule = Capsule::new_x(0.5, 0.5);
    let cuboid = Cuboid::new(Vector::new(1.0, 0.5, 2.0));
    let dispatcher = DefaultQueryDispatcher::default();

    for _ in 0..200 {
        let a = SupportAdapter::new(&capsule, random_isometry(&mut rng, 2.0)).unwrap();
        let b = SupportAdapter::new(&cuboid, random_isometry(&mut rng, 2.0)).unwrap();

        for strategy in [
            GjkStrategy::GjkEpa,
            GjkStrategy::GjkEpaUnmarginedRadius,
            GjkStrategy::GjkMpr,
        ] {
            let first = dispatcher.distance_info(&a, &b, strategy);
            let second = dispatcher.distance_info(&a, &b, strategy);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn penetration_agrees_across_strategies() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let dispatcher = DefaultQueryDispatcher::default();
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&cuboid, Isometry::translation(0.0, 0.0, 1.75)).unwrap();

    for strategy in [
        GjkStrategy::GjkEpa,
        GjkStrategy::GjkEpaUnmarginedRadius,
        GjkStrategy::GjkMpr,
    ] {
        let info = dispatcher.distance_info(&a, &b, strategy).unwrap();
        assert_relative_eq!(info.distance, -0.25, epsilon = 1.0e-3);
        assert_relative_eq!(*info.normal_b_to_a, -Vector::z(), epsilon = 1.0e-3);
        assert!(info.is_penetrating());
    }
}

#[test]
fn normal_is_stable_under_small_perturbations() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let dispatcher = DefaultQueryDispatcher::default();
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let reference = SupportAdapter::new(&cuboid, Isometry::translation(1.8, 0.1, 0.0)).unwrap();
    let perturbed =
        SupportAdapter::new(&cuboid, Isometry::translation(1.8001, 0.1001, 0.0001)).unwrap();

    for strategy in [GjkStrategy::GjkEpa, GjkStrategy::GjkMpr] {
        let n1 = dispatcher
            .distance_info(&a, &reference, strategy)
            .unwrap()
            .normal_b_to_a;
        let n2 = dispatcher
            .distance_info(&a, &perturbed, strategy)
            .unwrap()
            .normal_b_to_a;
        assert!(n1.dot(&n2) > 0.99);
    }
}

#[test]
fn adapter_margins_inflate_the_distance() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let dispatcher = DefaultQueryDispatcher::default();
    let a = SupportAdapter::new(&cuboid, Isometry::identity())
        .unwrap()
        .with_margin(0.1);
    let b = SupportAdapter::new(&cuboid, Isometry::translation(3.0, 0.0, 0.0))
        .unwrap()
        .with_margin(0.2);

    for strategy in [
        GjkStrategy::GjkEpa,
        GjkStrategy::GjkEpaUnmarginedRadius,
        GjkStrategy::GjkMpr,
    ] {
        let info = dispatcher.distance_info(&a, &b, strategy).unwrap();
        assert_relative_eq!(info.distance, 0.7, epsilon = 1.0e-4);
        assert_relative_eq!(info.point_on_a.x, 1.1, epsilon = 1.0e-4);
        assert_relative_eq!(info.point_on_b.x, 1.8, epsilon = 1.0e-4);
    }
}
