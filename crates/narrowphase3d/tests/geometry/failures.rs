use approx::assert_relative_eq;
use narrowphase3d::math::{Isometry, Vector};
use narrowphase3d::query::{
    self, DefaultQueryDispatcher, EpaFailure, GjkStrategy, MprFailure, QueryDispatcher,
    QueryFailure, QueryOptions, SupportAdapter, Unsupported,
};
use narrowphase3d::shape::{Ball, Cuboid, HalfSpace};

#[test]
fn invalid_strategy_is_rejected() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&cuboid, Isometry::translation(0.5, 0.0, 0.0)).unwrap();
    let dispatcher = DefaultQueryDispatcher::default();

    for raw in [3, 4, 255, u32::MAX] {
        assert_eq!(
            dispatcher.distance_info_raw(&a, &b, raw),
            Err(QueryFailure::InvalidStrategy(raw))
        );
    }

    assert_eq!(
        GjkStrategy::try_from(7),
        Err(QueryFailure::InvalidStrategy(7))
    );
}

#[test]
fn shapes_without_support_map_are_rejected() {
    let half_space = HalfSpace::new(Vector::z_axis());
    let ball = Ball::new(1.0);

    assert_eq!(
        SupportAdapter::new(&half_space, Isometry::identity()).err(),
        Some(Unsupported)
    );
    assert_eq!(
        query::distance_info(
            &Isometry::identity(),
            &ball,
            &Isometry::identity(),
            &half_space,
            GjkStrategy::GjkEpa,
        ),
        Err(QueryFailure::Unsupported)
    );
}

#[test]
fn gjk_failure_is_reported() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&cuboid, Isometry::translation(3.0, 0.5, 0.0)).unwrap();
    let dispatcher = DefaultQueryDispatcher::new(QueryOptions {
        gjk_max_iterations: 1,
        ..QueryOptions::default()
    });

    // One GJK iteration only reaches a segment of the difference.
    for strategy in [GjkStrategy::GjkEpa, GjkStrategy::GjkEpaUnmarginedRadius] {
        assert_eq!(
            dispatcher.distance_info(&a, &b, strategy),
            Err(QueryFailure::GjkDidNotConverge)
        );
    }

    // MPR takes over and sees the shapes are apart.
    assert_eq!(
        dispatcher.distance_info(&a, &b, GjkStrategy::GjkMpr),
        Err(QueryFailure::Mpr(MprFailure::NoPenetration))
    );
}

#[test]
fn epa_failure_falls_back_to_mpr() {
    let ball = Ball::new(1.0);
    let a = SupportAdapter::new(&ball, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&ball, Isometry::translation(0.0, 0.0, 0.5)).unwrap();
    let dispatcher = DefaultQueryDispatcher::new(QueryOptions {
        epa_max_iterations: 1,
        sphere_fast_path: false,
        ..QueryOptions::default()
    });

    let info = dispatcher
        .distance_info(&a, &b, GjkStrategy::GjkEpa)
        .expect("MPR should recover from the EPA failure.");
    assert_relative_eq!(info.distance, -1.5, epsilon = 1.0e-2);
    assert_relative_eq!(*info.normal_b_to_a, -Vector::z(), epsilon = 1.0e-2);
}

#[test]
fn epa_failure_without_fallback() {
    let ball = Ball::new(1.0);
    let a = SupportAdapter::new(&ball, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&ball, Isometry::translation(0.0, 0.0, 0.5)).unwrap();
    let dispatcher = DefaultQueryDispatcher::new(QueryOptions {
        epa_max_iterations: 1,
        sphere_fast_path: false,
        epa_fallback_to_mpr: false,
        ..QueryOptions::default()
    });

    assert_eq!(
        dispatcher.distance_info(&a, &b, GjkStrategy::GjkEpa),
        Err(QueryFailure::Epa(EpaFailure::DidNotConverge))
    );
}

#[test]
fn failures_display_their_cause() {
    let err = QueryFailure::from(EpaFailure::TopologyError);
    assert_eq!(
        err.to_string(),
        "penetration depth computation failed: the expanding polytope became inconsistent"
    );
    assert_eq!(
        QueryFailure::from(MprFailure::NoPenetration),
        QueryFailure::Mpr(MprFailure::NoPenetration)
    );
    assert_eq!(QueryFailure::from(Unsupported), QueryFailure::Unsupported);
}
