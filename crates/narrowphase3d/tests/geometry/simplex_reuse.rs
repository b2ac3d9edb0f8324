use approx::assert_relative_eq;
use narrowphase3d::math::{Isometry, Point, Vector};
use narrowphase3d::query::gjk::{self, CSOPoint, GJKResult, VoronoiSimplex};
use narrowphase3d::query::{
    DefaultQueryDispatcher, GjkStrategy, QueryDispatcher, QueryOptions, SupportAdapter,
};
use narrowphase3d::shape::Cuboid;

// Leaves `simplex` in the state of a query on two overlapping cuboids: a tetrahedron
// enclosing the origin.
fn fill_with_overlapping_query(cuboid: &Cuboid, simplex: &mut VoronoiSimplex) {
    simplex.reset();

    for dir in [
        Vector::new(1.0, 1.0, 1.0),
        Vector::new(-1.0, -1.0, 1.0),
        Vector::new(-1.0, 1.0, -1.0),
        Vector::new(1.0, -1.0, -1.0),
    ] {
        let pt = CSOPoint::from_shapes(&Isometry::identity(), cuboid, cuboid, &dir);
        assert!(simplex.add_point(pt));
    }

    assert_eq!(simplex.project_origin_and_reduce(), Point::origin());
    assert!(simplex.contains_origin());
}

#[test]
fn stale_simplex_gives_wrong_results() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let pos12 = Isometry::translation(5.0, 0.0, 0.0);
    let options = QueryOptions::default();
    let mut simplex = VoronoiSimplex::new();

    // Without reset, the leftover tetrahedron makes GJK believe the shapes intersect.
    fill_with_overlapping_query(&cuboid, &mut simplex);
    let stale = gjk::closest_points(&pos12, &cuboid, &cuboid, &mut simplex, &options);
    assert_eq!(stale, GJKResult::Intersection);

    // After a reset, the same simplex gives the actual distance.
    fill_with_overlapping_query(&cuboid, &mut simplex);
    simplex.reset();
    match gjk::closest_points(&pos12, &cuboid, &cuboid, &mut simplex, &options) {
        GJKResult::ClosestPoints(p1, p2, n) => {
            assert_relative_eq!((p2 - p1).dot(&n), 3.0, epsilon = 1.0e-5);
        }
        res => panic!("Unexpected GJK result: {:?}", res),
    }
}

#[test]
fn dispatcher_resets_pooled_simplices() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let dispatcher = DefaultQueryDispatcher::default();
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&cuboid, Isometry::translation(5.0, 0.0, 0.0)).unwrap();
    let mut simplex = VoronoiSimplex::new();

    fill_with_overlapping_query(&cuboid, &mut simplex);
    let pooled = dispatcher
        .distance_info_with_simplex(&a, &b, GjkStrategy::GjkEpa, &mut simplex)
        .unwrap();
    let fresh = dispatcher
        .distance_info(&a, &b, GjkStrategy::GjkEpa)
        .unwrap();

    assert_eq!(pooled, fresh);
    assert_relative_eq!(fresh.distance, 3.0, epsilon = 1.0e-5);
}
