use approx::assert_relative_eq;
use narrowphase3d::math::{Isometry, Point, Real, Vector};
use narrowphase3d::na;
use narrowphase3d::query::details::distance_info_support_map_support_map;
use narrowphase3d::query::gjk::VoronoiSimplex;
use narrowphase3d::query::{
    DefaultQueryDispatcher, GjkStrategy, QueryDispatcher, QueryOptions, SupportAdapter,
};
use narrowphase3d::shape::{Capsule, ConvexPointCloud, Cuboid};
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

#[test]
#[allow(non_snake_case)]
fn cuboid_cuboid_EPA() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let a = SupportAdapter::new(&c, Isometry::translation(3.5, 0.0, 0.0)).unwrap();
    let b = SupportAdapter::new(&c, Isometry::identity()).unwrap();
    let options = QueryOptions {
        epa_fallback_to_mpr: false,
        ..QueryOptions::default()
    };

    let res = distance_info_support_map_support_map(
        &a,
        &b,
        GjkStrategy::GjkEpa,
        &mut VoronoiSimplex::new(),
        &options,
    )
    .expect("Penetration not found.");
    assert_relative_eq!(res.distance, -0.5, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal_b_to_a, Vector::x(), epsilon = 1.0e-5);

    let a = SupportAdapter::new(&c, Isometry::translation(0.0, 0.2, 0.0)).unwrap();
    let res = distance_info_support_map_support_map(
        &a,
        &b,
        GjkStrategy::GjkEpa,
        &mut VoronoiSimplex::new(),
        &options,
    )
    .expect("Penetration not found.");
    assert_relative_eq!(res.distance, -1.8, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal_b_to_a, Vector::y(), epsilon = 1.0e-5);
}

#[test]
fn rotated_point_cloud_penetration() {
    let tetrahedron = ConvexPointCloud::new(vec![
        [1.0, 1.0, 1.0].into(),
        [-1.0, -1.0, 1.0].into(),
        [-1.0, 1.0, -1.0].into(),
        [1.0, -1.0, -1.0].into(),
    ])
    .unwrap();
    let cuboid = Cuboid::new(Vector::new(10.0, 10.0, 0.5));
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&tetrahedron, Isometry::translation(0.0, 0.0, 1.3)).unwrap();

    for strategy in [GjkStrategy::GjkEpa, GjkStrategy::GjkMpr] {
        let res = distance_info_support_map_support_map(
            &a,
            &b,
            strategy,
            &mut VoronoiSimplex::new(),
            &QueryOptions::default(),
        )
        .unwrap();

        // The lowest edge of the tetrahedron dips 0.2 below the top face of the cuboid.
        assert_relative_eq!(res.distance, -0.2, epsilon = 1.0e-4);
        assert_relative_eq!(*res.normal_b_to_a, -Vector::z(), epsilon = 1.0e-4);
    }
}

fn unit_cube_cloud(offset: Vector<Real>) -> ConvexPointCloud {
    let mut corners = Vec::new();
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Point::new(x, y, z) + offset);
            }
        }
    }
    ConvexPointCloud::new(corners).unwrap()
}

#[test]
fn cuboids_overlapping_along_a_random_axis() {
    let mut rng = IsaacRng::seed_from_u64(7);
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let options = QueryOptions {
        epa_fallback_to_mpr: false,
        ..QueryOptions::default()
    };
    let mut simplex = VoronoiSimplex::new();

    for _ in 0..100 {
        let base = Vector::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let axis = Vector::ith(rng.gen_range(0..3), sign);
        let t: Real = rng.gen_range(0.05..1.95);

        let a = SupportAdapter::new(&cuboid, Isometry::new(base, na::zero())).unwrap();
        let b = SupportAdapter::new(&cuboid, Isometry::new(base + axis * t, na::zero())).unwrap();

        let res = distance_info_support_map_support_map(
            &a,
            &b,
            GjkStrategy::GjkEpa,
            &mut simplex,
            &options,
        )
        .unwrap();
        assert_relative_eq!(res.distance, t - 2.0, epsilon = 1.0e-3);
        assert_relative_eq!(*res.normal_b_to_a, -axis, epsilon = 1.0e-3);
    }
}

#[test]
fn point_cloud_with_a_distant_origin() {
    let offset = Vector::new(0.0, 10.0, 0.0);
    let cloud = unit_cube_cloud(offset);
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let a = SupportAdapter::new(&cuboid, Isometry::identity()).unwrap();
    // Both `b` and `centered` cover the same cube, centered at `(0, 1.5, 0)`.
    let b = SupportAdapter::new(&cloud, Isometry::translation(0.0, -8.5, 0.0)).unwrap();
    let centered = SupportAdapter::new(&cuboid, Isometry::translation(0.0, 1.5, 0.0)).unwrap();
    let mut simplex = VoronoiSimplex::new();

    for strategy in [GjkStrategy::GjkEpa, GjkStrategy::GjkMpr] {
        let options = QueryOptions::default();
        let res = distance_info_support_map_support_map(&a, &b, strategy, &mut simplex, &options)
            .unwrap();
        let expected = distance_info_support_map_support_map(
            &a,
            &centered,
            strategy,
            &mut simplex,
            &options,
        )
        .unwrap();

        assert_relative_eq!(res.distance, -0.5, epsilon = 1.0e-3);
        assert_relative_eq!(*res.normal_b_to_a, -Vector::y(), epsilon = 1.0e-3);
        assert_relative_eq!(res.distance, expected.distance, epsilon = 1.0e-3);
        assert_relative_eq!(
            *res.normal_b_to_a,
            *expected.normal_b_to_a,
            epsilon = 1.0e-3
        );
    }
}

#[test]
fn parallel_capsules_penetration() {
    let mut rng = IsaacRng::seed_from_u64(11);
    let capsule = Capsule::new_x(1.0, 0.5);
    let a = SupportAdapter::new(&capsule, Isometry::identity()).unwrap();
    let dispatcher = DefaultQueryDispatcher::default();

    for _ in 0..20 {
        let shift: Real = rng.gen_range(-0.5..0.5);
        let s: Real = rng.gen_range(0.1..0.9);
        let b = SupportAdapter::new(&capsule, Isometry::translation(shift, s, 0.0)).unwrap();

        let res = dispatcher.distance_info(&a, &b, GjkStrategy::GjkEpa).unwrap();
        assert_relative_eq!(res.distance, s - 1.0, epsilon = 5.0e-3);
        assert_relative_eq!(*res.normal_b_to_a, -Vector::y(), epsilon = 5.0e-2);
    }
}

#[test]
fn collinear_capsules_penetration() {
    let capsule = Capsule::new_y(1.0, 0.5);
    let a = SupportAdapter::new(&capsule, Isometry::identity()).unwrap();
    let b = SupportAdapter::new(&capsule, Isometry::translation(0.0, 0.5, 0.0)).unwrap();
    let dispatcher = DefaultQueryDispatcher::default();

    // The segments overlap, so only the radii separate the cores.
    let res = dispatcher
        .distance_info(&a, &b, GjkStrategy::GjkEpaUnmarginedRadius)
        .unwrap();
    assert_relative_eq!(res.distance, -1.0, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal_b_to_a, -Vector::x(), epsilon = 1.0e-5);

    let res = dispatcher.distance_info(&a, &b, GjkStrategy::GjkEpa).unwrap();
    assert_relative_eq!(res.distance, -1.0, epsilon = 5.0e-3);
    assert_relative_eq!(res.normal_b_to_a.y, 0.0, epsilon = 5.0e-2);
}
