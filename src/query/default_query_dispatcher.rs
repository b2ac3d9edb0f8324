use crate::query::details::{
    distance_info_ball_ball, distance_info_support_map_support_map,
    SphereSphereCollisionDescription,
};
use crate::query::gjk::VoronoiSimplex;
use crate::query::{GjkStrategy, QueryDispatcher, QueryOptions, QueryOutcome, SupportAdapter};

#[cfg(feature = "parallel")]
use {
    crate::math::{Isometry, Real},
    crate::shape::Shape,
    alloc::vec::Vec,
    rayon::prelude::*,
};

/// The query dispatcher used by default by this crate.
///
/// Pairs of shapes reducing to spheres are handled in closed form (unless disabled by
/// [`QueryOptions::sphere_fast_path`]). Every other pair is handed to the algorithms selected
/// by the [`GjkStrategy`]:
///
/// | Strategy                 | Separated | Overlapping                       |
/// |--------------------------|-----------|-----------------------------------|
/// | `GjkEpa`                 | GJK       | EPA, then MPR if EPA fails        |
/// | `GjkEpaUnmarginedRadius` | GJK       | EPA, then MPR if EPA fails        |
/// | `GjkMpr`                 | GJK       | MPR (also used if GJK fails)      |
///
/// The MPR fallback of the EPA strategies is controlled by
/// [`QueryOptions::epa_fallback_to_mpr`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DefaultQueryDispatcher {
    /// The tuning parameters of the algorithms.
    pub options: QueryOptions,
}

impl DefaultQueryDispatcher {
    /// Creates a dispatcher with the given tuning parameters.
    pub fn new(options: QueryOptions) -> Self {
        Self { options }
    }

    /// Computes the signed distance between every pair of shapes of `pairs`, in parallel.
    ///
    /// Each pair is given as `(position_a, shape_a, position_b, shape_b)`. Every worker thread
    /// owns one simplex, recycled from one pair to the next.
    #[cfg(feature = "parallel")]
    pub fn distance_infos_par(
        &self,
        pairs: &[(Isometry<Real>, &dyn Shape, Isometry<Real>, &dyn Shape)],
        strategy: GjkStrategy,
    ) -> Vec<QueryOutcome> {
        pairs
            .par_iter()
            .map_init(VoronoiSimplex::new, |simplex, (pos_a, shape_a, pos_b, shape_b)| {
                let a = SupportAdapter::new(*shape_a, *pos_a)?;
                let b = SupportAdapter::new(*shape_b, *pos_b)?;
                self.distance_info_with_simplex(&a, &b, strategy, simplex)
            })
            .collect()
    }
}

impl QueryDispatcher for DefaultQueryDispatcher {
    fn distance_info_with_simplex(
        &self,
        a: &SupportAdapter,
        b: &SupportAdapter,
        strategy: GjkStrategy,
        simplex: &mut VoronoiSimplex,
    ) -> QueryOutcome {
        simplex.reset();

        if self.options.sphere_fast_path {
            if let (Some(radius_a), Some(radius_b)) = (a.sphere_radius(), b.sphere_radius()) {
                let desc = SphereSphereCollisionDescription {
                    sphere_transform_a: *a.position(),
                    sphere_transform_b: *b.position(),
                    radius_a,
                    radius_b,
                };
                return Ok(distance_info_ball_ball(&desc));
            }
        }

        distance_info_support_map_support_map(a, b, strategy, simplex, &self.options)
    }
}
