//! Dispatch of distance queries between convex shapes.
//!
//! A query dispatcher receives two shapes wrapped into [`SupportAdapter`]s and a
//! [`GjkStrategy`], and decides which algorithms compute their signed distance:
//!
//! - if both shapes reduce to spheres, a closed-form solution is used whatever the strategy;
//! - otherwise, GJK runs first, and EPA or MPR computes the penetration if GJK finds the
//!   shapes to be overlapping.
//!
//! # Thread safety
//!
//! Dispatchers are `Send + Sync` and carry no mutable state: the only state of a query is its
//! [`VoronoiSimplex`], owned by the caller. A simplex can be recycled from one query to the
//! next, but must never be shared by two queries running at the same time.

use crate::query::gjk::VoronoiSimplex;
use crate::query::{GjkStrategy, QueryOutcome, SupportAdapter};

/// Dispatcher of distance queries between two convex shapes.
pub trait QueryDispatcher: Send + Sync {
    /// Computes the signed distance between two shapes, using `simplex` as the scratch
    /// state of GJK.
    ///
    /// The simplex is reset before being used.
    fn distance_info_with_simplex(
        &self,
        a: &SupportAdapter,
        b: &SupportAdapter,
        strategy: GjkStrategy,
        simplex: &mut VoronoiSimplex,
    ) -> QueryOutcome;

    /// Computes the signed distance between two shapes.
    fn distance_info(
        &self,
        a: &SupportAdapter,
        b: &SupportAdapter,
        strategy: GjkStrategy,
    ) -> QueryOutcome {
        self.distance_info_with_simplex(a, b, strategy, &mut VoronoiSimplex::new())
    }

    /// Computes the signed distance between two shapes, with a strategy given as its raw
    /// numeric value.
    ///
    /// Fails with [`QueryFailure::InvalidStrategy`](crate::query::QueryFailure::InvalidStrategy)
    /// before running any algorithm if `raw_strategy` does not name a [`GjkStrategy`].
    fn distance_info_raw(
        &self,
        a: &SupportAdapter,
        b: &SupportAdapter,
        raw_strategy: u32,
    ) -> QueryOutcome {
        let strategy = GjkStrategy::try_from(raw_strategy)?;
        self.distance_info(a, b, strategy)
    }
}
