//! Signed distance queries between convex shapes.
//!
//! # General case
//! The entry point of this module is [`distance_info()`]: it computes the signed distance between
//! two shapes, along with witness points and a contact normal, using the [`DefaultQueryDispatcher`].
//! The algorithms run when the shapes are not both spheres are selected by a [`GjkStrategy`].
//!
//! Finer control is available through [`SupportAdapter`]s (to override collision margins) and
//! through the [`QueryDispatcher`] trait (to recycle simplices between queries).
//!
//! # Specific cases
//! The functions exported by the `details` submodule are more specific versions of the ones
//! described above. For example `distance_info_ball_ball` computes the distance between two
//! spheres in closed form. The low-level algorithms themselves are exposed by the [`gjk`],
//! [`epa`] and [`mpr`] modules.

pub use self::default_query_dispatcher::DefaultQueryDispatcher;
pub use self::distance_info::{DistanceInfo, PenetrationDescription, QueryOutcome};
pub use self::error::{EpaFailure, MprFailure, QueryFailure, Unsupported};
pub use self::query_dispatcher::QueryDispatcher;
pub use self::query_options::QueryOptions;
pub use self::strategy::GjkStrategy;
pub use self::support_adapter::{SupportAdapter, SupportMode};

use crate::math::{Isometry, Real};
use crate::shape::Shape;

mod default_query_dispatcher;
mod distance_info;
pub mod epa;
mod error;
pub mod gjk;
pub mod mpr;
mod query_dispatcher;
mod query_options;
mod strategy;
mod support_adapter;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::distance_info::{
        distance_info_ball_ball, distance_info_ball_ball_gjk,
        distance_info_support_map_support_map, SphereSphereCollisionDescription,
    };
}

/// Computes the signed distance between two shapes.
///
/// Both shapes use their own collision margin. Fails if any of them has no support mapping.
pub fn distance_info(
    pos1: &Isometry<Real>,
    g1: &dyn Shape,
    pos2: &Isometry<Real>,
    g2: &dyn Shape,
    strategy: GjkStrategy,
) -> QueryOutcome {
    let a = SupportAdapter::new(g1, *pos1)?;
    let b = SupportAdapter::new(g2, *pos2)?;
    DefaultQueryDispatcher::default().distance_info(&a, &b, strategy)
}
