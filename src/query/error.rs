use thiserror::Error;

/// Error indicating that a shape lacks the support mapping required by the distance queries.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("query not supported between these shapes")]
pub struct Unsupported;

/// Reasons for which the Expanding Polytope Algorithm can fail.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum EpaFailure {
    /// The initial simplex could not be grown into a polytope with a non-zero volume.
    #[error("the initial simplex is degenerate")]
    DegenerateSimplex,
    /// The initial polytope does not enclose the origin.
    #[error("the initial polytope does not enclose the origin")]
    OriginNotEnclosed,
    /// The polytope became topologically inconsistent because of numerical errors.
    #[error("the expanding polytope became inconsistent")]
    TopologyError,
    /// The iteration limit was reached.
    #[error("EPA did not converge")]
    DidNotConverge,
}

/// Reasons for which Minkowski Portal Refinement can fail.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MprFailure {
    /// The shapes are not penetrating.
    #[error("the shapes are not penetrating")]
    NoPenetration,
    /// The iteration limit was reached.
    #[error("MPR did not converge")]
    DidNotConverge,
}

/// Error returned by a distance query.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum QueryFailure {
    /// GJK reached its iteration limit.
    #[error("GJK did not converge")]
    GjkDidNotConverge,
    /// EPA failed to compute a penetration.
    #[error("penetration depth computation failed: {0}")]
    Epa(#[from] EpaFailure),
    /// MPR failed to compute a penetration.
    #[error("portal refinement failed: {0}")]
    Mpr(#[from] MprFailure),
    /// The raw strategy selector does not name a known strategy.
    #[error("invalid strategy selector: {0}")]
    InvalidStrategy(u32),
    /// One of the shapes has no support mapping.
    #[error("one of the shapes has no support mapping")]
    Unsupported,
}

impl From<Unsupported> for QueryFailure {
    fn from(_: Unsupported) -> Self {
        QueryFailure::Unsupported
    }
}
