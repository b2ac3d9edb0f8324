use crate::math::Real;

/// Tuning parameters of the iterative distance and penetration algorithms.
///
/// The defaults are suitable for shapes with extents of the order of one unit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct QueryOptions {
    /// Maximum number of GJK iterations before giving up.
    pub gjk_max_iterations: usize,
    /// Maximum number of EPA iterations before giving up.
    pub epa_max_iterations: usize,
    /// Maximum number of MPR portal refinements before giving up.
    pub mpr_max_iterations: usize,
    /// Relative tolerance under which EPA considers a face of its polytope to be on the
    /// boundary of the Minkowski difference.
    pub epa_tolerance: Real,
    /// Absolute tolerance under which MPR considers its portal to have reached the boundary
    /// of the Minkowski difference.
    pub mpr_tolerance: Real,
    /// Use the closed-form solution when both shapes reduce to spheres.
    pub sphere_fast_path: bool,
    /// Run MPR when EPA fails to compute a penetration.
    pub epa_fallback_to_mpr: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            gjk_max_iterations: 100,
            epa_max_iterations: 255,
            mpr_max_iterations: 1000,
            epa_tolerance: na::ComplexField::sqrt(crate::query::gjk::eps_tol()),
            mpr_tolerance: 1.0e-4,
            sphere_fast_path: true,
            epa_fallback_to_mpr: true,
        }
    }
}

impl QueryOptions {
    /// Options disabling the sphere-sphere shortcut so the iterative algorithms always run.
    pub fn without_sphere_fast_path() -> Self {
        Self {
            sphere_fast_path: false,
            ..Self::default()
        }
    }
}
