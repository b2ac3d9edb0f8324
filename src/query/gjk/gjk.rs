//! The Gilbert-Johnson-Keerthi distance algorithm.
//!
//! GJK operates on the Minkowski difference (also called Configuration Space Obstacle, or
//! CSO) of two convex shapes. It builds a simplex inside of the CSO and iteratively refines
//! it toward the point of the CSO closest to the origin:
//!
//! - if the origin is outside of the CSO, the distance between the origin and that point is
//!   the distance between both shapes, and the simplex vertices give the closest points;
//! - if the origin is inside of (or on) the CSO, the shapes intersect and the final simplex
//!   is handed to a penetration solver (EPA or MPR).
//!
//! All the functions of this module work in the local-space of the first shape: the second
//! shape is positioned relative to the first one by `pos12`.

use na::{ComplexField, Unit};

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON, DIM};
use crate::query::gjk::{CSOPoint, ConstantOrigin, VoronoiSimplex};
use crate::query::QueryOptions;
use crate::shape::SupportMap;

use num::Bounded;

/// Results of the GJK algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// Result of the GJK algorithm when the origin is inside of the polytope.
    Intersection,
    /// Result of the GJK algorithm when a projection of the origin on the polytope is found.
    ///
    /// Both points and vector are expressed in the local-space of the first geometry involved
    /// in the GJK execution. The vector is the unit direction pointing from the first
    /// shape toward the second one.
    ClosestPoints(Point<Real>, Point<Real>, Unit<Vector<Real>>),
    /// The iteration limit was reached before convergence.
    DidNotConverge,
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = DEFAULT_EPSILON;
    _eps * 10.0
}

/// Resets `simplex` and initializes it with a single support point of the CSO of `g1`
/// and `g2`.
///
/// The initial direction is the one joining the local origins of both shapes, or the `x`
/// axis if they coincide.
pub fn seed_simplex<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
) where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let dir = Unit::try_new(pos12.translation.vector, DEFAULT_EPSILON)
        .unwrap_or_else(Vector::x_axis);

    simplex.reset();
    let _ = simplex.add_point(CSOPoint::from_shapes_toward(pos12, g1, g2, &dir));
}

/// Projects the origin on the core of the shape `g` transformed by `m`.
///
/// Returns `None` if the origin lies inside of the shape, or if GJK did not converge.
/// The simplex is reset before being used.
pub fn project_origin<G: ?Sized + SupportMap>(
    m: &Isometry<Real>,
    g: &G,
    simplex: &mut VoronoiSimplex,
) -> Option<Point<Real>> {
    let pos12 = m.inverse();
    seed_simplex(&pos12, g, &ConstantOrigin, simplex);

    match closest_points(&pos12, g, &ConstantOrigin, simplex, &QueryOptions::default()) {
        GJKResult::ClosestPoints(p, _, _) => Some(m * p),
        GJKResult::Intersection | GJKResult::DidNotConverge => None,
    }
}

/// Computes the closest points between the cores of two shapes using the GJK algorithm.
///
/// The margins of `g1` and `g2` are ignored: wrap the shapes into a
/// [`DilatedShape`](crate::query::gjk::DilatedShape) to include them.
///
/// The simplex is used as-is, so that it can be warm-started by the caller. If it is empty,
/// it is seeded with [`seed_simplex`] first. Passing a simplex left over from a query
/// involving other shapes or other positions gives meaningless results: call
/// [`VoronoiSimplex::reset`] or [`seed_simplex`] beforehand.
///
/// # Parameters
/// - `pos12`: the position of the second shape relative to the first one.
/// - `g1`, `g2`: the shapes.
/// - `simplex`: the simplex to refine. It is left in its final state so that a penetration
///   solver can start from it when an intersection is reported.
/// - `options`: the iteration limit is read from `options.gjk_max_iterations`.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
    options: &QueryOptions,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = ComplexField::sqrt(_eps_tol);

    if simplex.is_empty() {
        seed_simplex(pos12, g1, g2, simplex);
    }

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GJKResult::Intersection;
    }

    let mut max_bound = Real::max_value();
    let mut dir;
    let mut niter = 0;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GJKResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bound inconsistencies: the previous simplex was better.
            let (p1, p2) = simplex.prev_witness_points();
            return GJKResult::ClosestPoints(p1, p2, old_dir);
        }

        let cso_point = CSOPoint::from_shapes(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        assert!(
            min_bound.is_finite(),
            "A support mapping returned a non-finite point."
        );

        if max_bound - min_bound <= _eps_rel * max_bound {
            // The distance found has a good enough precision.
            let (p1, p2) = simplex.witness_points();
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        if !simplex.add_point(cso_point) {
            let (p1, p2) = simplex.witness_points();
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                let (p1, p2) = simplex.prev_witness_points();
                return GJKResult::ClosestPoints(p1, p2, old_dir);
            } else {
                return GJKResult::Intersection; // Point inside of the cso.
            }
        }

        niter += 1;

        if niter >= options.gjk_max_iterations {
            log::debug!("GJK reached its iteration limit ({niter}).");
            return GJKResult::DidNotConverge;
        }
    }
}
