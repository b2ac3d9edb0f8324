use crate::math::{Isometry, Point, Real, Vector};
use crate::query::epa::EPA;
use crate::query::gjk::{self, DilatedShape, GJKResult, VoronoiSimplex};
use crate::query::mpr::MPR;
use crate::query::{
    DistanceInfo, GjkStrategy, QueryFailure, QueryOptions, QueryOutcome, SupportAdapter,
};
use crate::shape::SupportMap;
use na::Unit;

type LocalPoints = (Point<Real>, Point<Real>, Unit<Vector<Real>>);

/// Signed distance between two support-mapped shapes, computed with the iterative
/// algorithms of `strategy`.
///
/// The simplex is reset before being used, so it can be recycled from any previous query.
/// It is left in the final state of GJK on return.
pub fn distance_info_support_map_support_map(
    a: &SupportAdapter,
    b: &SupportAdapter,
    strategy: GjkStrategy,
    simplex: &mut VoronoiSimplex,
    options: &QueryOptions,
) -> QueryOutcome {
    let pos12 = a.position().inv_mul(b.position());
    simplex.reset();

    match strategy {
        GjkStrategy::GjkEpa => {
            let g1 = DilatedShape::with_own_margin(a);
            let g2 = DilatedShape::with_own_margin(b);
            let (p1, p2, n) = gjk_epa(&pos12, &g1, &g2, simplex, options)?;
            Ok(DistanceInfo::from_local(a.position(), &p1, &p2, &n))
        }
        GjkStrategy::GjkEpaUnmarginedRadius => {
            let (p1, p2, n) = gjk_epa(&pos12, a, b, simplex, options)?;
            let p1 = p1 + *n * a.margin();
            let p2 = p2 - *n * b.margin();
            Ok(DistanceInfo::from_local(a.position(), &p1, &p2, &n))
        }
        GjkStrategy::GjkMpr => {
            let g1 = DilatedShape::with_own_margin(a);
            let g2 = DilatedShape::with_own_margin(b);
            let (p1, p2, n) = gjk_mpr(&pos12, &g1, &g2, simplex, options)?;
            Ok(DistanceInfo::from_local(a.position(), &p1, &p2, &n))
        }
    }
}

fn gjk_epa<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
    options: &QueryOptions,
) -> Result<LocalPoints, QueryFailure>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    match gjk::closest_points(pos12, g1, g2, simplex, options) {
        GJKResult::ClosestPoints(p1, p2, n) => Ok((p1, p2, n)),
        GJKResult::DidNotConverge => Err(QueryFailure::GjkDidNotConverge),
        GJKResult::Intersection => match EPA::new().closest_points(pos12, g1, g2, simplex, options)
        {
            Ok(res) => Ok(res),
            Err(err) if options.epa_fallback_to_mpr => {
                log::trace!("EPA failed ({err}), falling back to MPR.");
                mpr(pos12, g1, g2, options)
            }
            Err(err) => Err(err.into()),
        },
    }
}

fn gjk_mpr<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
    options: &QueryOptions,
) -> Result<LocalPoints, QueryFailure>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    match gjk::closest_points(pos12, g1, g2, simplex, options) {
        GJKResult::ClosestPoints(p1, p2, n) => Ok((p1, p2, n)),
        res => {
            log::trace!("GJK did not separate the shapes ({res:?}), running MPR.");
            mpr(pos12, g1, g2, options)
        }
    }
}

// The portal ray starts from the difference of the centers of both shapes.
fn mpr<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    options: &QueryOptions,
) -> Result<LocalPoints, QueryFailure>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let center1 = g1.local_center();
    let center2 = pos12 * g2.local_center();
    let pen = MPR::new().penetration(pos12, g1, g2, &center1, &center2, options)?;
    Ok((pen.point1, pen.point2, pen.normal))
}
