use crate::math::{Point, Real, Vector};

/// The vertex of `points` furthest along `dir`.
///
/// Ties are broken in favor of the vertex appearing first, so the result only depends on
/// the order of the cloud. Returns `None` if the cloud is empty.
#[inline]
pub fn point_cloud_support_point(dir: &Vector<Real>, points: &[Point<Real>]) -> Option<Point<Real>> {
    let (first, rest) = points.split_first()?;
    let mut best = (*first, first.coords.dot(dir));

    for pt in rest {
        let dot = pt.coords.dot(dir);

        if dot > best.1 {
            best = (*pt, dot);
        }
    }

    Some(best.0)
}
