//! Penetration depth computation using Minkowski Portal Refinement.
//!
//! MPR starts from a point known to be inside of the Minkowski difference (the difference
//! of the centers of both shapes) and looks for a *portal*: a triangle of support points
//! crossed by the ray going from that interior point to the origin. The portal is then
//! pushed toward the boundary of the Minkowski difference until it cannot move any further.
//! The point of the final portal closest to the origin gives the penetration.

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::CSOPoint;
use crate::query::{MprFailure, QueryOptions};
use crate::shape::SupportMap;
use crate::utils::{self, OriginLocation};
#[cfg(not(feature = "std"))]
use na::ComplexField; // for .abs()
use na::Unit;

/// The result of a successful MPR penetration query.
///
/// Everything is expressed in the local-space of the first shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MprPenetration {
    /// The deepest point of the first shape inside of the second one.
    pub point1: Point<Real>,
    /// The deepest point of the second shape inside of the first one.
    pub point2: Point<Real>,
    /// The unit penetration direction, pointing from the first shape toward the second.
    pub normal: Unit<Vector<Real>>,
    /// The penetration depth. Always non-negative.
    pub depth: Real,
}

enum Portal {
    /// A valid portal has been found.
    Found,
    /// The origin coincides with the first support point.
    Touching,
    /// The origin lies on the segment joining the interior point and the first support point.
    OnSegment,
}

/// Minkowski Portal Refinement.
///
/// The portal vertices are kept after each query, `v0` being the interior point.
#[derive(Clone, Debug)]
pub struct MPR {
    portal: [CSOPoint; 4],
}

impl Default for MPR {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_zero(x: Real) -> bool {
    x.abs() <= DEFAULT_EPSILON
}

impl MPR {
    /// Creates a new MPR solver.
    pub fn new() -> Self {
        MPR {
            portal: [CSOPoint::origin(); 4],
        }
    }

    fn v(&self, i: usize) -> &Vector<Real> {
        &self.portal[i].point.coords
    }

    fn portal_normal(&self) -> Option<Unit<Vector<Real>>> {
        let n = (self.v(2) - self.v(1)).cross(&(self.v(3) - self.v(1)));
        Unit::try_new(n, DEFAULT_EPSILON)
    }

    fn side_normal(&self) -> Option<Unit<Vector<Real>>> {
        let n = (self.v(1) - self.v(0)).cross(&(self.v(2) - self.v(0)));
        Unit::try_new(n, DEFAULT_EPSILON)
    }

    /// Computes the penetration between two shapes.
    ///
    /// `center1` and `center2` must be points strictly inside of the first and second shape
    /// respectively, both expressed in the local-space of the first shape. The second shape
    /// is positioned by `pos12`. Only the cores of the shapes are considered, exactly like
    /// with [`gjk::closest_points`](crate::query::gjk::closest_points).
    pub fn penetration<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        center1: &Point<Real>,
        center2: &Point<Real>,
        options: &QueryOptions,
    ) -> Result<MprPenetration, MprFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        match self.discover_portal(pos12, g1, g2, center1, center2, options)? {
            Portal::Touching => {
                let v1 = self.portal[1];
                let normal = Unit::try_new(-self.v(0), DEFAULT_EPSILON)
                    .unwrap_or_else(Vector::x_axis);
                Ok(MprPenetration {
                    point1: v1.on_a,
                    point2: v1.on_b,
                    normal,
                    depth: 0.0,
                })
            }
            Portal::OnSegment => {
                let v1 = self.portal[1];
                let (normal, depth) = Unit::try_new_and_get(v1.point.coords, DEFAULT_EPSILON)
                    .unwrap_or_else(|| (Vector::x_axis(), 0.0));
                Ok(MprPenetration {
                    point1: v1.on_a,
                    point2: v1.on_b,
                    normal,
                    depth,
                })
            }
            Portal::Found => {
                self.refine_portal(pos12, g1, g2, options)?;
                self.find_penetration(pos12, g1, g2, options)
            }
        }
    }

    fn discover_portal<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        center1: &Point<Real>,
        center2: &Point<Real>,
        options: &QueryOptions,
    ) -> Result<Portal, MprFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.portal[0] = CSOPoint::new(*center1, *center2);

        if self.portal[0].point == Point::origin() {
            // Both centers coincide: the shapes intersect, but the portal needs a direction.
            self.portal[0].point.x += DEFAULT_EPSILON * 10.0;
        }

        let dir = Unit::new_normalize(-self.v(0));
        self.portal[1] = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);

        let dot = self.v(1).dot(&dir);
        if is_zero(dot) || dot < 0.0 {
            return Err(MprFailure::NoPenetration);
        }

        let dir = self.v(0).cross(self.v(1));
        let dir = match Unit::try_new(dir, DEFAULT_EPSILON) {
            Some(dir) => dir,
            None if self.v(1).norm_squared() <= DEFAULT_EPSILON * DEFAULT_EPSILON => {
                return Ok(Portal::Touching)
            }
            None => return Ok(Portal::OnSegment),
        };

        self.portal[2] = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);
        let dot = self.v(2).dot(&dir);
        if is_zero(dot) || dot < 0.0 {
            return Err(MprFailure::NoPenetration);
        }

        let mut dir = self.side_normal().ok_or_else(degenerate_portal)?;

        // Orient the portal so that its faces look away from the origin.
        if dir.dot(self.v(0)) > 0.0 {
            self.portal.swap(1, 2);
            dir = -dir;
        }

        for _ in 0..options.mpr_max_iterations {
            self.portal[3] = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);
            let dot = self.v(3).dot(&dir);
            if is_zero(dot) || dot < 0.0 {
                return Err(MprFailure::NoPenetration);
            }

            // Is the origin outside of (v1, v0, v3)?
            let dot = self.v(1).cross(self.v(3)).dot(self.v(0));
            if dot < 0.0 && !is_zero(dot) {
                self.portal[2] = self.portal[3];
                dir = self.side_normal().ok_or_else(degenerate_portal)?;
                continue;
            }

            // Is the origin outside of (v3, v0, v2)?
            let dot = self.v(3).cross(self.v(2)).dot(self.v(0));
            if dot < 0.0 && !is_zero(dot) {
                self.portal[1] = self.portal[3];
                dir = self.side_normal().ok_or_else(degenerate_portal)?;
                continue;
            }

            return Ok(Portal::Found);
        }

        Err(MprFailure::DidNotConverge)
    }

    fn refine_portal<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        options: &QueryOptions,
    ) -> Result<(), MprFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        for _ in 0..options.mpr_max_iterations {
            let dir = self.portal_normal().ok_or_else(degenerate_portal)?;

            // The origin is behind the portal.
            let dot = dir.dot(self.v(1));
            if is_zero(dot) || dot > 0.0 {
                return Ok(());
            }

            let v4 = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);
            let dot = v4.point.coords.dot(&dir);
            let can_enclose_origin = is_zero(dot) || dot > 0.0;

            if !can_enclose_origin || self.reached_tolerance(&v4, &dir, options) {
                return Err(MprFailure::NoPenetration);
            }

            self.expand_portal(v4);
        }

        Err(MprFailure::DidNotConverge)
    }

    fn find_penetration<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        options: &QueryOptions,
    ) -> Result<MprPenetration, MprFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        for _ in 0..options.mpr_max_iterations {
            let dir = self.portal_normal().ok_or_else(degenerate_portal)?;
            let v4 = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);

            if self.reached_tolerance(&v4, &dir, options) {
                return Ok(self.penetration_on_portal(dir));
            }

            self.expand_portal(v4);
        }

        log::debug!(
            "MPR reached its iteration limit ({}).",
            options.mpr_max_iterations
        );
        Err(MprFailure::DidNotConverge)
    }

    fn penetration_on_portal(&self, portal_dir: Unit<Vector<Real>>) -> MprPenetration {
        let (proj, loc) = utils::project_origin_on_triangle(
            &self.portal[1].point,
            &self.portal[2].point,
            &self.portal[3].point,
        );

        let mut bcoords = [0.0; 3];
        match loc {
            OriginLocation::OnVertex(i) => bcoords[i] = 1.0,
            OriginLocation::OnEdge(ids, coords) => {
                bcoords[ids[0]] = coords[0];
                bcoords[ids[1]] = coords[1];
            }
            OriginLocation::OnFace(_, coords) => bcoords = coords,
            OriginLocation::OnSolid => bcoords = [1.0 / 3.0; 3],
        }

        let (point1, point2) =
            CSOPoint::witnesses(self.portal[1..].iter().zip(bcoords.iter().copied()));

        // The origin lies on the portal: fall back to the portal normal.
        let (normal, depth) = Unit::try_new_and_get(proj.coords, DEFAULT_EPSILON)
            .unwrap_or((portal_dir, 0.0));

        MprPenetration {
            point1,
            point2,
            normal,
            depth,
        }
    }

    fn reached_tolerance(
        &self,
        v4: &CSOPoint,
        dir: &Unit<Vector<Real>>,
        options: &QueryOptions,
    ) -> bool {
        let dv4 = v4.point.coords.dot(dir);
        let gap = (1..4)
            .map(|i| dv4 - self.v(i).dot(dir))
            .fold(Real::MAX, Real::min);

        gap <= options.mpr_tolerance
    }

    /// Replaces one of the portal vertices by `v4` so that the portal is still crossed by the
    /// ray from `v0` to the origin.
    fn expand_portal(&mut self, v4: CSOPoint) {
        let v4v0 = v4.point.coords.cross(self.v(0));

        if self.v(1).dot(&v4v0) > 0.0 {
            if self.v(2).dot(&v4v0) > 0.0 {
                self.portal[1] = v4;
            } else {
                self.portal[3] = v4;
            }
        } else if self.v(3).dot(&v4v0) > 0.0 {
            self.portal[2] = v4;
        } else {
            self.portal[1] = v4;
        }
    }
}

fn degenerate_portal() -> MprFailure {
    log::debug!("Hit unexpected state in MPR: degenerate portal.");
    MprFailure::DidNotConverge
}
