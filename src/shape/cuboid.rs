//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The point of this cuboid closest to `pt`, in local-space.
    ///
    /// Points inside of the cuboid are projected onto themselves.
    pub fn clamp_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from(pt.coords.zip_map(&self.half_extents, |x, h| x.clamp(-h, h)))
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(
            dir.zip_map(
                &self.half_extents,
                |d, h| if d < 0.0 { -h } else { h },
            ),
        )
    }

    #[inline]
    fn local_center(&self) -> Point<Real> {
        Point::origin()
    }
}
