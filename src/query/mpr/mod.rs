//! Minkowski Portal Refinement: penetration depth from an interior ray.

pub use self::mpr::{MprPenetration, MPR};

mod mpr;
