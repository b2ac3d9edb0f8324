//! Expanding Polytope Algorithm: penetration depth from a terminal GJK simplex.

pub use self::epa3::EPA;

pub mod epa3;
