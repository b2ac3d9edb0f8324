/*!
narrowphase
===========

**narrowphase** computes the distance between two convex shapes when they are
separated, and their penetration depth and direction when they overlap.

It combines the GJK distance algorithm, the Expanding Polytope Algorithm (EPA)
and Minkowski Portal Refinement (MPR) behind a single query dispatcher working
on shape-agnostic support mappings.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
