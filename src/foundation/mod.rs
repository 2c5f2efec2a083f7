//! Geometry, opacity constants, errors, fixed-point math and runtime options.

pub mod config;
pub mod core;
pub mod error;
pub mod math;
