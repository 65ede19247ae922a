//! Useful functions and structs for fallingsand calculations.

pub mod color;
pub mod grid;
pub mod image;
pub mod units;
pub mod vectors;
