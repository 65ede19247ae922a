//! Utilities shared by every physics system.

pub mod clock;
