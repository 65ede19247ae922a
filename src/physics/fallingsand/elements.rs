//! This module contains the materials that are simulated.
//! There is only one for now: sand.

pub mod sand;
