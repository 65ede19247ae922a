//! Falling sand physics engine.
//! A single granular material on a rectangular grid, and the cellular automaton that
//! moves it.

pub mod brush;
pub mod data;
pub mod elements;
pub mod simulator;
pub mod util;
