//! A falling-sand simulation core.
//!
//! Grains are deposited with a disc brush, fall under synthetic gravity, pile up and
//! slide off each other, and are rasterized into a packed-pixel bitmap every tick.
//! Everything a host needs lives behind [`GranularSimulator`].

pub mod physics;

pub use physics::fallingsand::brush::Brush;
pub use physics::fallingsand::simulator::{
    GranularSimulator, SandPhysics, SimulationError, SimulatorBuilder,
};
pub use physics::fallingsand::util::image::RawImage;
pub use physics::fallingsand::util::vectors::{NormalizedPoint, XyVector};
