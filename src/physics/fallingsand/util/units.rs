#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
//! Physical quantities used by the sand physics, measured in grid cells and ticks.

use derive_more::{Add, AddAssign, From, Into, Sub, SubAssign};

/// The downward speed of a grain, in cells per tick.
#[derive(Default, Clone, Copy, Debug, PartialEq, PartialOrd, Add, Sub, AddAssign, SubAssign, From, Into)]
pub struct FallVelocity(pub f32);

/// How much a grain speeds up every tick, in cells per tick per tick.
#[derive(Default, Clone, Copy, Debug, PartialEq, PartialOrd, From, Into)]
pub struct Acceleration(pub f32);

impl FallVelocity {
    /// Not moving, also the value stored in empty cells.
    pub const ZERO: Self = Self(0.0);

    /// Speed up by one tick of acceleration, never exceeding the terminal velocity.
    pub fn accelerate(self, acceleration: Acceleration, terminal: FallVelocity) -> Self {
        Self((self.0 + acceleration.0).min(terminal.0))
    }

    /// How many whole cells this velocity covers in one tick.
    pub fn whole_cells(self) -> usize {
        // Velocities are never negative, the cast floors.
        self.0.max(0.0) as usize
    }

    /// Finite and not negative.
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}
