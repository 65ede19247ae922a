//! Sand: falls, gains speed, loses it on contact and slides off the grains below it.

use itertools::Either;
use rand::Rng;
use strum_macros::EnumIter;

use crate::physics::fallingsand::data::grain_grid::GrainGrid;
use crate::physics::fallingsand::util::units::{Acceleration, FallVelocity};
use crate::physics::fallingsand::util::vectors::XyVector;

/// Added to a grain's fall velocity every tick, in cells per tick
pub const GRAVITY: Acceleration = Acceleration(0.2);
/// Terminal velocity, in cells per tick
pub const MAX_VELOCITY: FallVelocity = FallVelocity(8.0);
/// Velocity of a freshly deposited grain, and of a grain that just hit something
pub const SEED_VELOCITY: FallVelocity = FallVelocity(1.0);

/// The constants of the sand physics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandPhysics {
    pub gravity: Acceleration,
    pub max_velocity: FallVelocity,
    pub seed_velocity: FallVelocity,
}

impl Default for SandPhysics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_velocity: MAX_VELOCITY,
            seed_velocity: SEED_VELOCITY,
        }
    }
}

/// The order the cells of one row are visited in
/// Chosen at random for every row, a fixed order makes piles lean to one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ScanDirection {
    LeftToRight,
    RightToLeft,
}

impl ScanDirection {
    /// A fair coin flip
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            ScanDirection::LeftToRight
        } else {
            ScanDirection::RightToLeft
        }
    }

    /// The columns of a row of the given width, in this order
    pub fn columns(self, width: usize) -> impl Iterator<Item = usize> {
        match self {
            ScanDirection::LeftToRight => Either::Left(0..width),
            ScanDirection::RightToLeft => Either::Right((0..width).rev()),
        }
    }
}

/// One of the two cells diagonally below a grain
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Diagonal {
    Left,
    Right,
}

impl Diagonal {
    /// The horizontal step towards this side
    pub fn dx(self) -> isize {
        match self {
            Diagonal::Left => -1,
            Diagonal::Right => 1,
        }
    }

    /// Pick a side to slide to given which sides are free
    /// When both are free the pick is a fair coin flip, the rng is not touched otherwise.
    pub fn choose<R: Rng + ?Sized>(left_free: bool, right_free: bool, rng: &mut R) -> Option<Self> {
        match (left_free, right_free) {
            (true, true) => {
                if rng.gen_bool(0.5) {
                    Some(Diagonal::Left)
                } else {
                    Some(Diagonal::Right)
                }
            }
            (true, false) => Some(Diagonal::Left),
            (false, true) => Some(Diagonal::Right),
            (false, false) => None,
        }
    }
}

/// What happened to a grain during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainMove {
    /// Fell straight down, possibly several rows at once
    Fell { to: XyVector },
    /// Was blocked and slid to a diagonal neighbor of the cell below
    Slid { to: XyVector, diagonal: Diagonal },
    /// Did not move this tick
    Rested,
}

/// Advance the grain at `pos` by one tick.
///
/// `pos` must hold a grain and must not be on the bottom row.
/// The grain speeds up, then tries to hop `floor(velocity)` rows straight down
/// (stopping at the floor). If the landing cell is taken it loses its momentum, and if
/// the cell right below it is taken as well it tries to slide diagonally down.
///
/// The slide check looks at the row right below the grain, not at the landing row of the
/// hop, so a fast grain whose landing cell is taken but whose next row is free stays put
/// for this tick and falls on the next one.
pub fn sand_process<R: Rng + ?Sized>(
    grid: &mut GrainGrid,
    pos: XyVector,
    physics: &SandPhysics,
    rng: &mut R,
) -> GrainMove {
    let width = grid.get_width();
    let height = grid.get_height();
    debug_assert!(pos.y + 1 < height, "The bottom row never falls");
    let idx = grid.index(pos);
    debug_assert!(grid.is_occupied(idx), "Processing an empty cell");

    // Gravity
    let velocity = grid
        .get_velocity(idx)
        .accelerate(physics.gravity, physics.max_velocity);
    grid.set_velocity(idx, velocity);

    let steps = velocity.whole_cells();
    if steps == 0 {
        return GrainMove::Rested;
    }

    // Straight down, in one hop
    let landing = XyVector {
        x: pos.x,
        y: (pos.y + steps).min(height - 1),
    };
    let landing_idx = grid.index(landing);
    if !grid.is_occupied(landing_idx) {
        grid.move_grain(idx, landing_idx);
        return GrainMove::Fell { to: landing };
    }

    // Blocked, the impact eats the momentum
    grid.set_velocity(idx, physics.seed_velocity);
    if !grid.is_occupied(idx + width) {
        return GrainMove::Rested;
    }

    let free_diagonal = |diagonal: Diagonal| {
        pos.checked_offset(diagonal.dx(), 1, width, height)
            .filter(|p| !grid.is_occupied(grid.index(*p)))
    };
    let left = free_diagonal(Diagonal::Left);
    let right = free_diagonal(Diagonal::Right);
    let chosen = Diagonal::choose(left.is_some(), right.is_some(), rng);

    let target = match chosen {
        Some(Diagonal::Left) => left.map(|to| (to, Diagonal::Left)),
        Some(Diagonal::Right) => right.map(|to| (to, Diagonal::Right)),
        None => None,
    };
    match target {
        Some((to, diagonal)) => {
            let to_idx = grid.index(to);
            grid.move_grain(idx, to_idx);
            GrainMove::Slid { to, diagonal }
        }
        None => GrainMove::Rested,
    }
}
