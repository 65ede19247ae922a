use std::collections::TryReserveError;

use rand::Rng;
use rayon::prelude::*;

use crate::physics::fallingsand::elements::sand::{sand_process, GrainMove, SandPhysics, ScanDirection};
use crate::physics::fallingsand::util::color::GrainColor;
use crate::physics::fallingsand::util::grid::{Grid, GridOutOfBoundsError};
use crate::physics::fallingsand::util::image::RawImage;
use crate::physics::fallingsand::util::units::FallVelocity;
use crate::physics::fallingsand::util::vectors::XyVector;

/// The grid of grains
/// A structure of arrays: whether a cell holds a grain, how fast that grain falls,
/// and the color it is drawn with. All three are indexed by `y * width + x` and
/// only ever change together.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainGrid {
    occupied: Grid<u8>,
    velocity: Grid<FallVelocity>,
    pixel: Grid<u32>,
}

/* Initialization */
impl GrainGrid {
    /// Creates an empty grid, reporting an allocation failure instead of aborting
    pub fn try_new_empty(width: usize, height: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            occupied: Grid::try_new_fill(width, height, 0)?,
            velocity: Grid::try_new_fill(width, height, FallVelocity::ZERO)?,
            pixel: Grid::try_new_fill(width, height, 0)?,
        })
    }
}

/* Getters */
impl GrainGrid {
    pub fn get_width(&self) -> usize {
        self.occupied.get_width()
    }
    pub fn get_height(&self) -> usize {
        self.occupied.get_height()
    }
    pub fn total_size(&self) -> usize {
        self.occupied.total_size()
    }
    /// The flat index of an in-bounds coordinate
    #[inline]
    pub fn index(&self, pos: XyVector) -> usize {
        pos.y * self.get_width() + pos.x
    }
    /// The flat index of a coordinate, or an error if it is outside the grid
    pub fn checked_index(&self, pos: XyVector) -> Result<usize, GridOutOfBoundsError> {
        if pos.x < self.get_width() && pos.y < self.get_height() {
            Ok(self.index(pos))
        } else {
            Err(GridOutOfBoundsError(pos))
        }
    }
    #[inline]
    pub fn is_occupied(&self, idx: usize) -> bool {
        self.occupied.get_data_slice()[idx] != 0
    }
    #[inline]
    pub fn get_velocity(&self, idx: usize) -> FallVelocity {
        self.velocity.get_data_slice()[idx]
    }
    #[inline]
    pub fn set_velocity(&mut self, idx: usize, velocity: FallVelocity) {
        debug_assert!(self.is_occupied(idx), "Setting the velocity of an empty cell");
        debug_assert!(velocity.is_valid(), "Invalid velocity {:?}", velocity);
        self.velocity.get_data_slice_mut()[idx] = velocity;
    }
    #[inline]
    pub fn get_pixel(&self, idx: usize) -> u32 {
        self.pixel.get_data_slice()[idx]
    }
    /// Row-major packed pixels, 0 where there is no grain
    pub fn get_pixels(&self) -> &[u32] {
        self.pixel.get_data_slice()
    }
}

/* Modifiers
 * These are the only ways a cell changes */
impl GrainGrid {
    /// Put a new grain into an empty cell
    /// Returns false and leaves the cell alone if it already holds a grain
    pub fn spawn(&mut self, idx: usize, velocity: FallVelocity, color: GrainColor) -> bool {
        if self.is_occupied(idx) {
            return false;
        }
        let packed = color.pack();
        debug_assert_ne!(packed, 0, "A grain must have a visible color");
        self.occupied.get_data_slice_mut()[idx] = 1;
        self.velocity.get_data_slice_mut()[idx] = velocity;
        self.pixel.get_data_slice_mut()[idx] = packed;
        true
    }

    /// Move the grain at `from` into the empty cell `to`, carrying all of its state
    /// The source is left empty, so a grain is never duplicated or lost
    pub fn move_grain(&mut self, from: usize, to: usize) {
        debug_assert!(self.is_occupied(from), "Moving a grain out of an empty cell");
        debug_assert!(!self.is_occupied(to), "Moving a grain into an occupied cell");
        let occupied = self.occupied.get_data_slice_mut();
        occupied[to] = occupied[from];
        occupied[from] = 0;
        let velocity = self.velocity.get_data_slice_mut();
        velocity[to] = velocity[from];
        velocity[from] = FallVelocity::ZERO;
        let pixel = self.pixel.get_data_slice_mut();
        pixel[to] = pixel[from];
        pixel[from] = 0;
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.occupied.fill(0);
        self.velocity.fill(FallVelocity::ZERO);
        self.pixel.fill(0);
    }
}

/// How many grains did what during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub fell: usize,
    pub slid: usize,
    pub rested: usize,
}

impl TickSummary {
    fn record(&mut self, grain_move: GrainMove) {
        match grain_move {
            GrainMove::Fell { .. } => self.fell += 1,
            GrainMove::Slid { .. } => self.slid += 1,
            GrainMove::Rested => self.rested += 1,
        }
    }

    /// Grains that changed cell
    pub fn moved(&self) -> usize {
        self.fell + self.slid
    }
}

/// Handle processing
impl GrainGrid {
    /// Do one tick of physics on the grid
    ///
    /// Rows are swept from the second to last one up to the top. Everything below the
    /// current row has already been processed, so a grain only ever moves into rows that
    /// are done and moves at most once per tick. Each row picks its own random scan direction.
    pub fn process<R: Rng + ?Sized>(&mut self, physics: &SandPhysics, rng: &mut R) -> TickSummary {
        let mut summary = TickSummary::default();
        let width = self.get_width();
        for y in (0..self.get_height().saturating_sub(1)).rev() {
            let direction = ScanDirection::choose(rng);
            for x in direction.columns(width) {
                let pos = XyVector { x, y };
                if !self.is_occupied(self.index(pos)) {
                    continue;
                }
                summary.record(sand_process(self, pos, physics, rng));
            }
        }
        summary
    }
}

/* Statistics */
impl GrainGrid {
    /// The number of grains in the grid
    pub fn count_occupied(&self) -> usize {
        self.occupied
            .get_data_slice()
            .par_iter()
            .filter(|cell| **cell != 0)
            .count()
    }

    /// The highest (smallest y) row holding a grain in column x
    pub fn topmost_occupied_row(&self, x: usize) -> Option<usize> {
        if x >= self.get_width() {
            return None;
        }
        (0..self.get_height()).find(|&y| self.is_occupied(self.index(XyVector { x, y })))
    }

    /// Checks that the three arrays agree with each other
    pub fn is_consistent(&self) -> bool {
        self.occupied
            .iter()
            .zip(self.velocity.iter())
            .zip(self.pixel.iter())
            .all(|((occupied, velocity), pixel)| {
                (*occupied != 0) == (*pixel != 0) && velocity.is_valid()
            })
    }
}

/* Drawing */
impl GrainGrid {
    /// Draw each grain's color into an image of the same size, empty cells transparent
    pub fn draw_into(&self, image: &mut RawImage) {
        debug_assert_eq!(
            (image.width(), image.height()),
            (self.get_width(), self.get_height()),
            "Image does not match the grid"
        );
        image.copy_from(self.get_pixels());
    }
}
