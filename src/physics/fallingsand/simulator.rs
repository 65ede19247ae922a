use std::collections::TryReserveError;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, trace};

use super::brush::{Brush, DEFAULT_BRUSH_RADIUS};
use super::data::grain_grid::{GrainGrid, TickSummary};
use super::util::color::GrainColor;
use super::util::image::RawImage;
use super::util::units::{Acceleration, FallVelocity};
use super::util::vectors::{NormalizedPoint, XyVector};
use crate::physics::util::clock::Clock;

pub use super::elements::sand::{SandPhysics, GRAVITY, MAX_VELOCITY, SEED_VELOCITY};

/// How far a channel of a new grain's color may stray from the base color by default
pub const DEFAULT_COLOR_JITTER: u8 = 20;

/// Everything that can stop a simulator from being built
/// Nothing can fail once it exists.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("a {width}x{height} grid is too large to address")]
    DimensionOverflow { width: usize, height: usize },
    #[error("could not allocate a grid of {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("invalid sand physics: {reason}")]
    InvalidPhysics { reason: &'static str },
    #[error("the frame duration must be greater than zero")]
    InvalidFrameDuration,
    #[error("color jitter must be at most 127, got {jitter}")]
    InvalidColorJitter { jitter: u8 },
}

/// A builder for GranularSimulator
/// Everything has a sensible default, only the grid size usually needs setting.
#[derive(Debug, Clone)]
pub struct SimulatorBuilder {
    width: usize,
    height: usize,
    physics: SandPhysics,
    base_color: GrainColor,
    color_jitter: u8,
    brush_radius: u32,
    frame_duration: Duration,
    seed: Option<u64>,
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBuilder {
    /// Start here
    pub fn new() -> Self {
        Self {
            width: 200,
            height: 350,
            physics: SandPhysics::default(),
            base_color: GrainColor::SAND,
            color_jitter: DEFAULT_COLOR_JITTER,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            frame_duration: Duration::from_secs(1) / 60,
            seed: None,
        }
    }
    /// Number of columns in the grid
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
    /// Number of rows in the grid
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
    /// Velocity gained by a falling grain every tick
    pub fn gravity(mut self, gravity: f32) -> Self {
        self.physics.gravity = Acceleration(gravity);
        self
    }
    /// Terminal velocity
    pub fn max_velocity(mut self, max_velocity: f32) -> Self {
        self.physics.max_velocity = FallVelocity(max_velocity);
        self
    }
    /// Velocity of new grains, and of grains that hit something
    pub fn seed_velocity(mut self, seed_velocity: f32) -> Self {
        self.physics.seed_velocity = FallVelocity(seed_velocity);
        self
    }
    /// Gravity, terminal velocity and seed velocity in one go
    pub fn physics(mut self, physics: SandPhysics) -> Self {
        self.physics = physics;
        self
    }
    /// The color every grain is a small random variation of
    /// Grains are always opaque, the alpha channel is ignored.
    pub fn base_color(mut self, base_color: GrainColor) -> Self {
        self.base_color = GrainColor { a: 255, ..base_color };
        self
    }
    /// How far each color channel of a new grain may stray from the base color, at most 127
    pub fn color_jitter(mut self, color_jitter: u8) -> Self {
        self.color_jitter = color_jitter;
        self
    }
    /// The radius used by `deposit_default`
    pub fn brush_radius(mut self, brush_radius: u32) -> Self {
        self.brush_radius = brush_radius;
        self
    }
    /// How much simulated time one tick stands for
    pub fn frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }
    /// Makes the simulation reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the settings without allocating anything
    fn validate(&self) -> Result<(), SimulationError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(SimulationError::ZeroDimension { width, height });
        }
        let fits_i32 = |n: usize| i32::try_from(n).is_ok();
        if !fits_i32(width) || !fits_i32(height) || width.checked_mul(height).is_none() {
            return Err(SimulationError::DimensionOverflow { width, height });
        }
        let SandPhysics {
            gravity,
            max_velocity,
            seed_velocity,
        } = self.physics;
        if !gravity.0.is_finite() || gravity.0 < 0.0 {
            return Err(SimulationError::InvalidPhysics {
                reason: "gravity must be finite and not negative",
            });
        }
        if !seed_velocity.0.is_finite() || seed_velocity.0 <= 0.0 {
            return Err(SimulationError::InvalidPhysics {
                reason: "seed velocity must be finite and positive",
            });
        }
        if !max_velocity.0.is_finite() || max_velocity < seed_velocity {
            return Err(SimulationError::InvalidPhysics {
                reason: "max velocity must be finite and at least the seed velocity",
            });
        }
        if self.frame_duration.is_zero() {
            return Err(SimulationError::InvalidFrameDuration);
        }
        if self.color_jitter > 127 {
            return Err(SimulationError::InvalidColorJitter {
                jitter: self.color_jitter,
            });
        }
        Ok(())
    }

    /// Builds the simulator with its own random number generator
    /// Seeded if `seed` was called, from the operating system otherwise.
    pub fn build(self) -> Result<GranularSimulator, SimulationError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Builds the simulator around the given random number generator
    /// Every random choice the simulation makes is drawn from it.
    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<GranularSimulator<R>, SimulationError> {
        self.validate()?;
        let cells = self.width * self.height;
        let grid = GrainGrid::try_new_empty(self.width, self.height)
            .map_err(|source| SimulationError::Allocation { cells, source })?;
        info!(
            width = self.width,
            height = self.height,
            cells,
            "Created granular simulator"
        );
        Ok(GranularSimulator {
            grid,
            image: RawImage::new_blank(self.width, self.height),
            physics: self.physics,
            base_color: self.base_color,
            color_jitter: self.color_jitter,
            brush: Brush::new(self.brush_radius),
            frame_duration: self.frame_duration,
            clock: Clock::new(),
            rng,
        })
    }
}

/// A falling sand simulation
///
/// The host deposits grains where the pointer is, calls [`GranularSimulator::step`] once
/// per frame and draws [`GranularSimulator::current_image`].
/// Owned by whatever drives the frame loop, there is no shared global state.
#[derive(Debug)]
pub struct GranularSimulator<R: Rng = StdRng> {
    grid: GrainGrid,
    image: RawImage,
    physics: SandPhysics,
    base_color: GrainColor,
    color_jitter: u8,
    brush: Brush,
    frame_duration: Duration,
    clock: Clock,
    rng: R,
}

impl GranularSimulator {
    /// A simulator with the default physics and colors
    pub fn new(width: usize, height: usize) -> Result<Self, SimulationError> {
        SimulatorBuilder::new().width(width).height(height).build()
    }
}

/* Getters */
impl<R: Rng> GranularSimulator<R> {
    pub fn width(&self) -> usize {
        self.grid.get_width()
    }
    pub fn height(&self) -> usize {
        self.grid.get_height()
    }
    pub fn physics(&self) -> &SandPhysics {
        &self.physics
    }
    pub fn clock(&self) -> Clock {
        self.clock
    }
    pub fn brush(&self) -> &Brush {
        &self.brush
    }
    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }
    /// The most recent frame, blank until the first step
    pub fn current_image(&self) -> &RawImage {
        &self.image
    }
    /// The number of grains in the grid
    pub fn grain_count(&self) -> usize {
        self.grid.count_occupied()
    }
    /// None if outside the grid
    pub fn is_occupied(&self, x: usize, y: usize) -> Option<bool> {
        let idx = self.grid.checked_index(XyVector { x, y }).ok()?;
        Some(self.grid.is_occupied(idx))
    }
    /// The fall velocity of the grain at (x, y), None if there is no grain there
    pub fn fall_velocity(&self, x: usize, y: usize) -> Option<f32> {
        let idx = self.occupied_index(x, y)?;
        Some(self.grid.get_velocity(idx).0)
    }
    /// The color of the grain at (x, y), None if there is no grain there
    pub fn pixel(&self, x: usize, y: usize) -> Option<GrainColor> {
        let idx = self.occupied_index(x, y)?;
        Some(GrainColor::unpack(self.grid.get_pixel(idx)))
    }
    /// The highest row holding a grain in column x
    pub fn topmost_occupied_row(&self, x: usize) -> Option<usize> {
        self.grid.topmost_occupied_row(x)
    }

    fn occupied_index(&self, x: usize, y: usize) -> Option<usize> {
        self.grid
            .checked_index(XyVector { x, y })
            .ok()
            .filter(|idx| self.grid.is_occupied(*idx))
    }
}

/* Input */
impl<R: Rng> GranularSimulator<R> {
    /// Drop grains in a disc around a point of the host's drawing surface.
    ///
    /// Only empty cells receive a grain. Points outside the unit square are ignored and
    /// parts of the disc that leave the grid are clipped.
    /// Returns how many grains were added.
    pub fn deposit(&mut self, point: NormalizedPoint, brush_radius: u32) -> usize {
        let (width, height) = (self.width(), self.height());
        let Some(center) = point.to_cell(width, height) else {
            trace!(%point, "Deposit outside the grid ignored");
            return 0;
        };
        let mut spawned = 0;
        for pos in Brush::new(brush_radius).positions(center, width, height) {
            let idx = self.grid.index(pos);
            if self.grid.is_occupied(idx) {
                continue;
            }
            let color = self.base_color.jittered(self.color_jitter, &mut self.rng);
            if self.grid.spawn(idx, self.physics.seed_velocity, color) {
                spawned += 1;
            }
        }
        debug!(%center, brush_radius, spawned, "Deposited grains");
        spawned
    }

    /// Deposit with the simulator's own brush
    pub fn deposit_default(&mut self, point: NormalizedPoint) -> usize {
        self.deposit(point, self.brush.get_radius())
    }

    /// Remove every grain
    pub fn clear(&mut self) {
        self.grid.clear();
        debug!("Cleared the grid");
    }
}

/* Simulation */
impl<R: Rng> GranularSimulator<R> {
    /// Advance the simulation by one tick and redraw the image
    pub fn step(&mut self) -> TickSummary {
        let summary = self.grid.process(&self.physics, &mut self.rng);
        debug_assert!(self.grid.is_consistent(), "Grain arrays out of sync");
        self.clock.update(self.frame_duration);
        self.rasterize();
        trace!(
            frame = self.clock.get_current_frame(),
            fell = summary.fell,
            slid = summary.slid,
            rested = summary.rested,
            "Stepped"
        );
        summary
    }

    /// Copy the grain colors into the image
    fn rasterize(&mut self) {
        self.grid.draw_into(&mut self.image);
    }
}
