use super::util::vectors::XyVector;

/// The brush radius used when the host does not pick one
pub const DEFAULT_BRUSH_RADIUS: u32 = 3;

/// A disc shaped brush, measured in grid cells
/// Radius 0 touches exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    radius: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_RADIUS)
    }
}

impl Brush {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
    }

    pub fn get_radius(&self) -> u32 {
        self.radius
    }

    /// Double the radius, a zero radius grows to one
    pub fn grow(&mut self) {
        self.radius = self.radius.saturating_mul(2).max(1);
    }

    /// Halve the radius, never going below zero
    pub fn shrink(&mut self) {
        self.radius /= 2;
    }
}

/// Brush Radius Effect
impl Brush {
    /// The cells this brush covers when centered on `center`, clipped to the grid
    ///
    /// Walks the disc `dx² + dy² <= radius²` row by row, left to right. Only rows and
    /// column spans inside the grid are visited, so the cost is bounded by the grid area
    /// whatever the radius.
    pub fn positions(
        self,
        center: XyVector,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = XyVector> {
        let radius = self.radius as usize;
        let r_sq = u64::from(self.radius) * u64::from(self.radius);
        let rows = if center.x < width && center.y < height {
            center.y.saturating_sub(radius)..=center.y.saturating_add(radius).min(height - 1)
        } else {
            // Nothing to cover
            1..=0
        };
        rows.flat_map(move |y| {
            let dy = center.y.abs_diff(y) as u64;
            let half = isqrt(r_sq - dy * dy) as usize;
            let left = center.x.saturating_sub(half);
            let right = center.x.saturating_add(half).min(width - 1);
            (left..=right).map(move |x| XyVector { x, y })
        })
    }
}

/// Largest `r` with `r * r <= n`
fn isqrt(n: u64) -> u64 {
    let n = u128::from(n);
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root as u64
}
