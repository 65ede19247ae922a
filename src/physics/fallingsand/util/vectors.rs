use std::fmt::Display;

/// My coordinate type for cells in the grid
/// x is the column, positive to the right
/// y is the row, positive downwards, the top row is 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XyVector {
    pub x: usize,
    pub y: usize,
}

impl XyVector {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate, returning None if the result leaves a `width` x `height` grid
    pub fn checked_offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x < width && y < height {
            Some(Self { x, y })
        } else {
            None
        }
    }
}

impl Display for XyVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(XyVector: ({}, {}))", self.x, self.y)
    }
}

/// A point on the host's drawing surface, normalized so that the surface spans [0, 1] on both axes
/// This keeps the grid resolution independent of the screen resolution
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both components lie in [0, 1]
    /// NaN is never inside
    pub fn is_inside_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// The cell under this point on a `width` x `height` grid.
    ///
    /// Coordinates are truncated, so `(0.5, 0.0)` on a 10x10 grid is cell `(5, 0)`.
    /// The far edge (`1.0`) belongs to the last row or column.
    /// Points outside the unit square have no cell.
    pub fn to_cell(&self, width: usize, height: usize) -> Option<XyVector> {
        if !self.is_inside_unit_square() || width == 0 || height == 0 {
            return None;
        }
        let x = ((self.x * width as f32) as usize).min(width - 1);
        let y = ((self.y * height as f32) as usize).min(height - 1);
        Some(XyVector { x, y })
    }
}

impl Display for NormalizedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(NormalizedPoint: ({}, {}))", self.x, self.y)
    }
}

impl From<(f32, f32)> for NormalizedPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}
