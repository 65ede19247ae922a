//! A simple 2d grid type
//! Backed by an ndarray in standard (row-major) layout, so the flat index of a cell is
//! `y * width + x` and the raw slice can be walked without going through the 2d indexing.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::TryReserveError;
use std::fmt;

use super::vectors::XyVector;

/// A simple 2d grid type
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T>(ndarray::Array2<T>);

/* =================
 * Initialization
 * ================= */
impl<T: Clone> Grid<T> {
    /// Create a new grid filled with one value
    /// Reports a failed allocation instead of aborting.
    pub fn try_new_fill(width: usize, height: usize, value: T) -> Result<Self, TryReserveError> {
        let len = width * height;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, value);
        Ok(Self(
            ndarray::Array2::from_shape_vec((height, width), data)
                .expect("a vec of width * height always fits the shape"),
        ))
    }
}

/* ======================================
 * Simple Getters
 * Access basic attributes of the struct
 * ====================================== */
impl<T> Grid<T> {
    /// Get the width of the grid
    pub fn get_width(&self) -> usize {
        self.0.ncols()
    }
    /// Get the height of the grid
    pub fn get_height(&self) -> usize {
        self.0.nrows()
    }
    /// Get the total size of the grid
    pub fn total_size(&self) -> usize {
        self.0.len()
    }
    /// Get the data as a row-major slice
    pub fn get_data_slice(&self) -> &[T] {
        self.0
            .as_slice()
            .expect("grids are always built in standard layout")
    }
    /// Get the data as a mutable row-major slice
    pub fn get_data_slice_mut(&mut self) -> &mut [T] {
        self.0
            .as_slice_mut()
            .expect("grids are always built in standard layout")
    }
    /// Overwrite every cell with one value
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.0.fill(value);
    }
    /// Get an iterator over the grid in row-major order
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.get_data_slice().iter()
    }
}

/// Defines when the user has simply exceeded the bounds of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOutOfBoundsError(pub XyVector);
impl fmt::Display for GridOutOfBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} went outside the constraints of grid", self.0)
    }
}
impl std::error::Error for GridOutOfBoundsError {}
