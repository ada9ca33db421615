//! Double-buffered toroidal density grid.
//!
//! Data is stored row-major with index `y * width + x`. Only the current buffer is
//! visible outside the crate; the next buffer is step scratch and is swapped in once a
//! step has written every cell.

use crate::schema::{ConfigError, MAX_GRID_CELLS};

/// Density grid with ping-pong buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<f32>,
    next: Vec<f32>,
}

impl Grid {
    /// Cell count for `width` x `height`, or `None` if either is zero or the product
    /// exceeds [`MAX_GRID_CELLS`].
    pub fn checked_size(width: usize, height: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return None;
        }
        width
            .checked_mul(height)
            .filter(|&size| size <= MAX_GRID_CELLS)
    }

    /// Create a zeroed grid. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let size = Self::checked_size(width, height).ok_or(ConfigError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            current: vec![0.0; size],
            next: vec![0.0; size],
        })
    }

    /// Create a grid whose current buffer holds `values`, clamped to [0, 1].
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Result<Self, ConfigError> {
        let size = Self::checked_size(width, height).ok_or(ConfigError::InvalidDimensions)?;
        if values.len() != size {
            return Err(ConfigError::InvalidDimensions);
        }
        let current = values.into_iter().map(clamp_unit).collect();
        Ok(Self {
            width,
            height,
            current,
            next: vec![0.0; size],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total cell count (width * height).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height
    }

    /// Convert (x, y) coordinates to flat index.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Read-only view of the current buffer.
    #[inline]
    pub fn current(&self) -> &[f32] {
        &self.current
    }

    /// Get value at (x, y). Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.current[self.idx(x, y)]
    }

    /// Signed-coordinate lookup; `None` outside the grid.
    pub fn try_get(&self, x: i64, y: i64) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.current[self.idx(x as usize, y as usize)])
    }

    /// Clamp `value` to [0, 1] and write it at (x, y). Out-of-bounds writes are ignored.
    pub fn set_value(&mut self, x: i64, y: i64, value: f32) {
        if self.in_bounds(x, y) {
            let idx = self.idx(x as usize, y as usize);
            self.current[idx] = clamp_unit(value);
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Sum of all current cell values.
    pub fn total_population(&self) -> f32 {
        self.current.iter().sum()
    }

    /// Zero the current buffer.
    pub fn clear(&mut self) {
        self.current.fill(0.0);
    }

    /// Mutable current buffer for seeding and painting. Callers keep values in [0, 1].
    #[inline]
    pub(crate) fn current_mut(&mut self) -> &mut [f32] {
        &mut self.current
    }

    /// Split into (current, next) for a step.
    #[inline]
    pub(crate) fn buffers_mut(&mut self) -> (&[f32], &mut [f32]) {
        (&self.current, &mut self.next)
    }

    /// Publish the next buffer as current (pointer swap, no copy).
    #[inline]
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

/// Wrap a signed coordinate onto [0, size).
#[inline]
pub fn wrap_coord(coord: i32, size: usize) -> usize {
    coord.rem_euclid(size as i32) as usize
}

#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    // NaN collapses to 0 so a bad write cannot poison later steps.
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
