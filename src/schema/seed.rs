//! Seed types for initializing Lenia simulations.

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::compute::Grid;

/// Radius in cells of the disk filled by [`Pattern::Noise`].
pub const NOISE_DISK_RADIUS: f32 = 24.0;

/// Orbium: a 20x20 glider that propels itself under R=13, mu=0.15, sigma=0.015.
#[rustfmt::skip]
pub const ORBIUM: [[f32; 20]; 20] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.1, 0.14, 0.1, 0.0, 0.0, 0.03, 0.03, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.08, 0.24, 0.3, 0.3, 0.18, 0.14, 0.15, 0.16, 0.15, 0.09, 0.2, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.15, 0.34, 0.44, 0.46, 0.38, 0.18, 0.14, 0.11, 0.13, 0.19, 0.18, 0.45, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.06, 0.13, 0.39, 0.5, 0.5, 0.37, 0.06, 0.0, 0.0, 0.0, 0.02, 0.16, 0.68, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.11, 0.17, 0.17, 0.33, 0.4, 0.38, 0.28, 0.14, 0.0, 0.0, 0.0, 0.0, 0.0, 0.18, 0.42, 0.0, 0.0],
    [0.0, 0.0, 0.09, 0.18, 0.13, 0.06, 0.08, 0.26, 0.32, 0.32, 0.27, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.82, 0.0, 0.0],
    [0.27, 0.0, 0.16, 0.12, 0.0, 0.0, 0.0, 0.25, 0.38, 0.44, 0.45, 0.34, 0.0, 0.0, 0.0, 0.0, 0.0, 0.22, 0.17, 0.0],
    [0.0, 0.07, 0.2, 0.02, 0.0, 0.0, 0.0, 0.31, 0.48, 0.57, 0.6, 0.57, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.49, 0.0],
    [0.0, 0.59, 0.19, 0.0, 0.0, 0.0, 0.0, 0.2, 0.57, 0.69, 0.76, 0.76, 0.49, 0.0, 0.0, 0.0, 0.0, 0.0, 0.36, 0.0],
    [0.0, 0.58, 0.19, 0.0, 0.0, 0.0, 0.0, 0.0, 0.67, 0.83, 0.9, 0.92, 0.87, 0.12, 0.0, 0.0, 0.0, 0.0, 0.22, 0.07],
    [0.0, 0.0, 0.46, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7, 0.93, 1.0, 1.0, 1.0, 0.61, 0.0, 0.0, 0.0, 0.0, 0.18, 0.11],
    [0.0, 0.0, 0.82, 0.0, 0.0, 0.0, 0.0, 0.0, 0.47, 1.0, 1.0, 0.98, 1.0, 0.96, 0.27, 0.0, 0.0, 0.0, 0.19, 0.1],
    [0.0, 0.0, 0.46, 0.0, 0.0, 0.0, 0.0, 0.0, 0.25, 1.0, 1.0, 0.84, 0.92, 0.97, 0.54, 0.14, 0.04, 0.1, 0.21, 0.05],
    [0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.09, 0.8, 1.0, 0.82, 0.8, 0.85, 0.63, 0.31, 0.18, 0.19, 0.2, 0.01],
    [0.0, 0.0, 0.0, 0.36, 0.1, 0.0, 0.0, 0.0, 0.05, 0.54, 0.86, 0.79, 0.74, 0.72, 0.6, 0.39, 0.28, 0.24, 0.13, 0.0],
    [0.0, 0.0, 0.0, 0.01, 0.3, 0.07, 0.0, 0.0, 0.08, 0.36, 0.64, 0.7, 0.64, 0.6, 0.51, 0.39, 0.29, 0.19, 0.04, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.1, 0.24, 0.14, 0.1, 0.15, 0.29, 0.45, 0.53, 0.52, 0.46, 0.4, 0.31, 0.21, 0.08, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.08, 0.21, 0.21, 0.22, 0.29, 0.36, 0.39, 0.37, 0.33, 0.26, 0.18, 0.09, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.03, 0.13, 0.19, 0.22, 0.24, 0.24, 0.23, 0.18, 0.13, 0.05, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.02, 0.06, 0.08, 0.09, 0.07, 0.05, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0],
];

/// Complete seed specification for simulation initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
    /// Seed for the generator handed to random patterns.
    #[serde(default)]
    pub rng_seed: u64,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Orbium,
            rng_seed: 0,
        }
    }
}

impl Seed {
    pub fn new(pattern: Pattern, rng_seed: u64) -> Self {
        Self { pattern, rng_seed }
    }

    /// Fresh generator for this seed. Equal seeds always produce equal grids.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.rng_seed)
    }

    /// Overwrite the grid's current buffer with this seed's pattern.
    pub fn apply(&self, grid: &mut Grid) {
        self.pattern.apply(grid, &mut self.rng());
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Empty grid.
    Blank,
    /// Uniform random values in a centered disk of [`NOISE_DISK_RADIUS`].
    Noise,
    /// The [`ORBIUM`] literal stamped at the grid center.
    Orbium,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Blank, Pattern::Noise, Pattern::Orbium];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Blank => "blank",
            Pattern::Noise => "noise",
            Pattern::Orbium => "orbium",
        }
    }

    /// Zero the current buffer, then write the pattern.
    ///
    /// Only [`Pattern::Noise`] draws from `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        grid.clear();
        match self {
            Pattern::Blank => {}
            Pattern::Noise => apply_noise_disk(grid, NOISE_DISK_RADIUS, rng),
            Pattern::Orbium => stamp_centered(grid, &ORBIUM),
        }
        log::debug!(
            "Seeded {} on {}x{} grid (population {:.3})",
            self.name(),
            grid.width(),
            grid.height(),
            grid.total_population()
        );
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" | "empty" => Ok(Pattern::Blank),
            "noise" | "random" => Ok(Pattern::Noise),
            "orbium" => Ok(Pattern::Orbium),
            _ => Err(ConfigError::UnknownPattern(s.to_string())),
        }
    }
}

fn apply_noise_disk<R: Rng + ?Sized>(grid: &mut Grid, radius: f32, rng: &mut R) {
    let cx = (grid.width() / 2) as f32;
    let cy = (grid.height() / 2) as f32;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if (dx * dx + dy * dy).sqrt() <= radius {
                grid.set_value(x as i64, y as i64, rng.gen_range(0.0..1.0));
            }
        }
    }
}

/// Stamp `cells` with its top-left at ((W - cols) / 2, (H - rows) / 2).
/// Grids smaller than the literal keep its central crop.
fn stamp_centered<const C: usize>(grid: &mut Grid, cells: &[[f32; C]]) {
    let ox = (grid.width() as i64 - C as i64) / 2;
    let oy = (grid.height() as i64 - cells.len() as i64) / 2;

    for (row, values) in cells.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            grid.set_value(ox + col as i64, oy + row as i64, value);
        }
    }
}
