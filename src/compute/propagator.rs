//! CPU Propagator - Main simulation driver for Lenia.
//!
//! Owns the grid, the kernel built for the current radius, and the parameters, and
//! serializes every mutation through `&mut self` so a step never sees a stale kernel.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::{
    ConfigError, MAX_KERNEL_RADIUS, MIN_DT, MIN_KERNEL_RADIUS, MIN_SIGMA, Pattern, Seed,
    SimulationConfig,
};

use super::{Grid, Kernel, paint, step_into};

/// Notification emitted after the grid has been reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResized {
    pub width: usize,
    pub height: usize,
}

/// Resize listener type.
pub type ResizeCallback = Box<dyn Fn(GridResized) + Send + Sync>;

/// CPU-based Lenia propagator.
pub struct Propagator {
    config: SimulationConfig,
    kernel: Kernel,
    grid: Grid,
    /// Pattern and generator seed reapplied on resize.
    seed: Seed,
    /// Current simulation time.
    time: f32,
    /// Step count.
    step: u64,
    resize_listeners: Vec<ResizeCallback>,
}

impl Propagator {
    /// Create a propagator and seed its grid.
    pub fn new(config: SimulationConfig, seed: Seed) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height)?;
        seed.apply(&mut grid);
        let kernel = Kernel::new(config.kernel_radius);

        log::info!(
            "Created {}x{} propagator (R={}, mu={}, sigma={}, dt={}, pattern={})",
            config.width,
            config.height,
            config.kernel_radius,
            config.mu,
            config.sigma,
            config.dt,
            seed.pattern
        );

        Ok(Self {
            config,
            kernel,
            grid,
            seed,
            time: 0.0,
            step: 0,
            resize_listeners: Vec::new(),
        })
    }

    /// Perform one simulation step.
    ///
    /// Every cell of the scratch buffer is written before it is published, so readers
    /// only ever observe complete states.
    pub fn step(&mut self) {
        let width = self.grid.width();
        let height = self.grid.height();
        let params = self.config.step_params();

        let (current, next) = self.grid.buffers_mut();
        step_into(current, next, &self.kernel, params, width, height);
        self.grid.swap();

        self.time += params.dt;
        self.step += 1;
    }

    /// Run simulation for specified number of steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Reallocate both buffers, rebuild the kernel, and reseed with the active pattern.
    ///
    /// Zero dimensions leave everything untouched and return `None`.
    pub fn resize(&mut self, width: usize, height: usize) -> Option<GridResized> {
        let grid = match Grid::new(width, height) {
            Ok(grid) => grid,
            Err(err) => {
                log::warn!("Ignoring resize to {width}x{height}: {err}");
                return None;
            }
        };

        self.grid = grid;
        self.config.width = width;
        self.config.height = height;
        self.kernel = Kernel::new(self.config.kernel_radius);
        self.seed.apply(&mut self.grid);

        let event = GridResized { width, height };
        log::info!("Resized grid to {width}x{height}");
        for listener in &self.resize_listeners {
            listener(event);
        }
        Some(event)
    }

    /// Register a callback invoked after every successful resize.
    pub fn on_resize(&mut self, callback: ResizeCallback) {
        self.resize_listeners.push(callback);
    }

    /// Reseed with `pattern`, drawing randomness from the propagator's seeded generator.
    pub fn seed_pattern(&mut self, pattern: Pattern) {
        self.seed.pattern = pattern;
        self.seed.apply(&mut self.grid);
    }

    /// Reseed with `pattern` using a caller-supplied generator.
    pub fn seed_pattern_with<R: Rng + ?Sized>(&mut self, pattern: Pattern, rng: &mut R) {
        self.seed.pattern = pattern;
        pattern.apply(&mut self.grid, rng);
    }

    /// Replace the seed (pattern and generator seed) and reapply it.
    pub fn reset(&mut self, seed: Seed) {
        self.seed = seed;
        self.seed.apply(&mut self.grid);
        self.time = 0.0;
        self.step = 0;
    }

    /// Paint a cone-shaped stroke. Cells outside the grid are skipped.
    pub fn paint(&mut self, x: f32, y: f32, radius: f32, intensity: f32) {
        paint(&mut self.grid, x, y, radius, intensity);
    }

    /// Paint with the configured brush size and intensity.
    pub fn paint_brush(&mut self, x: f32, y: f32) {
        let brush = &self.config.brush;
        paint(&mut self.grid, x, y, brush.size, brush.intensity);
    }

    /// Clamp and write a single cell. Out-of-bounds coordinates are ignored.
    pub fn set_value(&mut self, x: i64, y: i64, value: f32) {
        self.grid.set_value(x, y, value);
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.config.dt = at_least(dt, MIN_DT, "dt");
    }

    /// Set the kernel radius, rebuilding the kernel if it changed.
    ///
    /// Values outside [`MIN_KERNEL_RADIUS`, `MAX_KERNEL_RADIUS`] are clamped.
    pub fn set_kernel_radius(&mut self, radius: f32) {
        let radius = at_most(
            at_least(radius, MIN_KERNEL_RADIUS, "kernel_radius"),
            MAX_KERNEL_RADIUS,
            "kernel_radius",
        );
        if radius != self.config.kernel_radius {
            self.config.kernel_radius = radius;
            self.kernel = Kernel::new(radius);
        }
    }

    pub fn set_growth_mean(&mut self, mu: f32) {
        if mu.is_finite() {
            self.config.mu = mu;
        } else {
            log::warn!("Ignoring non-finite mu {mu}");
        }
    }

    pub fn set_growth_sigma(&mut self, sigma: f32) {
        self.config.sigma = at_least(sigma, MIN_SIGMA, "sigma");
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.config.brush.size = at_least(size, 0.0, "brush.size");
    }

    pub fn set_brush_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.config.brush.intensity = intensity;
        } else {
            log::warn!("Ignoring non-finite brush intensity {intensity}");
        }
    }

    /// Read-only view of the current buffer.
    #[inline]
    pub fn current(&self) -> &[f32] {
        self.grid.current()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Get configuration reference.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Simulated time (sum of dt over all steps).
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Sum of all cell values.
    pub fn total_population(&self) -> f32 {
        self.grid.total_population()
    }
}

/// Replace values below `min` (or non-finite) with `min`, logging the substitution.
fn at_least(value: f32, min: f32, name: &str) -> f32 {
    if value.is_finite() && value >= min {
        value
    } else {
        log::warn!("Clamping {name}={value} to {min}");
        min
    }
}

fn at_most(value: f32, max: f32, name: &str) -> f32 {
    if value > max {
        log::warn!("Clamping {name}={value} to {max}");
        max
    } else {
        value
    }
}

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_population: f32,
    pub max_value: f32,
    pub min_value: f32,
    pub mean_value: f32,
    pub active_cells: usize,
}

impl SimulationStats {
    /// Compute statistics from the current buffer.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut total_population = 0.0f32;
        let mut max_value = f32::NEG_INFINITY;
        let mut min_value = f32::INFINITY;
        let mut active_cells = 0usize;

        for &v in grid.current() {
            total_population += v;
            max_value = max_value.max(v);
            min_value = min_value.min(v);
            if v > 1e-6 {
                active_cells += 1;
            }
        }

        Self {
            total_population,
            max_value,
            min_value,
            mean_value: total_population / grid.grid_size() as f32,
            active_cells,
        }
    }
}
