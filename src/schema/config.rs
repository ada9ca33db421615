//! Configuration types for Lenia simulation parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::{Grid, StepParams};

/// Smallest kernel radius the propagator will build a kernel for.
pub const MIN_KERNEL_RADIUS: f32 = 1.0;
/// Largest kernel radius. The dense sampling square is ceil(2R + 1) cells on a side.
pub const MAX_KERNEL_RADIUS: f32 = 256.0;
/// Smallest growth width accepted.
pub const MIN_SIGMA: f32 = 1e-4;
/// Smallest time step accepted.
pub const MIN_DT: f32 = 1e-4;
/// Largest cell count of a single buffer (256 MiB of `f32`).
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Time step size (typically 0.05-0.2).
    pub dt: f32,
    /// Kernel radius in cells.
    pub kernel_radius: f32,
    /// Growth function: optimal activation center.
    pub mu: f32,
    /// Growth function: activation width.
    pub sigma: f32,
    /// Interactive brush settings.
    #[serde(default)]
    pub brush: BrushConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            dt: 0.1,
            kernel_radius: 13.0,
            mu: 0.15,
            sigma: 0.015,
            brush: BrushConfig::default(),
        }
    }
}

/// Brush used by drivers for interactive painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Brush radius in cells.
    pub size: f32,
    /// Amount added at the brush center. Negative values erase.
    pub intensity: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            intensity: 0.5,
        }
    }
}

impl SimulationConfig {
    /// Get total grid size (width * height).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height
    }

    /// Scalar parameters consumed by a step.
    #[inline]
    pub fn step_params(&self) -> StepParams {
        StepParams {
            dt: self.dt,
            mu: self.mu,
            sigma: self.sigma,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dt", self.dt),
            ("kernel_radius", self.kernel_radius),
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("brush.size", self.brush.size),
            ("brush.intensity", self.brush.intensity),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if Grid::checked_size(self.width, self.height).is_none() {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.dt < MIN_DT {
            return Err(ConfigError::InvalidTimeStep);
        }
        if !(MIN_KERNEL_RADIUS..=MAX_KERNEL_RADIUS).contains(&self.kernel_radius) {
            return Err(ConfigError::InvalidKernelRadius);
        }
        if self.sigma < MIN_SIGMA {
            return Err(ConfigError::InvalidSigma);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions must be non-zero with at most {} cells", MAX_GRID_CELLS)]
    InvalidDimensions,
    #[error("Time step must be at least {}", MIN_DT)]
    InvalidTimeStep,
    #[error("Kernel radius must lie in [{}, {}]", MIN_KERNEL_RADIUS, MAX_KERNEL_RADIUS)]
    InvalidKernelRadius,
    #[error("Growth sigma must be at least {}", MIN_SIGMA)]
    InvalidSigma,
    #[error("Parameter `{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("Unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SimulationConfig::default();

        let mut c = base.clone();
        c.width = 0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidDimensions)));

        let mut c = base.clone();
        c.dt = 0.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidTimeStep)));

        let mut c = base.clone();
        c.kernel_radius = -1.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidKernelRadius)));

        let mut c = base.clone();
        c.sigma = 0.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSigma)));

        let mut c = base.clone();
        c.mu = f32::NAN;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonFinite { field: "mu" })
        ));
    }

    #[test]
    fn test_validate_matches_runtime_bounds() {
        let base = SimulationConfig::default();

        let mut c = base.clone();
        c.kernel_radius = 1.0e10;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidKernelRadius)));

        let mut c = base.clone();
        c.kernel_radius = 0.5;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidKernelRadius)));

        let mut c = base.clone();
        c.kernel_radius = MAX_KERNEL_RADIUS;
        assert!(c.validate().is_ok());

        let mut c = base.clone();
        c.sigma = MIN_SIGMA / 2.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSigma)));

        let mut c = base.clone();
        c.dt = MIN_DT / 2.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidTimeStep)));

        let mut c = base;
        c.width = usize::MAX / 2;
        c.height = 4;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidDimensions)));
    }

    #[test]
    fn test_json_roundtrip_and_brush_default() {
        let json = r#"{
            "width": 64,
            "height": 32,
            "dt": 0.2,
            "kernel_radius": 10.0,
            "mu": 0.14,
            "sigma": 0.02
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 32);
        assert_eq!(config.brush, BrushConfig::default());

        let back = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json_str(&back).unwrap(), config);
    }

    #[test]
    fn test_json_invalid_values_rejected() {
        let json = r#"{"width": 64, "height": 64, "dt": 0.1,
            "kernel_radius": 0.0, "mu": 0.15, "sigma": 0.015}"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(ConfigError::InvalidKernelRadius)
        ));
        assert!(matches!(
            SimulationConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
