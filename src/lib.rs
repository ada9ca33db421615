//! Lenia - Continuous cellular automata.
//!
//! This crate provides the simulation core of a Lenia-style automaton: a dense toroidal
//! field of densities in [0, 1] that evolves under a radial convolution kernel and a
//! smooth growth function.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and seeding for simulations
//! - `compute`: Numerical computation (kernel, growth, step, brush, propagator)
//!
//! # Example
//!
//! ```rust,no_run
//! use lenia_sim::{
//!     compute::Propagator,
//!     schema::{Pattern, Seed, SimulationConfig},
//! };
//!
//! // Create configuration
//! let config = SimulationConfig::default();
//!
//! // Create propagator seeded with the Orbium glider
//! let mut propagator = Propagator::new(config, Seed::new(Pattern::Orbium, 0))?;
//!
//! // Run simulation, painting between steps
//! propagator.run(50);
//! propagator.paint(10.0, 10.0, 5.0, 0.5);
//! propagator.step();
//!
//! println!("Population after 51 steps: {}", propagator.total_population());
//! # Ok::<(), lenia_sim::schema::ConfigError>(())
//! ```

pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{Grid, GridResized, Kernel, Propagator, SimulationStats};
pub use schema::{ConfigError, Pattern, Seed, SimulationConfig};
