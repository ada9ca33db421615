//! Schema module - Configuration and seeding types for Lenia simulations.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
