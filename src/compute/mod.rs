//! Compute module - Numerical computation for Lenia.

mod brush;
mod grid;
mod growth;
mod kernel;
mod propagator;
mod step;

pub use brush::*;
pub use grid::*;
pub use growth::*;
pub use kernel::*;
pub use propagator::*;
pub use step::*;
