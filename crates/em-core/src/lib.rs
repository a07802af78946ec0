//! em-core: stable foundation for motorsim.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float helpers)
//! - grid (uniform sample grid shared by signal and simulation)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EmError, EmResult};
pub use grid::{DEFAULT_SAMPLE_RATE_HZ, MAX_SAMPLES, TimeGrid};
pub use numeric::*;
pub use units::*;
