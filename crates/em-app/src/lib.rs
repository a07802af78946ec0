//! Shared application service layer for motorsim.
//!
//! This crate sits between the parameter-input surfaces (CLI, desktop form)
//! and the numerical core. It translates named parameter fields into typed
//! motor/signal values, validates them, runs the simulation, and hands back
//! index-aligned series ready for charting or export.

pub mod error;
pub mod export;
pub mod params;
pub mod result;
pub mod run_service;
pub mod validate;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use export::{write_csv, write_json};
pub use params::{
    Field, LATEST_VERSION, ParameterSet, SignalParams, SolverParams, load_json, load_yaml,
    save_yaml,
};
pub use result::{ChartSeries, ResultSummary, SimulationResult, TIME_AXIS_LABEL};
pub use run_service::{RunOptions, run, run_parameter_set, run_with_options};
pub use validate::{ValidationError, validate, validate_inputs};

pub use em_signal::{SignalKind, SignalSpec};
pub use em_sim::{InitialState, IntegratorType, MotorParameters, StabilityReport};
