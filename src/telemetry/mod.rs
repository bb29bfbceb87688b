//! # Telemetry Module
//!
//! Decodes and holds the CPU/GPU sensor samples sent by the host PC.
//!
//! This module handles:
//! - Validating one JSON line into a [`TelemetryRecord`]
//! - Computing derived values (combined power) once per record
//! - Keeping the latest accepted record for the render loop

pub mod parser;
pub mod record;
pub mod store;

pub use parser::parse;
pub use record::TelemetryRecord;
pub use store::TelemetryStore;
