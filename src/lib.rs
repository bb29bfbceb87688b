//! # Sysinfo Display Library
//!
//! Show CPU and GPU telemetry from a host PC on a small paged text display.
//!
//! The host streams one JSON record per line over serial. This library parses
//! those records, keeps the latest one, and renders it onto a five-line panel
//! as a GPU page, a CPU page or a placeholder page, chosen with three buttons.

pub mod buttons;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod pages;
pub mod render_loop;
pub mod serial;
pub mod telemetry;
