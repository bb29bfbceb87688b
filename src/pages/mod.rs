//! # Pages Module
//!
//! Which view the panel shows and what text each view produces.
//!
//! # Pages
//!
//! - [`Page::Gpu`]: GPU core/hot spot temperature, GPU power, combined power
//! - [`Page::Cpu`]: CPU core/CCD temperature, package power, combined power
//! - [`Page::Other`]: fallback view showing only its label

pub mod renderer;
pub mod selector;

use std::fmt;

pub use renderer::{render, Frame};
pub use selector::select;

/// Label carried by the page button C selects.
pub const OTHER_LABEL: &str = "other";

/// Available pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    /// GPU readings (startup page)
    #[default]
    Gpu,

    /// CPU readings
    Cpu,

    /// Any other view; the label is shown as the title with blank rows
    Other(String),
}

impl Page {
    /// The fallback page selected by button C.
    #[must_use]
    pub fn other() -> Self {
        Page::Other(OTHER_LABEL.to_string())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Gpu => f.write_str("gpu"),
            Page::Cpu => f.write_str("cpu"),
            Page::Other(label) => f.write_str(label),
        }
    }
}
