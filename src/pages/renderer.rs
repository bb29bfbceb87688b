//! # Page Renderer
//!
//! Formats the text for one page from a telemetry snapshot.
//!
//! ## Layout
//!
//! | Line | GPU page | CPU page |
//! |------|----------|----------|
//! | Title | `GPU Info` | `CPU Info` |
//! | Row 1 | `core: 26.0 C` | `core: 50.5 C` |
//! | Row 2 | `hot spot: 34.3 C` | `ccd: 35.8 C` |
//! | Row 3 | `power: 27.8 W` | `power: 36.8 W` |
//! | Row 4 | `+ cpu: 64.6 W` | `+ gpu: 64.6 W` |
//!
//! Values use `{:.1}`: one decimal, rounded from the exact binary value of the
//! float, with exact ties going to the even digit.

use super::Page;
use crate::display::TextField;
use crate::telemetry::TelemetryRecord;

/// Title shown before the first render pass.
pub const WAITING_TITLE: &str = "Waiting...";

/// The five lines of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub title: String,
    pub rows: [String; 4],
}

impl Frame {
    /// Startup placeholder: "Waiting..." over four blank rows.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            title: WAITING_TITLE.to_string(),
            rows: Default::default(),
        }
    }

    /// Each field paired with its text, top to bottom.
    pub fn fields(&self) -> impl Iterator<Item = (TextField, &str)> {
        TextField::ALL
            .into_iter()
            .zip(std::iter::once(self.title.as_str()).chain(self.rows.iter().map(String::as_str)))
    }
}

fn celsius(label: &str, value: f64) -> String {
    format!("{}: {:.1} C", label, value)
}

fn watts(label: &str, value: f64) -> String {
    format!("{}: {:.1} W", label, value)
}

/// Render `page` from `telemetry`. Pure and infallible.
///
/// # Examples
///
/// ```
/// use sysinfo_display::pages::{render, Page};
/// use sysinfo_display::telemetry::TelemetryRecord;
///
/// let record = TelemetryRecord::new(50.5, 35.75, 36.78, 26.0, 34.34375, 27.81);
/// let frame = render(&Page::Gpu, &record);
/// assert_eq!(frame.title, "GPU Info");
/// assert_eq!(frame.rows[3], "+ cpu: 64.6 W");
/// ```
#[must_use]
pub fn render(page: &Page, telemetry: &TelemetryRecord) -> Frame {
    match page {
        Page::Gpu => Frame {
            title: "GPU Info".to_string(),
            rows: [
                celsius("core", telemetry.gpu_core_temp_c()),
                celsius("hot spot", telemetry.gpu_hot_spot_temp_c()),
                watts("power", telemetry.gpu_power_w()),
                watts("+ cpu", telemetry.combined_power_w()),
            ],
        },
        Page::Cpu => Frame {
            title: "CPU Info".to_string(),
            rows: [
                celsius("core", telemetry.cpu_core_temp_c()),
                celsius("ccd", telemetry.cpu_ccd_temp_c()),
                watts("power", telemetry.cpu_package_power_w()),
                watts("+ gpu", telemetry.combined_power_w()),
            ],
        },
        Page::Other(label) => Frame {
            title: label.clone(),
            rows: Default::default(),
        },
    }
}
