//! # Telemetry Store
//!
//! Single-slot holder for the most recently accepted telemetry record.

use super::record::TelemetryRecord;

/// Latest-value store for telemetry.
///
/// Starts out holding an all-zero record. Each accepted record replaces the
/// previous one wholesale; readers always get a copy.
///
/// # Thread Safety
///
/// Owned by the render loop and never shared. The serial reader task hands
/// over raw lines, not records.
#[derive(Debug, Default)]
pub struct TelemetryStore {
    current: TelemetryRecord,
    updates: u64,
}

impl TelemetryStore {
    /// Creates a store holding the zero-valued default record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held record.
    pub fn update(&mut self, record: TelemetryRecord) {
        self.current = record;
        self.updates = self.updates.wrapping_add(1);
    }

    /// Returns a copy of the latest record.
    #[must_use]
    pub fn current(&self) -> TelemetryRecord {
        self.current
    }

    /// Whether any record has been accepted since startup.
    #[must_use]
    pub fn has_received(&self) -> bool {
        self.updates > 0
    }

    /// Number of records accepted since startup.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates
    }
}
