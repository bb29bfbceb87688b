//! # Telemetry Record
//!
//! One decoded sample of CPU and GPU sensor readings.

/// Immutable snapshot of the six sensor readings plus derived combined power.
///
/// Temperatures are in degrees Celsius, power in watts. No range is enforced;
/// the sender is trusted to report whatever its sensors read.
///
/// # Examples
///
/// ```
/// use sysinfo_display::telemetry::TelemetryRecord;
///
/// let record = TelemetryRecord::new(50.5, 35.75, 36.78, 26.0, 34.34, 27.81);
/// assert!((record.combined_power_w() - 64.59).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetryRecord {
    cpu_core_temp_c: f64,
    cpu_ccd_temp_c: f64,
    cpu_package_power_w: f64,
    gpu_core_temp_c: f64,
    gpu_hot_spot_temp_c: f64,
    gpu_power_w: f64,
    combined_power_w: f64,
}

impl TelemetryRecord {
    /// Builds a record from all six readings, computing combined power.
    #[must_use]
    pub fn new(
        cpu_core_temp_c: f64,
        cpu_ccd_temp_c: f64,
        cpu_package_power_w: f64,
        gpu_core_temp_c: f64,
        gpu_hot_spot_temp_c: f64,
        gpu_power_w: f64,
    ) -> Self {
        Self {
            cpu_core_temp_c,
            cpu_ccd_temp_c,
            cpu_package_power_w,
            gpu_core_temp_c,
            gpu_hot_spot_temp_c,
            gpu_power_w,
            combined_power_w: gpu_power_w + cpu_package_power_w,
        }
    }

    /// CPU core (Tctl/Tdie) temperature in °C.
    #[must_use]
    pub fn cpu_core_temp_c(&self) -> f64 {
        self.cpu_core_temp_c
    }

    /// CPU CCD temperature in °C.
    #[must_use]
    pub fn cpu_ccd_temp_c(&self) -> f64 {
        self.cpu_ccd_temp_c
    }

    /// CPU package power in W.
    #[must_use]
    pub fn cpu_package_power_w(&self) -> f64 {
        self.cpu_package_power_w
    }

    /// GPU core temperature in °C.
    #[must_use]
    pub fn gpu_core_temp_c(&self) -> f64 {
        self.gpu_core_temp_c
    }

    /// GPU hot spot temperature in °C.
    #[must_use]
    pub fn gpu_hot_spot_temp_c(&self) -> f64 {
        self.gpu_hot_spot_temp_c
    }

    /// GPU package power in W.
    #[must_use]
    pub fn gpu_power_w(&self) -> f64 {
        self.gpu_power_w
    }

    /// GPU power plus CPU package power in W.
    #[must_use]
    pub fn combined_power_w(&self) -> f64 {
        self.combined_power_w
    }
}
