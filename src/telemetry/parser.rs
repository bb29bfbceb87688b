//! # Telemetry Line Parser
//!
//! Decodes one line of the host's JSON telemetry stream.
//!
//! ## Wire Format
//!
//! One JSON object per line:
//!
//! ```text
//! {"GpuCoreTempC":26,"GpuHotSpotTempC":34.34375,"GpuPowerWatts":27.81,
//!  "CpuCoreTempC":50.5,"CpuCcdTempC":35.75,"CpuPackagePowerWatts":36.78}
//! ```
//!
//! All six keys are required. Key order and extra keys are irrelevant; values
//! may be JSON integers or floats.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::record::TelemetryRecord;
use crate::error::ParseError;

/// Shortest trimmed line worth handing to the JSON decoder.
pub const MIN_LINE_LENGTH: usize = 10;

/// Wire keys, in the order they are validated.
pub mod keys {
    /// GPU core temperature (°C)
    pub const GPU_CORE_TEMP: &str = "GpuCoreTempC";
    /// GPU hot spot temperature (°C)
    pub const GPU_HOT_SPOT_TEMP: &str = "GpuHotSpotTempC";
    /// GPU package power (W)
    pub const GPU_POWER: &str = "GpuPowerWatts";
    /// CPU core (Tctl/Tdie) temperature (°C)
    pub const CPU_CORE_TEMP: &str = "CpuCoreTempC";
    /// CPU CCD temperature (°C)
    pub const CPU_CCD_TEMP: &str = "CpuCcdTempC";
    /// CPU package power (W)
    pub const CPU_PACKAGE_POWER: &str = "CpuPackagePowerWatts";

    /// All required keys.
    pub const ALL: [&str; 6] = [
        GPU_CORE_TEMP,
        GPU_HOT_SPOT_TEMP,
        GPU_POWER,
        CPU_CORE_TEMP,
        CPU_CCD_TEMP,
        CPU_PACKAGE_POWER,
    ];
}

/// Raw shape of a telemetry object. Every field is optional here so that an
/// absent or non-numeric key surfaces as [`ParseError::MissingField`] instead
/// of a generic decode failure.
#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(rename = "GpuCoreTempC", default, deserialize_with = "number")]
    gpu_core_temp_c: Option<f64>,
    #[serde(rename = "GpuHotSpotTempC", default, deserialize_with = "number")]
    gpu_hot_spot_temp_c: Option<f64>,
    #[serde(rename = "GpuPowerWatts", default, deserialize_with = "number")]
    gpu_power_w: Option<f64>,
    #[serde(rename = "CpuCoreTempC", default, deserialize_with = "number")]
    cpu_core_temp_c: Option<f64>,
    #[serde(rename = "CpuCcdTempC", default, deserialize_with = "number")]
    cpu_ccd_temp_c: Option<f64>,
    #[serde(rename = "CpuPackagePowerWatts", default, deserialize_with = "number")]
    cpu_package_power_w: Option<f64>,
}

fn number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn required(value: Option<f64>, key: &'static str) -> Result<f64, ParseError> {
    value.ok_or(ParseError::MissingField(key))
}

/// Parse one telemetry line into a validated record.
///
/// Surrounding whitespace (including a trailing `\r`) is ignored.
///
/// # Errors
///
/// - [`ParseError::TooShort`] if the trimmed line has fewer than
///   [`MIN_LINE_LENGTH`] characters
/// - [`ParseError::MalformedPayload`] if the line is not a JSON object
/// - [`ParseError::MissingField`] if a required key is absent or not a number
///
/// # Examples
///
/// ```
/// use sysinfo_display::telemetry::parse;
///
/// let line = r#"{"GpuCoreTempC":26,"GpuHotSpotTempC":34.3,"GpuPowerWatts":27.8,
///               "CpuCoreTempC":50.5,"CpuCcdTempC":35.7,"CpuPackagePowerWatts":36.8}"#;
/// let record = parse(line)?;
/// assert_eq!(record.gpu_core_temp_c(), 26.0);
/// # Ok::<(), sysinfo_display::error::ParseError>(())
/// ```
pub fn parse(line: &str) -> Result<TelemetryRecord, ParseError> {
    let trimmed = line.trim();

    let length = trimmed.chars().count();
    if length < MIN_LINE_LENGTH {
        return Err(ParseError::TooShort(length));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| ParseError::MalformedPayload(e.to_string()))?;

    // A top-level array would otherwise be decoded positionally
    if !value.is_object() {
        return Err(ParseError::MalformedPayload(
            "expected a JSON object".to_string(),
        ));
    }

    let wire: WireRecord = serde_json::from_value(value)
        .map_err(|e| ParseError::MalformedPayload(e.to_string()))?;

    let gpu_core_temp_c = required(wire.gpu_core_temp_c, keys::GPU_CORE_TEMP)?;
    let gpu_hot_spot_temp_c = required(wire.gpu_hot_spot_temp_c, keys::GPU_HOT_SPOT_TEMP)?;
    let gpu_power_w = required(wire.gpu_power_w, keys::GPU_POWER)?;
    let cpu_core_temp_c = required(wire.cpu_core_temp_c, keys::CPU_CORE_TEMP)?;
    let cpu_ccd_temp_c = required(wire.cpu_ccd_temp_c, keys::CPU_CCD_TEMP)?;
    let cpu_package_power_w = required(wire.cpu_package_power_w, keys::CPU_PACKAGE_POWER)?;

    Ok(TelemetryRecord::new(
        cpu_core_temp_c,
        cpu_ccd_temp_c,
        cpu_package_power_w,
        gpu_core_temp_c,
        gpu_hot_spot_temp_c,
        gpu_power_w,
    ))
}
