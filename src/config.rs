//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and field is optional; a missing file means the built-in
//! defaults, which match the reference setup (115200 baud serial, buttons on
//! KEY_A/KEY_B/KEY_C, a 21-column panel).

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::buttons::Polarity;
use crate::error::{Result, SysinfoDisplayError};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub buttons: ButtonConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub render_loop: RenderLoopConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

/// Button input configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ButtonConfig {
    #[serde(default = "default_buttons_enabled")]
    pub enabled: bool,

    /// Empty means auto-detect
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_key_a")]
    pub key_a: u16,

    #[serde(default = "default_key_b")]
    pub key_b: u16,

    #[serde(default = "default_key_c")]
    pub key_c: u16,

    #[serde(default)]
    pub polarity: Polarity,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Display configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
}

/// Render loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RenderLoopConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write a daily rolling log file here instead of stderr
    #[serde(default)]
    pub directory: Option<String>,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyACM0".to_string() }
fn default_baud_rate() -> u32 { 115200 }
fn default_reconnect_interval_ms() -> u64 { 60000 }
fn default_max_line_length() -> usize { 512 }

fn default_buttons_enabled() -> bool { true }
fn default_key_a() -> u16 { 30 }
fn default_key_b() -> u16 { 48 }
fn default_key_c() -> u16 { 46 }
fn default_debounce_ms() -> u64 { 20 }

fn default_columns() -> usize { 21 }

fn default_poll_interval_ms() -> u64 { 10 }

fn default_log_level() -> String { "info".to_string() }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            max_line_length: default_max_line_length(),
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            enabled: default_buttons_enabled(),
            device_path: String::new(),
            key_a: default_key_a(),
            key_b: default_key_b(),
            key_c: default_key_c(),
            polarity: Polarity::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
        }
    }
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sysinfo_display::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(invalid("serial port cannot be empty"));
        }

        if ![9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600].contains(&self.serial.baud_rate) {
            return Err(invalid(
                "baud_rate must be one of: 9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600",
            ));
        }

        if self.serial.reconnect_interval_ms == 0 || self.serial.reconnect_interval_ms > 600000 {
            return Err(invalid("reconnect_interval_ms must be between 1 and 600000"));
        }

        // A full record is ~160 bytes
        if self.serial.max_line_length < 64 || self.serial.max_line_length > 65536 {
            return Err(invalid("max_line_length must be between 64 and 65536"));
        }

        let keys = [self.buttons.key_a, self.buttons.key_b, self.buttons.key_c];
        if keys.iter().any(|&key| key == 0 || key > 0x2ff) {
            return Err(invalid("button key codes must be between 1 and 767 (KEY_MAX)"));
        }

        if keys[0] == keys[1] || keys[1] == keys[2] || keys[0] == keys[2] {
            return Err(invalid("button key codes must be distinct"));
        }

        if self.buttons.debounce_ms > 1000 {
            return Err(invalid("debounce_ms must be between 0 and 1000"));
        }

        if self.display.columns < 8 || self.display.columns > 80 {
            return Err(invalid("display columns must be between 8 and 80"));
        }

        if self.render_loop.poll_interval_ms == 0 || self.render_loop.poll_interval_ms > 1000 {
            return Err(invalid("poll_interval_ms must be between 1 and 1000"));
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(invalid("log level must be one of: trace, debug, info, warn, error"));
        }

        if matches!(&self.logging.directory, Some(dir) if dir.is_empty()) {
            return Err(invalid("logging directory cannot be empty when set"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> SysinfoDisplayError {
    SysinfoDisplayError::Config(toml::de::Error::custom(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
port = "/dev/ttyUSB0"

[buttons]
polarity = "active_low"
debounce_ms = 0

[display]

[render_loop]
poll_interval_ms = 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.buttons.polarity, Polarity::ActiveLow);
        assert_eq!(config.buttons.debounce_ms, 0);
        assert_eq!(config.render_loop.poll_interval_ms, 50);
        assert_eq!(config.display.columns, 21);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM0");
        assert!(config.buttons.enabled);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(b"[serial\nport = ").unwrap();
        temp_file.flush().unwrap();

        assert!(matches!(
            Config::load(temp_file.path()),
            Err(SysinfoDisplayError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_polarity() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(b"[buttons]\npolarity = \"sideways\"\n").unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.serial.baud_rate, 115200);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("absent.toml")),
            Err(SysinfoDisplayError::Io(_))
        ));
    }

    #[test]
    fn test_empty_serial_port() {
        let mut config = Config::default();
        config.serial.port = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = Config::default();
        config.serial.baud_rate = 420000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_baud_rates() {
        for &baud in &[9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600] {
            let mut config = Config::default();
            config.serial.baud_rate = baud;
            assert!(config.validate().is_ok(), "Baud rate {} should be valid", baud);
        }
    }

    #[test]
    fn test_reconnect_interval_zero() {
        let mut config = Config::default();
        config.serial.reconnect_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_line_length_too_small() {
        let mut config = Config::default();
        config.serial.max_line_length = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_button_keys() {
        let mut config = Config::default();
        config.buttons.key_c = config.buttons.key_a;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_button_key_out_of_range() {
        let mut config = Config::default();
        config.buttons.key_b = 0x300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debounce_too_high() {
        let mut config = Config::default();
        config.buttons.debounce_ms = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_columns_out_of_range() {
        let mut config = Config::default();
        config.display.columns = 4;
        assert!(config.validate().is_err());
        config.display.columns = 81;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_zero() {
        let mut config = Config::default();
        config.render_loop.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_directory() {
        let mut config = Config::default();
        config.logging.directory = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_serial_port(), "/dev/ttyACM0");
        assert_eq!(default_baud_rate(), 115200);
        assert_eq!(default_reconnect_interval_ms(), 60000);
        assert_eq!(default_max_line_length(), 512);
        assert_eq!(default_buttons_enabled(), true);
        assert_eq!(default_key_a(), 30);
        assert_eq!(default_key_b(), 48);
        assert_eq!(default_key_c(), 46);
        assert_eq!(default_debounce_ms(), 20);
        assert_eq!(default_columns(), 21);
        assert_eq!(default_poll_interval_ms(), 10);
        assert_eq!(default_log_level(), "info");
    }
}
