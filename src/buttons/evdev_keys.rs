//! # evdev Button Source
//!
//! Reads the three page buttons from a Linux input device.
//!
//! On a Raspberry Pi the buttons are usually exposed through the `gpio-keys`
//! device tree overlay, which turns each GPIO line into a key code on an
//! `/dev/input/event*` device. Any keyboard works too, which is handy on a
//! desktop.
//!
//! ## Default Key Codes
//!
//! | Button | evdev Code | Page |
//! |--------|------------|------|
//! | A | KEY_A (30) | GPU |
//! | B | KEY_B (48) | CPU |
//! | C | KEY_C (46) | other |

use evdev::{Device, Key};
use std::path::Path;
use tracing::{debug, info};

use super::{ButtonLevels, ButtonSource, Polarity};
use crate::config::ButtonConfig;
use crate::error::{Result, SysinfoDisplayError};

/// Directory scanned when no device path is configured.
const INPUT_DIR: &str = "/dev/input";

/// Three-button panel backed by an evdev device.
///
/// Levels come from `EVIOCGKEY`, an instantaneous query of which keys are
/// held, so reading never waits for an event.
pub struct EvdevButtons {
    device: Device,
    device_path: String,
    keys: [Key; 3],
    polarity: Polarity,
}

impl std::fmt::Debug for EvdevButtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevButtons")
            .field("device_path", &self.device_path)
            .field("keys", &self.keys)
            .field("polarity", &self.polarity)
            .finish_non_exhaustive()
    }
}

impl EvdevButtons {
    /// Open the button device described by `config`.
    ///
    /// An empty `device_path` scans `/dev/input` for the first device that
    /// supports all three configured keys.
    ///
    /// # Errors
    ///
    /// - `ButtonDeviceNotFound`: no device exposes the configured keys
    /// - `Buttons`: the configured device cannot be opened or lacks a key
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sysinfo_display::buttons::EvdevButtons;
    /// use sysinfo_display::config::Config;
    ///
    /// let config = Config::default();
    /// let buttons = EvdevButtons::open(&config.buttons)?;
    /// println!("Buttons on: {}", buttons.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(config: &ButtonConfig) -> Result<Self> {
        let keys = [
            Key::new(config.key_a),
            Key::new(config.key_b),
            Key::new(config.key_c),
        ];

        if config.device_path.is_empty() {
            Self::detect(keys, config.polarity)
        } else {
            Self::open_path(Path::new(&config.device_path), keys, config.polarity)
        }
    }

    /// Open a specific `/dev/input/eventX` device.
    pub fn open_path(path: &Path, keys: [Key; 3], polarity: Polarity) -> Result<Self> {
        let device = Device::open(path).map_err(|e| {
            SysinfoDisplayError::Buttons(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if !supports_keys(&device, &keys) {
            return Err(SysinfoDisplayError::Buttons(format!(
                "{} does not report keys {:?}",
                path.display(),
                keys
            )));
        }

        let device_path = path.to_string_lossy().to_string();
        info!("Using button device at: {}", device_path);

        Ok(Self {
            device,
            device_path,
            keys,
            polarity,
        })
    }

    /// Scan `/dev/input` for the first device supporting all `keys`.
    pub fn detect(keys: [Key; 3], polarity: Polarity) -> Result<Self> {
        let input_dir = Path::new(INPUT_DIR);

        if !input_dir.exists() {
            return Err(SysinfoDisplayError::Buttons(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| SysinfoDisplayError::Buttons(format!("Failed to read {}: {}", INPUT_DIR, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SysinfoDisplayError::Buttons(format!("Failed to read directory entry: {}", e)))?;

        // Deterministic pick when several devices qualify
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            let is_event_node = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("event"))
                .unwrap_or(false);
            if !is_event_node {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if supports_keys(&device, &keys) {
                        let device_path = path.to_string_lossy().to_string();
                        info!("Detected button device at: {}", device_path);
                        return Ok(Self {
                            device,
                            device_path,
                            keys,
                            polarity,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(SysinfoDisplayError::ButtonDeviceNotFound)
    }

    /// Path of the opened input device.
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

impl ButtonSource for EvdevButtons {
    fn read_levels(&mut self) -> Result<ButtonLevels> {
        let held = self
            .device
            .get_key_state()
            .map_err(|e| SysinfoDisplayError::Buttons(format!("Failed to read key state: {}", e)))?;

        Ok(ButtonLevels {
            a: held.contains(self.keys[0]),
            b: held.contains(self.keys[1]),
            c: held.contains(self.keys[2]),
        })
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }
}

fn supports_keys(device: &Device, keys: &[Key; 3]) -> bool {
    device
        .supported_keys()
        .map(|supported| keys.iter().all(|&key| supported.contains(key)))
        .unwrap_or(false)
}
