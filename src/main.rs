//! # Sysinfo Display
//!
//! Show CPU/GPU telemetry received over serial on a small paged text display.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tokio::time::Duration;
use tracing::{info, warn};

use sysinfo_display::buttons::{ButtonSource, EvdevButtons, NoButtons};
use sysinfo_display::config::{ButtonConfig, Config};
use sysinfo_display::display::ConsoleDisplay;
use sysinfo_display::logging;
use sysinfo_display::render_loop::RenderLoop;
use sysinfo_display::serial::spawn_reader;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for Sysinfo Display
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or `config/default.toml`)
///    - Set up logging
///    - Spawn the serial reader task
///    - Open the button device (or run without buttons)
///    - Show the "Waiting..." placeholder
///
/// 2. **Main Loop**
///    - Tick every `poll_interval_ms`: take one telemetry line or sample the
///      buttons, then redraw the selected page
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns error if:
/// - The configuration file is invalid
/// - Logging cannot be initialized
/// - Writing to the display fails
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/default.toml
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let _log_guard = logging::init(&config.logging).context("Failed to initialize logging")?;

    info!("Sysinfo Display v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Using configuration: {}", config_path);

    let (lines, reader) = spawn_reader(config.serial.clone());
    let buttons = open_buttons(&config.buttons);

    let stdout = std::io::stdout();
    let clear_screen = stdout.is_terminal();
    let display = ConsoleDisplay::new(stdout, config.display.columns).with_clear_screen(clear_screen);

    let debounce = Duration::from_millis(config.buttons.debounce_ms);
    let mut render_loop = RenderLoop::new(lines, buttons, display, debounce);
    render_loop.show_waiting()?;

    let poll_interval = Duration::from_millis(config.render_loop.poll_interval_ms);
    info!("Starting render loop (polling every {}ms)", poll_interval.as_millis());
    info!("Press Ctrl+C to exit");

    render_loop
        .run(poll_interval, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, shutting down...");
        })
        .await?;

    info!(
        "Stopped on the {} page after {} telemetry updates ({} rejected lines)",
        render_loop.page(),
        render_loop.store().updates(),
        render_loop.rejected()
    );

    reader.abort();
    Ok(())
}

/// Open the configured button device, or run without buttons.
///
/// A missing device is not fatal: the display keeps showing the startup page.
fn open_buttons(config: &ButtonConfig) -> Box<dyn ButtonSource> {
    if !config.enabled {
        info!("Button input disabled");
        return Box::new(NoButtons);
    }

    match EvdevButtons::open(config) {
        Ok(buttons) => {
            info!("Button input from {}", buttons.device_path());
            Box::new(buttons)
        }
        Err(e) => {
            warn!("{}; continuing without buttons", e);
            Box::new(NoButtons)
        }
    }
}
