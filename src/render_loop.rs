//! # Render Loop
//!
//! The polling loop tying input to the display.
//!
//! ## Control Flow
//!
//! Each tick:
//!
//! 1. Check (without waiting) whether a telemetry line is buffered
//! 2. No line: sample the buttons, debounce, and update the selected page
//! 3. A line: parse it; on success replace the stored telemetry, on failure
//!    log it and skip the rest of the tick
//! 4. Render the page from the stored telemetry and push all five fields
//!
//! A bad line never changes the stored telemetry, the page, or what is on the
//! display; the panel keeps showing the last good values.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::buttons::{ButtonInput, ButtonSource};
use crate::display::DisplaySurface;
use crate::error::{ParseError, Result};
use crate::pages::{render, select, Frame, Page};
use crate::serial::LineSource;
use crate::telemetry::{self, TelemetryRecord, TelemetryStore};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The current page was pushed to the display
    Rendered,
    /// A telemetry line was rejected; nothing was drawn
    Skipped(ParseError),
}

/// Owns all loop state: telemetry, selected page and the three collaborators.
pub struct RenderLoop<L, B, D> {
    lines: L,
    buttons: B,
    display: D,
    input: ButtonInput,
    store: TelemetryStore,
    page: Page,
    ticks: u64,
    rejected: u64,
}

impl<L, B, D> RenderLoop<L, B, D>
where
    L: LineSource,
    B: ButtonSource,
    D: DisplaySurface,
{
    /// Creates a loop on the GPU page with zeroed telemetry.
    pub fn new(lines: L, buttons: B, display: D, debounce: Duration) -> Self {
        Self {
            lines,
            buttons,
            display,
            input: ButtonInput::new(debounce),
            store: TelemetryStore::new(),
            page: Page::default(),
            ticks: 0,
            rejected: 0,
        }
    }

    /// Shows the "Waiting..." placeholder. Call once before the first tick.
    ///
    /// # Errors
    ///
    /// Returns the display's error if the frame cannot be shown
    pub fn show_waiting(&mut self) -> Result<()> {
        self.display.show(&Frame::waiting())
    }

    /// Runs one iteration of the loop.
    ///
    /// # Errors
    ///
    /// Only display failures are returned. Bad telemetry shows up as
    /// [`TickOutcome::Skipped`] and button read failures are logged.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Result<TickOutcome> {
        self.ticks = self.ticks.wrapping_add(1);

        match self.lines.poll_line() {
            None => self.poll_buttons(now),
            Some(line) => match telemetry::parse(&line) {
                Ok(record) => self.accept(record),
                Err(e) => {
                    self.rejected = self.rejected.wrapping_add(1);
                    warn!("Discarding telemetry line ({}): {:?}", e, line.trim());
                    return Ok(TickOutcome::Skipped(e));
                }
            },
        }

        let frame = render(&self.page, &self.telemetry());
        self.display.show(&frame)?;
        Ok(TickOutcome::Rendered)
    }

    fn accept(&mut self, record: TelemetryRecord) {
        if !self.store.has_received() {
            info!("First telemetry received");
        }
        self.store.update(record);
        debug!(
            "Telemetry updated: gpu {:.1} C / {:.1} W, cpu {:.1} C / {:.1} W",
            record.gpu_core_temp_c(),
            record.gpu_power_w(),
            record.cpu_core_temp_c(),
            record.cpu_package_power_w()
        );
    }

    fn poll_buttons(&mut self, now: Instant) {
        let levels = match self.buttons.read_levels() {
            Ok(levels) => levels,
            Err(e) => {
                warn!("Failed to read buttons: {}", e);
                return;
            }
        };

        let pressed = self.input.process(levels, self.buttons.polarity(), now);
        if !pressed.any() {
            return;
        }

        let next = select(pressed, self.page.clone());
        if next != self.page {
            info!("Page changed: {} -> {}", self.page, next);
            self.page = next;
        }
    }

    /// Ticks until `keep_going` returns false. Checked before every tick.
    ///
    /// # Errors
    ///
    /// Stops at the first display error
    pub fn run_while<F>(&mut self, mut keep_going: F) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        while keep_going() {
            self.tick()?;
        }
        Ok(())
    }

    /// Ticks every `poll_interval` until `shutdown` resolves.
    ///
    /// The interval is the loop's only suspension point, which lets the serial
    /// reader task and signal handling make progress.
    ///
    /// # Errors
    ///
    /// Stops at the first display error
    pub async fn run<F>(&mut self, poll_interval: Duration, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick()?;
                }
                _ = &mut shutdown => {
                    debug!("Render loop stopping after {} ticks", self.ticks);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Currently selected page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Latest accepted telemetry.
    pub fn telemetry(&self) -> TelemetryRecord {
        self.store.current()
    }

    /// The telemetry store.
    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    /// Lines rejected by the parser so far.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
