//! # Buttons Module
//!
//! Three-button page selection input.
//!
//! This module handles:
//! - Reading instantaneous button levels from an input collaborator
//! - Normalizing active-low wiring to active-high press events
//! - Debouncing each button independently
//!
//! The reference hardware wires buttons A, B and C with pull-ups, so a pressed
//! button reads low. Linux evdev already reports key-down as pressed, which is
//! why the polarity is configurable rather than fixed.

pub mod debounce;
pub mod evdev_keys;

use serde::Deserialize;
use std::time::{Duration, Instant};

use crate::error::Result;
use debounce::Debouncer;

pub use evdev_keys::EvdevButtons;

/// Raw electrical level of each button line (`true` = high / asserted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLevels {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

/// Normalized press state handed to the page selector (`true` = pressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEvent {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

impl ButtonEvent {
    /// No button pressed.
    pub const NONE: Self = Self {
        a: false,
        b: false,
        c: false,
    };

    /// Whether any button is pressed.
    #[must_use]
    pub fn any(&self) -> bool {
        self.a || self.b || self.c
    }
}

/// How a raw level maps to "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Pressed reads low (pull-up wiring)
    ActiveLow,
    /// Pressed reads high
    #[default]
    ActiveHigh,
}

impl Polarity {
    /// Converts one raw level into a pressed flag.
    #[must_use]
    pub fn is_pressed(self, level: bool) -> bool {
        match self {
            Polarity::ActiveLow => !level,
            Polarity::ActiveHigh => level,
        }
    }
}

/// Source of instantaneous button levels.
///
/// Implementations must not block: each call is a query of the current state,
/// not a wait for the next event.
#[cfg_attr(test, mockall::automock)]
pub trait ButtonSource {
    /// Reads the current level of all three buttons.
    fn read_levels(&mut self) -> Result<ButtonLevels>;

    /// Wiring polarity of the levels returned by [`ButtonSource::read_levels`].
    fn polarity(&self) -> Polarity;
}

impl<B: ButtonSource + ?Sized> ButtonSource for Box<B> {
    fn read_levels(&mut self) -> Result<ButtonLevels> {
        (**self).read_levels()
    }

    fn polarity(&self) -> Polarity {
        (**self).polarity()
    }
}

/// Stand-in source used when button input is turned off in config.
///
/// Always reports every button released, so the startup page stays put.
#[derive(Debug, Default)]
pub struct NoButtons;

impl ButtonSource for NoButtons {
    fn read_levels(&mut self) -> Result<ButtonLevels> {
        Ok(ButtonLevels::default())
    }

    fn polarity(&self) -> Polarity {
        Polarity::ActiveHigh
    }
}

/// Turns raw levels into debounced, active-high [`ButtonEvent`]s.
#[derive(Debug)]
pub struct ButtonInput {
    a: Debouncer,
    b: Debouncer,
    c: Debouncer,
}

impl ButtonInput {
    /// Creates a normalizer with the given debounce window (zero disables it).
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            a: Debouncer::new(debounce),
            b: Debouncer::new(debounce),
            c: Debouncer::new(debounce),
        }
    }

    /// Normalizes and debounces one sample of raw levels.
    pub fn process(&mut self, levels: ButtonLevels, polarity: Polarity, now: Instant) -> ButtonEvent {
        ButtonEvent {
            a: self.a.update(polarity.is_pressed(levels.a), now),
            b: self.b.update(polarity.is_pressed(levels.b), now),
            c: self.c.update(polarity.is_pressed(levels.c), now),
        }
    }
}
