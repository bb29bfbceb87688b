//! Level debouncing for a single button.
//!
//! Page selection latches on the button level, not on edges, so this filters
//! the level itself: a new level is only reported once it has been seen
//! continuously for the debounce window.

use std::time::{Duration, Instant};

/// Debounce state for one button.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    stable: bool,
    candidate: bool,
    candidate_since: Option<Instant>,
}

impl Debouncer {
    /// Creates a debouncer reporting "released" until a press settles.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            stable: false,
            candidate: false,
            candidate_since: None,
        }
    }

    /// Feeds one pressed/released sample and returns the debounced state.
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        if self.window.is_zero() {
            self.stable = pressed;
            return self.stable;
        }

        if pressed == self.stable {
            // Bounced back before settling
            self.candidate_since = None;
            return self.stable;
        }

        match self.candidate_since {
            Some(since) if self.candidate == pressed => {
                if now.saturating_duration_since(since) >= self.window {
                    self.stable = pressed;
                    self.candidate_since = None;
                }
            }
            _ => {
                self.candidate = pressed;
                self.candidate_since = Some(now);
            }
        }

        self.stable
    }
}
