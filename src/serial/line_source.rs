//! Trait abstraction for polling telemetry lines to enable testing

use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::warn;

/// Non-blocking source of complete input lines.
pub trait LineSource {
    /// Takes the next buffered line, or `None` if nothing is waiting.
    ///
    /// Must return immediately; the render loop calls this every tick.
    fn poll_line(&mut self) -> Option<String>;
}

/// Receiving end of the serial reader task's line channel.
#[derive(Debug)]
pub struct LineReceiver {
    rx: mpsc::Receiver<String>,
    closed: bool,
}

impl LineReceiver {
    /// Wraps the receiving half of the reader task's channel.
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx, closed: false }
    }
}

impl LineSource for LineReceiver {
    fn poll_line(&mut self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.closed {
                    warn!("Serial reader stopped; no further telemetry will arrive");
                    self.closed = true;
                }
                None
            }
        }
    }
}
