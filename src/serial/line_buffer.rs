//! Line framing for the serial byte stream.
//!
//! The host terminates records with `\r` (some senders use `\n` or `\r\n`),
//! so any of the three ends a line. Empty segments between terminators are
//! dropped.

use bytes::{Buf, BytesMut};
use tracing::warn;

/// Accumulates raw bytes and yields complete lines.
#[derive(Debug)]
pub struct LineBuffer {
    buffer: BytesMut,
    max_line_length: usize,
    /// Set after an overlong partial line was dropped, until its terminator
    discarding: bool,
}

impl LineBuffer {
    /// Creates a buffer that drops lines longer than `max_line_length` bytes.
    #[must_use]
    pub fn new(max_line_length: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(max_line_length),
            max_line_length,
            discarding: false,
        }
    }

    /// Appends bytes read from the port.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Number of buffered bytes not yet part of a complete line.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Takes the next complete line, if one is buffered.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the telemetry parser
    /// will refuse the line anyway.
    pub fn next_line(&mut self) -> Option<String> {
        loop {
            let Some(end) = self.buffer.iter().position(|&b| b == b'\n' || b == b'\r') else {
                if self.buffer.len() > self.max_line_length {
                    warn!(
                        "Dropping {} bytes without a line terminator (max {})",
                        self.buffer.len(),
                        self.max_line_length
                    );
                    self.buffer.clear();
                    self.discarding = true;
                }
                return None;
            };

            let line = self.buffer.split_to(end);
            self.buffer.advance(1);

            if self.discarding {
                // Tail of a line already reported as dropped
                self.discarding = false;
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if line.len() > self.max_line_length {
                warn!(
                    "Dropping {} byte line (max {})",
                    line.len(),
                    self.max_line_length
                );
                continue;
            }

            return Some(String::from_utf8_lossy(&line).into_owned());
        }
    }
}
