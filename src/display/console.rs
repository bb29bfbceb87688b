//! Console text panel.
//!
//! Draws the five fields as a framed block, sized like the 128x64 OLED the
//! panel was designed for (21 columns of 6 px glyphs). Useful on a desktop and
//! as a headless stand-in for a real display driver.

use std::io::Write;

use super::{DisplaySurface, TextField};
use crate::error::{Result, SysinfoDisplayError};

/// ANSI clear screen + cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Framed text panel written to any [`Write`] sink.
///
/// Redraws only when a field actually changed since the last refresh.
pub struct ConsoleDisplay<W: Write> {
    writer: W,
    columns: usize,
    clear_screen: bool,
    fields: [String; 5],
    dirty: bool,
}

impl<W: Write> ConsoleDisplay<W> {
    /// Creates a panel `columns` characters wide.
    pub fn new(writer: W, columns: usize) -> Self {
        Self {
            writer,
            columns,
            clear_screen: false,
            fields: Default::default(),
            dirty: true,
        }
    }

    /// Clear the terminal before each redraw so the panel stays in place.
    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    fn fit(&self, text: &str) -> String {
        text.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .take(self.columns)
            .collect()
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let border = format!("+{}+", "-".repeat(self.columns));

        if self.clear_screen {
            write!(self.writer, "{}", CLEAR_SCREEN)?;
        }
        writeln!(self.writer, "{}", border)?;
        for line in &self.fields {
            writeln!(self.writer, "|{:<width$}|", line, width = self.columns)?;
        }
        writeln!(self.writer, "{}", border)?;
        self.writer.flush()
    }
}

impl<W: Write> DisplaySurface for ConsoleDisplay<W> {
    fn set_text(&mut self, field: TextField, text: &str) -> Result<()> {
        let fitted = self.fit(text);
        let slot = &mut self.fields[field.index()];
        if *slot != fitted {
            *slot = fitted;
            self.dirty = true;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.draw().map_err(SysinfoDisplayError::Display)?;
        self.dirty = false;
        Ok(())
    }
}
