//! # Display Module
//!
//! The text surface the render loop draws on.
//!
//! The panel has five independent text fields: a title and four rows. Glyph
//! rendering and controller bring-up belong to whatever implements
//! [`DisplaySurface`]; the loop only ever sets text.

pub mod console;

use crate::error::Result;
use crate::pages::Frame;

pub use console::ConsoleDisplay;

/// One of the five text fields on the panel, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Row1,
    Row2,
    Row3,
    Row4,
}

impl TextField {
    /// All fields in display order.
    pub const ALL: [TextField; 5] = [
        TextField::Title,
        TextField::Row1,
        TextField::Row2,
        TextField::Row3,
        TextField::Row4,
    ];

    /// Zero-based line index on the panel.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            TextField::Title => 0,
            TextField::Row1 => 1,
            TextField::Row2 => 2,
            TextField::Row3 => 3,
            TextField::Row4 => 4,
        }
    }
}

/// A surface with five settable text fields.
pub trait DisplaySurface {
    /// Replace the text of one field. `text` never contains a newline.
    fn set_text(&mut self, field: TextField, text: &str) -> Result<()>;

    /// Make pending field changes visible. Surfaces that draw immediately
    /// can rely on the default no-op.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    /// Push all five fields of `frame`, then refresh.
    fn show(&mut self, frame: &Frame) -> Result<()> {
        for (field, text) in frame.fields() {
            self.set_text(field, text)?;
        }
        self.refresh()
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Display that records every field write for assertions
    #[derive(Clone, Default)]
    pub struct RecordingDisplay {
        pub fields: Arc<Mutex<[String; 5]>>,
        pub writes: Arc<Mutex<Vec<(TextField, String)>>>,
        pub refreshes: Arc<Mutex<usize>>,
    }

    impl RecordingDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn lines(&self) -> [String; 5] {
            self.fields.lock().unwrap().clone()
        }

        pub fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }

        pub fn refresh_count(&self) -> usize {
            *self.refreshes.lock().unwrap()
        }
    }

    impl DisplaySurface for RecordingDisplay {
        fn set_text(&mut self, field: TextField, text: &str) -> Result<()> {
            self.fields.lock().unwrap()[field.index()] = text.to_string();
            self.writes.lock().unwrap().push((field, text.to_string()));
            Ok(())
        }

        fn refresh(&mut self) -> Result<()> {
            *self.refreshes.lock().unwrap() += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::RecordingDisplay;
    use super::*;

    #[test]
    fn test_field_indices_follow_display_order() {
        for (expected, field) in TextField::ALL.iter().enumerate() {
            assert_eq!(field.index(), expected);
        }
    }

    #[test]
    fn test_show_sets_every_field_then_refreshes() {
        let mut display = RecordingDisplay::new();
        display.show(&Frame::waiting()).unwrap();

        assert_eq!(display.write_count(), 5);
        assert_eq!(display.refresh_count(), 1);
        assert_eq!(display.lines()[0], "Waiting...");
    }
}
