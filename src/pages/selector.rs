//! Button-to-page selection.
//!
//! The page latches: it only changes while a button is held, and stays on the
//! last selection once every button is released.

use super::Page;
use crate::buttons::ButtonEvent;

/// Pick the page for this tick.
///
/// | Button | Page |
/// |--------|------|
/// | A | [`Page::Gpu`] |
/// | B | [`Page::Cpu`] |
/// | C | [`Page::other()`] |
///
/// Buttons are checked in the order A, B, C and each active one overrides the
/// previous, so with several held the last one wins (C over B over A).
///
/// # Examples
///
/// ```
/// use sysinfo_display::buttons::ButtonEvent;
/// use sysinfo_display::pages::{select, Page};
///
/// let pressed = ButtonEvent { a: false, b: true, c: false };
/// assert_eq!(select(pressed, Page::Gpu), Page::Cpu);
/// assert_eq!(select(ButtonEvent::NONE, Page::Cpu), Page::Cpu);
/// ```
#[must_use]
pub fn select(pressed: ButtonEvent, current: Page) -> Page {
    let mut page = current;

    if pressed.a {
        page = Page::Gpu;
    }
    if pressed.b {
        page = Page::Cpu;
    }
    if pressed.c {
        page = Page::other();
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(a: bool, b: bool, c: bool) -> ButtonEvent {
        ButtonEvent { a, b, c }
    }

    #[test]
    fn test_single_buttons() {
        assert_eq!(select(pressed(true, false, false), Page::Cpu), Page::Gpu);
        assert_eq!(select(pressed(false, true, false), Page::Gpu), Page::Cpu);
        assert_eq!(select(pressed(false, false, true), Page::Gpu), Page::other());
    }

    #[test]
    fn test_no_button_latches_current_page() {
        assert_eq!(select(ButtonEvent::NONE, Page::Cpu), Page::Cpu);
        assert_eq!(select(ButtonEvent::NONE, Page::Gpu), Page::Gpu);
        assert_eq!(select(ButtonEvent::NONE, Page::other()), Page::other());
    }

    #[test]
    fn test_no_button_keeps_custom_label() {
        let custom = Page::Other("setup".to_string());
        assert_eq!(select(ButtonEvent::NONE, custom.clone()), custom);
    }

    #[test]
    fn test_all_pressed_c_wins() {
        assert_eq!(select(pressed(true, true, true), Page::Gpu), Page::other());
    }

    #[test]
    fn test_tie_break_order() {
        assert_eq!(select(pressed(true, true, false), Page::other()), Page::Cpu);
        assert_eq!(select(pressed(true, false, true), Page::Cpu), Page::other());
        assert_eq!(select(pressed(false, true, true), Page::Gpu), Page::other());
    }

    #[test]
    fn test_reselecting_same_page_is_stable() {
        let page = select(pressed(true, false, false), Page::Gpu);
        assert_eq!(page, Page::Gpu);
    }
}
