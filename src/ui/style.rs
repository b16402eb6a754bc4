//! # ANSI Styling Helpers
//!
//! Thin wrappers around SGR escape sequences used by the compositor and the
//! views. Styling never goes through a widget layer: frames are plain
//! strings, so styles are embedded escapes that the layout code in
//! [`crate::ui::panel`] explicitly excludes from width calculations.

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// Wrap `text` in bold.
pub fn bold(text: &str) -> String {
    format!("\x1b[1m{text}{RESET}")
}

/// Wrap `text` in dim (faint) rendering. Used for hints and separators.
pub fn dim(text: &str) -> String {
    format!("\x1b[2m{text}{RESET}")
}

/// Wrap `text` in reverse video. Used for the active tab and the selected
/// row of a selectable view.
pub fn reverse(text: &str) -> String {
    format!("\x1b[7m{text}{RESET}")
}

/// Wrap `text` in the accent colour (cyan).
pub fn accent(text: &str) -> String {
    format!("\x1b[36m{text}{RESET}")
}

/// Wrap `text` in bold accent. Used for the application label.
pub fn brand(text: &str) -> String {
    format!("\x1b[1;36m{text}{RESET}")
}

/// Wrap `text` in green. Used for passed proposals and positive tallies.
pub fn good(text: &str) -> String {
    format!("\x1b[32m{text}{RESET}")
}

/// Wrap `text` in yellow. Used for in-progress states.
pub fn warn(text: &str) -> String {
    format!("\x1b[33m{text}{RESET}")
}

/// Wrap `text` in red. Used for rejected proposals and error headings.
pub fn bad(text: &str) -> String {
    format!("\x1b[31m{text}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::panel::visible_width;

    #[test]
    fn styled_text_keeps_its_visible_width() {
        assert_eq!(visible_width(&bold("abc")), 3);
        assert_eq!(visible_width(&reverse(&accent("tab"))), 3);
        assert_eq!(visible_width(&dim("")), 0);
    }

    #[test]
    fn styles_are_terminated() {
        assert!(brand("x").ends_with(RESET));
        assert!(bad("x").ends_with(RESET));
    }
}
