//! # Frame Compositor
//!
//! Deterministic mapping from (navigation state, viewport content, terminal
//! size, loading flag) to the exact list of lines a frame shows. A frame is
//! always `rows` lines:
//!
//! ```text
//! line 1            tab bar
//! line 2            horizontal rule
//! lines 3..rows-1   scrollable body (single or dual-panel)
//! line rows         status bar (hints left, progress right)
//! ```
//!
//! Dual-panel mode kicks in when a secondary line stream is present: the
//! secondary stream's widest line fixes the right column, and both streams
//! are indexed by the same scroll offset so they move in lock-step.

use crate::ui::panel::{fit, truncate, visible_width};
use crate::ui::style;
use crate::views::Tab;

/// Application label shown at the left edge of the tab bar.
const APP_LABEL: &str = "daoscope";

/// Everything the compositor needs to lay out one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub tab: Tab,
    /// Drill-down depth (0 = top-level tab view).
    pub depth: usize,
    pub raw: bool,
    pub loading: bool,
    pub scroll: usize,
    pub lines: &'a [String],
    pub secondary: Option<&'a [String]>,
}

impl FrameInput<'_> {
    /// Total scrollable line count: the longer stream rules in dual-panel
    /// mode.
    pub fn total_lines(&self) -> usize {
        let right = self.secondary.map_or(0, <[String]>::len);
        self.lines.len().max(right)
    }
}

/// Compose one frame of exactly `rows` lines, each at most `cols` columns.
pub fn compose(input: &FrameInput<'_>, cols: usize, rows: usize) -> Vec<String> {
    let viewport = rows.saturating_sub(3);
    let mut frame = Vec::with_capacity(rows);

    frame.push(tab_bar(input.tab, cols));
    frame.push("─".repeat(cols));

    match input.secondary.filter(|s| !s.is_empty()) {
        Some(right) => dual_body(&mut frame, input, right, cols, viewport),
        None => single_body(&mut frame, input, cols, viewport),
    }

    frame.push(status_bar(input, cols, viewport));
    frame.truncate(rows);
    while frame.len() < rows {
        frame.push(String::new());
    }
    frame
}

/// Line 1: application label plus every tab label, the active one in
/// reverse video, padded to the full column width.
fn tab_bar(active: Tab, cols: usize) -> String {
    let divider = style::dim("│");
    let mut bar = format!(" {} ", style::brand(APP_LABEL));
    for tab in Tab::ALL {
        let label = format!(" {} ", tab.label());
        let styled = if tab == active {
            style::reverse(&label)
        } else {
            label
        };
        bar.push_str(&divider);
        bar.push_str(&styled);
    }
    fit(&bar, cols)
}

fn single_body(frame: &mut Vec<String>, input: &FrameInput<'_>, cols: usize, viewport: usize) {
    for row in 0..viewport {
        match input.lines.get(input.scroll + row) {
            Some(line) => frame.push(truncate(line, cols)),
            None => frame.push(String::new()),
        }
    }
}

/// Dual-panel body: the right column is as wide as the secondary stream's
/// widest line, the left column takes the remainder minus one separating
/// space, and both columns share the scroll offset.
fn dual_body(
    frame: &mut Vec<String>,
    input: &FrameInput<'_>,
    right: &[String],
    cols: usize,
    viewport: usize,
) {
    let right_w = right
        .iter()
        .map(|l| visible_width(l))
        .max()
        .unwrap_or(0)
        .min(cols.saturating_sub(2));
    let left_w = cols.saturating_sub(right_w + 1);

    for row in 0..viewport {
        let idx = input.scroll + row;
        let left = input.lines.get(idx).map_or("", String::as_str);
        let rhs = right.get(idx).map_or("", String::as_str);
        frame.push(format!("{} {}", fit(left, left_w), fit(rhs, right_w)));
    }
}

/// Final line: key-binding legend on the left, progress on the right, at
/// least one space between them when both are present.
fn status_bar(input: &FrameInput<'_>, cols: usize, viewport: usize) -> String {
    let hints = style::dim(&hints_for(input.tab, input.depth));
    let progress = progress_for(input, viewport);

    let progress_w = visible_width(&progress);
    let hints = truncate(&hints, cols.saturating_sub(progress_w + 1));
    let gap = cols
        .saturating_sub(visible_width(&hints) + progress_w)
        .max(1);
    fit(&format!("{hints}{}{progress}", " ".repeat(gap)), cols)
}

/// Context-sensitive key legend.
fn hints_for(tab: Tab, depth: usize) -> String {
    let mut hints = String::from(" q quit · tab switch");
    if depth > 0 {
        hints.push_str(" · esc back");
    } else {
        match tab {
            Tab::Proposals => hints.push_str(" · n/p select · enter open"),
            Tab::Wallet => hints.push_str(" · n/p account"),
            Tab::Overview => {}
        }
    }
    hints.push_str(" · r refresh · x raw");
    hints
}

/// Right-aligned progress indicator: a loading marker while a load is in
/// flight, a plain line count when the content fits, otherwise a scroll
/// percentage plus the line count.
fn progress_for(input: &FrameInput<'_>, viewport: usize) -> String {
    let mut out = String::new();
    if input.raw {
        out.push_str("raw · ");
    }
    if input.loading {
        out.push_str("loading… ");
        return out;
    }
    let total = input.total_lines();
    if total <= viewport {
        out.push_str(&format!("{total} lines "));
    } else {
        let pct = ((input.scroll + viewport) * 100 / total).min(100);
        out.push_str(&format!("{pct}% · {total} lines "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    fn base<'a>(lines: &'a [String]) -> FrameInput<'a> {
        FrameInput {
            tab: Tab::Overview,
            depth: 0,
            raw: false,
            loading: false,
            scroll: 0,
            lines,
            secondary: None,
        }
    }

    #[test]
    fn frame_always_has_exactly_rows_lines() {
        let lines = numbered(5);
        for rows in [4, 10, 30] {
            assert_eq!(compose(&base(&lines), 80, rows).len(), rows);
        }
    }

    #[test]
    fn tab_bar_is_padded_to_the_full_width_and_names_every_tab() {
        let lines = numbered(1);
        let mut input = base(&lines);
        input.tab = Tab::Proposals;
        let frame = compose(&input, 100, 30);
        assert_eq!(visible_width(&frame[0]), 100);
        for tab in Tab::ALL {
            assert!(frame[0].contains(tab.label()), "missing {}", tab.label());
        }
        // The active tab is the one wrapped in reverse video.
        assert!(frame[0].contains(&style::reverse(" Proposals ")));
    }

    #[test]
    fn rule_spans_the_full_width() {
        let lines = numbered(1);
        let frame = compose(&base(&lines), 42, 10);
        assert_eq!(frame[1], "─".repeat(42));
    }

    #[test]
    fn body_window_follows_the_scroll_offset() {
        let lines = numbered(50);
        let mut input = base(&lines);
        input.scroll = 7;
        let frame = compose(&input, 80, 10);
        assert_eq!(frame[2], "line 7");
        assert_eq!(frame[8], "line 13");
    }

    #[test]
    fn body_rows_past_the_content_are_blank() {
        let lines = numbered(2);
        let frame = compose(&base(&lines), 80, 10);
        assert_eq!(frame[2], "line 0");
        assert_eq!(frame[3], "line 1");
        assert!(frame[4].trim().is_empty());
    }

    #[test]
    fn dual_panel_scrolls_both_streams_in_lock_step() {
        let left = numbered(50);
        let right: Vec<String> = (0..10).map(|i| format!("r{i}")).collect();
        let mut input = base(&left);
        input.secondary = Some(&right);
        input.scroll = 45;
        let frame = compose(&input, 80, 23); // viewport height 20

        // Left shows lines 45..49 then blanks; right ended at line 10, so
        // its column is all blanks at this offset.
        assert!(frame[2].starts_with("line 45"));
        assert!(frame[6].starts_with("line 49"));
        for row in 7..22 {
            assert!(frame[row].trim().is_empty(), "row {row}: {:?}", frame[row]);
        }
        // Right column blank on every visible row.
        for row in 2..22 {
            let line = &frame[row];
            assert!(line.ends_with(' '), "right column not blank: {line:?}");
            assert_eq!(visible_width(line), 80);
        }
    }

    #[test]
    fn status_bar_shows_line_count_when_content_fits() {
        let lines = numbered(3);
        let frame = compose(&base(&lines), 80, 30);
        assert!(frame[29].contains("3 lines"));
        assert!(!frame[29].contains('%'));
    }

    #[test]
    fn status_bar_shows_percentage_when_content_scrolls() {
        let lines = numbered(100);
        let mut input = base(&lines);
        input.scroll = 30;
        let frame = compose(&input, 80, 23); // viewport 20
        assert!(frame[22].contains("50% · 100 lines"));
    }

    #[test]
    fn status_bar_shows_the_loading_marker() {
        let lines = numbered(3);
        let mut input = base(&lines);
        input.loading = true;
        let frame = compose(&input, 80, 10);
        assert!(frame[9].contains("loading…"));
    }

    #[test]
    fn status_bar_keeps_at_least_one_space_between_halves() {
        let lines = numbered(3);
        let frame = compose(&base(&lines), 20, 10);
        let status = &frame[9];
        assert_eq!(visible_width(status), 20);
        assert!(status.contains(" 3 lines"));
    }
}
