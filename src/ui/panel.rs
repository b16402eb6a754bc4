//! # Panel Layout Engine
//!
//! Pure, stateless layout primitives that the views and the frame
//! compositor build their content from:
//!
//! - [`boxed`] - draw a bordered panel with an optional title
//! - [`beside`] - lay already-rendered panels side by side
//! - [`grid`] - stack panel rows vertically
//! - [`split_width`] - divide a total width into columns
//!
//! All width math is *display* width: SGR escape sequences embedded by
//! [`crate::ui::style`] contribute zero columns, and wide characters count
//! via `unicode-width`.

use unicode_width::UnicodeWidthChar;

use crate::ui::style::RESET;

/// Display width of `text`, ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // CSI sequences run until a final byte in 0x40..=0x7e.
            if chars.next() == Some('[') {
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
        } else {
            width += UnicodeWidthChar::width(c).unwrap_or(0);
        }
    }
    width
}

/// Truncate `text` to at most `max` display columns, carrying embedded
/// escape sequences through untouched. A truncated styled string is closed
/// with a reset so the cut cannot leak attributes into the next cell.
pub fn truncate(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    let mut styled = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            styled = true;
            out.push(c);
            if chars.peek() == Some(&'[') {
                while let Some(&follow) = chars.peek() {
                    out.push(follow);
                    chars.next();
                    if follow != '[' && ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            continue;
        }
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max {
            if styled {
                out.push_str(RESET);
            }
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

/// Pad or truncate `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let current = visible_width(text);
    if current > width {
        let cut = truncate(text, width);
        let short = width - visible_width(&cut);
        format!("{cut}{}", " ".repeat(short))
    } else {
        format!("{text}{}", " ".repeat(width - current))
    }
}

/// Greedy word wrap of `text` into lines of at most `width` columns.
/// Paragraph breaks (`\n`) are preserved as empty lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
            } else if visible_width(&line) + 1 + visible_width(word) <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        out.push(line);
    }
    out
}

/// Render a bordered panel exactly `width` columns wide.
///
/// The optional title is embedded in the top border and right-padded with a
/// rule. Content lines are padded or truncated to the interior width (two
/// border columns plus one padding column per side). Every returned line,
/// borders included, has a visible width of exactly `width` (minimum 4).
pub fn boxed(title: Option<&str>, lines: &[String], width: usize) -> Vec<String> {
    let width = width.max(4);
    let inner = width - 2;
    let content = width - 4;

    let top = match title.filter(|_| width >= 6) {
        Some(t) => {
            let label = format!(" {} ", truncate(t, width - 5));
            let fill = inner - 1 - visible_width(&label);
            format!("┌─{label}{}┐", "─".repeat(fill))
        }
        None => format!("┌{}┐", "─".repeat(inner)),
    };

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(top);
    for line in lines {
        out.push(format!("│ {} │", fit(line, content)));
    }
    out.push(format!("└{}┘", "─".repeat(inner)));
    out
}

/// Compose already-rendered panels side by side.
///
/// The result is as tall as the tallest panel. Each panel's own first-line
/// width decides its column width: shorter lines are padded to it and
/// missing rows of shorter panels render as blanks. Columns are joined by
/// `gap` spaces.
pub fn beside(panels: &[Vec<String>], gap: usize) -> Vec<String> {
    let height = panels.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = panels
        .iter()
        .map(|p| p.first().map(|l| visible_width(l)).unwrap_or(0))
        .collect();
    let joint = " ".repeat(gap);

    (0..height)
        .map(|row| {
            panels
                .iter()
                .zip(&widths)
                .map(|(panel, &w)| match panel.get(row) {
                    Some(line) => fit(line, w),
                    None => " ".repeat(w),
                })
                .collect::<Vec<_>>()
                .join(&joint)
        })
        .collect()
}

/// Stack side-by-side rows vertically, separated by `gap` blank lines.
pub fn grid(rows: &[Vec<String>], gap: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.extend(std::iter::repeat_with(String::new).take(gap));
        }
        out.extend(row.iter().cloned());
    }
    out
}

/// Split `total` columns into `count` column widths with `gap` columns
/// between neighbours, so that `sum(widths) + gap * (count - 1) == total`.
/// Any remainder from the division goes to the earliest columns, one unit
/// at a time.
pub fn split_width(total: usize, count: usize, gap: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let usable = total.saturating_sub(gap * (count - 1));
    let base = usable / count;
    let remainder = usable % count;
    (0..count).map(|i| base + usize::from(i < remainder)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::style;

    #[test]
    fn visible_width_ignores_escapes_and_counts_wide_chars() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width(&style::bold("hello")), 5);
        assert_eq!(visible_width("\u{4e16}\u{754c}"), 4); // two CJK cells
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn truncate_closes_styles_at_the_cut() {
        let styled = style::accent("abcdef");
        let cut = truncate(&styled, 3);
        assert_eq!(visible_width(&cut), 3);
        assert!(cut.ends_with(style::RESET));
    }

    #[test]
    fn fit_pads_and_truncates_to_exact_width() {
        assert_eq!(fit("ab", 5), "ab   ");
        assert_eq!(visible_width(&fit("abcdefgh", 5)), 5);
        assert_eq!(visible_width(&fit(&style::reverse("abcdefgh"), 5)), 5);
    }

    #[test]
    fn boxed_lines_all_have_the_requested_width() {
        for width in [4, 6, 11, 42] {
            let lines = vec!["one".to_string(), "a much longer content line".to_string()];
            for line in boxed(Some("X"), &lines, width) {
                assert_eq!(visible_width(&line), width, "width {width}: {line:?}");
            }
        }
    }

    #[test]
    fn boxed_embeds_the_title_in_the_top_border() {
        let out = boxed(Some("Treasury"), &[], 20);
        assert!(out[0].starts_with("┌─ Treasury "));
        assert!(out[0].ends_with('┐'));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn beside_pads_missing_rows_of_the_shorter_panel() {
        let left = boxed(None, &["a".to_string(), "b".to_string()], 6);
        let right = boxed(None, &["x".to_string()], 8);
        let joined = beside(&[left, right], 2);
        assert_eq!(joined.len(), 4);
        for line in &joined {
            assert_eq!(visible_width(line), 6 + 2 + 8);
        }
        // The shorter right panel's last row is all blanks.
        assert!(joined[3].ends_with(&" ".repeat(8)));
    }

    #[test]
    fn grid_inserts_blank_row_gaps() {
        let rows = vec![vec!["a".to_string()], vec!["b".to_string()]];
        assert_eq!(grid(&rows, 1), vec!["a", "", "b"]);
        assert_eq!(grid(&rows, 0), vec!["a", "b"]);
    }

    #[test]
    fn split_width_accounts_for_gaps_and_remainders() {
        assert_eq!(split_width(100, 3, 2), vec![32, 32, 32]);
        assert_eq!(split_width(10, 3, 1), vec![3, 3, 2]);
        assert_eq!(split_width(7, 2, 1), vec![3, 3]);
        assert_eq!(split_width(0, 3, 1), vec![0, 0, 0]);
        assert!(split_width(10, 0, 1).is_empty());
    }

    #[test]
    fn wrap_preserves_paragraph_breaks() {
        let lines = wrap("alpha beta gamma\n\ndelta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma", "", "delta"]);
    }
}
