//! Property tests for the layout and compositing laws.
//!
//! These pin the arithmetic the whole interface leans on: column splits
//! always add back up to the total, fitted text always occupies its exact
//! width, boxes are rectangular, and a composed frame never exceeds the
//! terminal size no matter what content or scroll offset it is given.

use daoscope::ui::frame::{compose, FrameInput};
use daoscope::ui::panel::{boxed, fit, split_width, visible_width, wrap};
use daoscope::views::Tab;
use proptest::prelude::*;

proptest! {
    #[test]
    fn split_width_sums_back_to_the_total(
        total in 0usize..500,
        count in 1usize..8,
        gap in 0usize..5,
    ) {
        let widths = split_width(total, count, gap);
        prop_assert_eq!(widths.len(), count);

        let gaps = gap * (count - 1);
        if total >= gaps {
            let sum: usize = widths.iter().sum();
            prop_assert_eq!(sum + gaps, total);
        }

        // Remainder distribution keeps columns within one unit of each other.
        let widest = widths.iter().copied().max().unwrap_or(0);
        let narrowest = widths.iter().copied().min().unwrap_or(0);
        prop_assert!(widest - narrowest <= 1);
    }

    #[test]
    fn fit_always_produces_the_exact_display_width(
        text in "[ -~]{0,60}",
        width in 0usize..50,
    ) {
        prop_assert_eq!(visible_width(&fit(&text, width)), width);
    }

    #[test]
    fn boxed_output_is_rectangular(
        lines in prop::collection::vec("[ -~]{0,40}", 0..8),
        width in 0usize..60,
    ) {
        let lines: Vec<String> = lines;
        let out = boxed(Some("Panel"), &lines, width);
        prop_assert_eq!(out.len(), lines.len() + 2);
        let expect = width.max(4);
        for line in &out {
            prop_assert_eq!(visible_width(line), expect);
        }
    }

    #[test]
    fn wrap_respects_the_width_for_fitting_words(
        words in prop::collection::vec("[a-z]{1,8}", 1..30),
        width in 8usize..40,
    ) {
        let text = words.join(" ");
        for line in wrap(&text, width) {
            prop_assert!(visible_width(&line) <= width);
        }
    }

    #[test]
    fn composed_frames_never_exceed_the_terminal(
        line_count in 0usize..200,
        scroll in 0usize..250,
        cols in 10usize..200,
        rows in 4usize..60,
        loading in any::<bool>(),
    ) {
        let lines: Vec<String> = (0..line_count).map(|i| format!("content line {i}")).collect();
        let input = FrameInput {
            tab: Tab::Proposals,
            depth: 0,
            raw: false,
            loading,
            scroll,
            lines: &lines,
            secondary: None,
        };
        let frame = compose(&input, cols, rows);
        prop_assert_eq!(frame.len(), rows);
        for line in &frame {
            prop_assert!(visible_width(line) <= cols);
        }
    }
}
