//! Proposals tab: selectable proposal list plus the proposal drill-down.
//!
//! The drill-down is the engine's one dual-panel view: the wrapped
//! description scrolls on the left while the vote tally panel rides the
//! same offset on the right.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

use super::{thousands, LoadResult, ViewContext, ViewId};
use crate::provider::{Proposal, ProposalStatus, Tally};
use crate::ui::panel::{boxed, fit, wrap};
use crate::ui::style;

/// Rows above the first selectable proposal line.
const LIST_HEADER_ROWS: usize = 3;

/// Width of the tally panel in the drill-down, gap included.
const TALLY_PANEL_WIDTH: usize = 30;

pub async fn load(ctx: &ViewContext) -> Result<LoadResult> {
    let proposals = ctx
        .provider
        .proposals()
        .await
        .context("querying proposals")?;

    let selected = if proposals.is_empty() {
        0
    } else {
        ctx.cursor % proposals.len()
    };

    let mut lines = vec![
        String::new(),
        format!(
            "  {}",
            style::dim("ID   STATUS     TITLE")
        ),
        String::new(),
    ];

    for (i, p) in proposals.iter().enumerate() {
        // fit() instead of format-width padding: the styled status embeds
        // escape bytes that `{:<9}` would count as columns.
        let row = format!(
            "  #{:<3} {}  {} {}",
            p.id,
            fit(&status_styled(p.status), 9),
            fit(&p.title, 44),
            ends_label(p)
        );
        if i == selected {
            lines.push(style::reverse(&row));
        } else {
            lines.push(row);
        }
    }
    if proposals.is_empty() {
        lines.push("  No proposals on chain.".to_string());
    }

    let targets: Vec<ViewId> = proposals.iter().map(|p| ViewId::Proposal(p.id)).collect();

    Ok(LoadResult {
        data: Some(json!(proposals)),
        cursor_line: (!targets.is_empty()).then_some(LIST_HEADER_ROWS + selected),
        targets,
        ..LoadResult::from_lines(lines)
    })
}

/// Proposal drill-down: description left, tally panel right.
pub async fn detail(id: u64, ctx: &ViewContext) -> Result<LoadResult> {
    let p = ctx
        .provider
        .proposal(id)
        .await
        .with_context(|| format!("querying proposal {id}"))?;

    let left_width = ctx.width.saturating_sub(TALLY_PANEL_WIDTH + 1).max(20);

    let mut lines = vec![
        String::new(),
        format!("  {}", style::bold(&format!("#{}  {}", p.id, p.title))),
        String::new(),
        format!("  Status      {}", status_styled(p.status)),
        format!("  Submitted   {}", p.submitted.format("%Y-%m-%d %H:%M UTC")),
        format!("  Voting end  {}", p.voting_end.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
    ];
    for wrapped in wrap(&p.description, left_width.saturating_sub(4)) {
        lines.push(format!("  {wrapped}"));
    }

    let secondary = tally_panel(&p.tally);

    Ok(LoadResult {
        secondary: Some(secondary),
        data: Some(json!(p)),
        ..LoadResult::from_lines(lines)
    })
}

fn tally_panel(tally: &Tally) -> Vec<String> {
    let total = tally.total().max(1);
    let row = |label: &str, votes: u128| {
        format!(
            "{:<8} {:>12}  {:>3}%",
            label,
            thousands(votes),
            votes * 100 / total
        )
    };
    boxed(
        Some("Tally"),
        &[
            row("yes", tally.yes),
            row("no", tally.no),
            row("abstain", tally.abstain),
            row("veto", tally.veto),
            String::new(),
            format!("{:<8} {:>12}", "total", thousands(tally.total())),
        ],
        TALLY_PANEL_WIDTH,
    )
}

fn status_styled(status: ProposalStatus) -> String {
    let label = status.label();
    match status {
        ProposalStatus::Voting | ProposalStatus::Deposit => style::warn(label),
        ProposalStatus::Passed | ProposalStatus::Executed => style::good(label),
        ProposalStatus::Rejected => style::bad(label),
    }
}

fn ends_label(p: &Proposal) -> String {
    let now = Utc::now();
    if p.voting_end > now {
        let days = (p.voting_end - now).num_days();
        format!("ends in {days}d")
    } else {
        let days = (now - p.voting_end).num_days();
        format!("ended {days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::demo::DemoProvider;
    use crate::ui::panel::visible_width;
    use crate::views::EngineRequest;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn ctx(cursor: usize) -> ViewContext {
        let (tx, _rx) = mpsc::unbounded_channel::<EngineRequest>();
        ViewContext::new(100, 24, cursor, 0, Arc::new(DemoProvider::new()), tx)
    }

    #[tokio::test]
    async fn list_reports_one_target_per_proposal() {
        let result = load(&ctx(0)).await.expect("demo load succeeds");
        assert_eq!(result.selectable_count(), 3);
        assert_eq!(result.targets[0], ViewId::Proposal(12));
        assert_eq!(result.cursor_line, Some(LIST_HEADER_ROWS));
    }

    #[tokio::test]
    async fn cursor_wraps_around_the_proposal_count() {
        let result = load(&ctx(4)).await.expect("demo load succeeds");
        // Cursor 4 over 3 proposals selects row 1.
        assert_eq!(result.cursor_line, Some(LIST_HEADER_ROWS + 1));
        let selected = &result.lines[LIST_HEADER_ROWS + 1];
        assert!(selected.starts_with("\x1b[7m"), "not reversed: {selected:?}");
    }

    #[tokio::test]
    async fn detail_is_dual_panel_with_a_fixed_width_tally() {
        let result = detail(12, &ctx(0)).await.expect("demo load succeeds");
        let secondary = result.secondary.expect("detail has a tally panel");
        for line in &secondary {
            assert_eq!(visible_width(line), TALLY_PANEL_WIDTH);
        }
        assert!(secondary.iter().any(|l| l.contains("yes")));
        assert!(result.lines.iter().any(|l| l.contains("Raise validator")));
        assert!(result.targets.is_empty());
    }

    #[tokio::test]
    async fn detail_of_unknown_proposal_fails() {
        assert!(detail(999, &ctx(0)).await.is_err());
    }
}
