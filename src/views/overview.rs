//! Overview tab: DAO summary and treasury, laid out as a panel grid.

use anyhow::{Context, Result};
use serde_json::json;

use super::{thousands, LoadResult, ViewContext};
use crate::ui::panel::{beside, boxed, grid, split_width};
use crate::ui::style;

pub async fn load(ctx: &ViewContext) -> Result<LoadResult> {
    let summary = ctx
        .provider
        .summary()
        .await
        .context("querying DAO summary")?;

    let widths = split_width(ctx.width, 2, 2);
    let (gov_w, token_w) = (widths[0], widths[1]);

    let governance = boxed(
        Some("Governance"),
        &[
            format!("Members            {}", thousands(u128::from(summary.members))),
            format!("Active proposals   {}", summary.active_proposals),
            format!("Quorum             {}%", summary.quorum_percent),
        ],
        gov_w,
    );
    let token = boxed(
        Some("Token"),
        &[
            format!("Symbol             {}", style::accent(&summary.token)),
            format!("Total supply       {}", thousands(summary.total_supply)),
        ],
        token_w,
    );

    let treasury_lines: Vec<String> = summary
        .treasury
        .iter()
        .map(|b| format!("{:<8} {:>18}", b.denom, thousands(b.amount)))
        .collect();
    let treasury = boxed(Some("Treasury"), &treasury_lines, ctx.width);

    let mut lines = vec![String::new(), format!("  {}", style::bold(&summary.name))];
    lines.push(String::new());
    lines.extend(grid(&[beside(&[governance, token], 2), treasury], 1));

    Ok(LoadResult {
        data: Some(json!(summary)),
        ..LoadResult::from_lines(lines)
    })
}
