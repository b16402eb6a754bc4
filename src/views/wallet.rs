//! Wallet tab: balances for one of the provider's accounts, cycled with
//! next/previous-item. The account index lives in the engine's state; the
//! view reports the account count back so cycling can wrap.

use anyhow::{Context, Result};
use serde_json::json;

use super::{thousands, LoadResult, ViewContext};
use crate::ui::panel::boxed;
use crate::ui::style;

pub async fn load(ctx: &ViewContext) -> Result<LoadResult> {
    let accounts = ctx
        .provider
        .accounts()
        .await
        .context("querying wallet accounts")?;

    if accounts.is_empty() {
        return Ok(LoadResult {
            accounts: Some(0),
            ..LoadResult::from_lines(vec![
                String::new(),
                "  No accounts configured.".to_string(),
            ])
        });
    }

    let index = ctx.account % accounts.len();
    let account = &accounts[index];
    let balances = ctx
        .provider
        .balances(&account.address)
        .await
        .with_context(|| format!("querying balances for {}", account.address))?;

    let balance_lines: Vec<String> = balances
        .iter()
        .map(|b| format!("{:<8} {:>18}", b.denom, thousands(b.amount)))
        .collect();

    let mut lines = vec![
        String::new(),
        format!("  {}", style::bold(&account.name)),
        format!("  {}", style::dim(&account.address)),
        format!("  account {}/{}", index + 1, accounts.len()),
        String::new(),
    ];
    lines.extend(boxed(Some("Balances"), &balance_lines, ctx.width.min(40)));

    Ok(LoadResult {
        data: Some(json!({ "account": account, "balances": balances })),
        accounts: Some(accounts.len()),
        ..LoadResult::from_lines(lines)
    })
}
