//! # Views
//!
//! Content providers for each tab and drill-down. A view takes a
//! [`ViewContext`] (viewport size, selection/account indices, provider
//! handle, engine request channel) and produces a [`LoadResult`]: the
//! primary line stream, an optional secondary stream for dual-panel
//! layouts, and an optional structured payload for raw/export mode.
//!
//! Dispatch over [`ViewId`] is a closed match, never an open registry, so
//! every reachable view is known at compile time.

pub mod overview;
pub mod proposals;
pub mod wallet;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::provider::ChainProvider;

/// Top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    Proposals,
    Wallet,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Proposals, Tab::Wallet];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Proposals => "Proposals",
            Tab::Wallet => "Wallet",
        }
    }

    /// Adjacent tab to the right, wrapping.
    pub fn next(self) -> Tab {
        match self {
            Tab::Overview => Tab::Proposals,
            Tab::Proposals => Tab::Wallet,
            Tab::Wallet => Tab::Overview,
        }
    }

    /// Adjacent tab to the left, wrapping.
    pub fn prev(self) -> Tab {
        match self {
            Tab::Overview => Tab::Wallet,
            Tab::Proposals => Tab::Overview,
            Tab::Wallet => Tab::Proposals,
        }
    }

    /// Parse a tab name as given on the command line or in the config file.
    pub fn parse(name: &str) -> Option<Tab> {
        Tab::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(name))
    }
}

/// Identifier of the active view; also the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Tab(Tab),
    Proposal(u64),
}

impl ViewId {
    /// The tab a view belongs to. Drill-downs stay attached to the tab they
    /// were opened from.
    pub fn tab(self) -> Tab {
        match self {
            ViewId::Tab(tab) => tab,
            ViewId::Proposal(_) => Tab::Proposals,
        }
    }
}

/// Requests a view may push back at the engine while (or after) loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRequest {
    /// Open a drill-down view.
    Navigate(ViewId),
    /// Invalidate and reload the current view.
    Refresh,
}

/// Everything a view load gets to work with. A context is a snapshot taken
/// when the load starts; the engine's live state never leaks into the task.
#[derive(Clone)]
pub struct ViewContext {
    /// Body width in columns.
    pub width: usize,
    /// Body height in rows.
    pub height: usize,
    /// Selection index within a selectable view.
    pub cursor: usize,
    /// Wallet account cycling index.
    pub account: usize,
    pub provider: Arc<dyn ChainProvider>,
    requests: mpsc::UnboundedSender<EngineRequest>,
}

impl ViewContext {
    pub fn new(
        width: usize,
        height: usize,
        cursor: usize,
        account: usize,
        provider: Arc<dyn ChainProvider>,
        requests: mpsc::UnboundedSender<EngineRequest>,
    ) -> Self {
        Self {
            width,
            height,
            cursor,
            account,
            provider,
            requests,
        }
    }

    /// Ask the engine to open a drill-down view.
    pub fn navigate(&self, id: ViewId) {
        let _ = self.requests.send(EngineRequest::Navigate(id));
    }

    /// Ask the engine to invalidate and reload the current view.
    pub fn refresh(&self) {
        let _ = self.requests.send(EngineRequest::Refresh);
    }
}

/// Output contract of a view load.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    /// Primary (left) line stream.
    pub lines: Vec<String>,
    /// Secondary (right) stream; present only in dual-panel views.
    pub secondary: Option<Vec<String>>,
    /// Structured payload, used only while raw/export mode is active.
    pub data: Option<serde_json::Value>,
    /// Drill-down target per selectable row; empty when not selectable.
    pub targets: Vec<ViewId>,
    /// Line index of the currently selected row, for scroll-into-view.
    pub cursor_line: Option<usize>,
    /// Number of cyclable accounts, reported by the wallet view.
    pub accounts: Option<usize>,
}

impl LoadResult {
    /// A plain, non-selectable line sequence.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Number of selectable rows.
    pub fn selectable_count(&self) -> usize {
        self.targets.len()
    }
}

/// Group digits of a token amount for display (`1234567` → `1,234,567`).
pub(crate) fn thousands(amount: u128) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Load the content for `id`. Closed dispatch over the view identifier.
pub async fn load(id: ViewId, ctx: ViewContext) -> Result<LoadResult> {
    match id {
        ViewId::Tab(Tab::Overview) => overview::load(&ctx).await,
        ViewId::Tab(Tab::Proposals) => proposals::load(&ctx).await,
        ViewId::Tab(Tab::Wallet) => wallet::load(&ctx).await,
        ViewId::Proposal(pid) => proposals::detail(pid, &ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::demo::DemoProvider;

    #[test]
    fn context_callbacks_queue_requests_for_the_engine() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ctx = ViewContext::new(80, 24, 0, 0, Arc::new(DemoProvider::new()), tx);

        ctx.navigate(ViewId::Proposal(7));
        ctx.refresh();

        assert_eq!(
            rx.try_recv().expect("navigate request queued"),
            EngineRequest::Navigate(ViewId::Proposal(7))
        );
        assert_eq!(
            rx.try_recv().expect("refresh request queued"),
            EngineRequest::Refresh
        );
        assert!(rx.try_recv().is_err(), "no further requests");
    }

    #[test]
    fn tabs_wrap_in_both_directions() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
            assert_eq!(tab.prev().next(), tab);
        }
        assert_eq!(Tab::Wallet.next(), Tab::Overview);
    }

    #[test]
    fn tab_parse_is_case_insensitive() {
        assert_eq!(Tab::parse("wallet"), Some(Tab::Wallet));
        assert_eq!(Tab::parse("OVERVIEW"), Some(Tab::Overview));
        assert_eq!(Tab::parse("unknown"), None);
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn drill_downs_belong_to_their_tab() {
        assert_eq!(ViewId::Proposal(7).tab(), Tab::Proposals);
        assert_eq!(ViewId::Tab(Tab::Wallet).tab(), Tab::Wallet);
    }
}
