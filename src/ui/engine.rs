//! # View State Machine
//!
//! The orchestrator: owns navigation state, the per-view render cache and
//! the load generation counter, and decides what the frame compositor gets
//! to show.
//!
//! ## Concurrency model
//!
//! Everything here runs on one logical thread. A view load is spawned as a
//! task and its completion comes back over a channel; the run loop stays
//! responsive to input while the load is in flight. A load captures the
//! generation counter when it starts, and [`Engine::complete`] applies a
//! result only if the counter is unchanged. Navigation during the await
//! bumps it, so a superseded load's result is discarded without any state
//! mutation. The engine never cancels the provider call itself; it simply
//! disregards the stale result.
//!
//! ## Failure semantics
//!
//! Provider failures are recovered locally: the body becomes a short error
//! block with a retry hint and nothing is cached. Only failures outside the
//! load boundary unwind out of the run loop, through main's terminal
//! cleanup, to a non-zero exit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::provider::ChainProvider;
use crate::ui::frame::{self, FrameInput};
use crate::ui::input::{Decoded, Decoder, KeyAction, ESCAPE_GRACE};
use crate::ui::term::{self, Screen};
use crate::views::{self, EngineRequest, LoadResult, Tab, ViewContext, ViewId};

/// How long a cached view render stays servable.
pub const CACHE_TTL: Duration = Duration::from_secs(30);

/// Navigation and display state. Mutated exclusively by the engine.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    /// Line index of the first visible body row.
    pub scroll: usize,
    /// Selection position within a selectable view.
    pub cursor: usize,
    /// Drill-down stack; empty means the top-level tab view.
    pub stack: Vec<ViewId>,
    /// Raw/export mode: serialize the structured payload, bypass the cache.
    pub raw: bool,
    /// Wallet account cycling index.
    pub account: usize,
}

struct CacheEntry {
    lines: Vec<String>,
    secondary: Option<Vec<String>>,
    created: Instant,
}

/// Completion of one spawned view load.
#[derive(Debug)]
pub struct LoadDone {
    /// Generation captured when the load started.
    pub generation: u64,
    pub view: ViewId,
    pub result: Result<LoadResult>,
}

/// Receiving ends of the engine's event channels, driven by the run loop.
pub struct EngineChannels {
    pub completions: mpsc::UnboundedReceiver<LoadDone>,
    pub requests: mpsc::UnboundedReceiver<EngineRequest>,
}

pub struct Engine {
    provider: Arc<dyn ChainProvider>,
    state: AppState,
    cache: HashMap<ViewId, CacheEntry>,
    ttl: Duration,
    /// Bumped per load; only the latest load's completion is applied.
    generation: u64,
    loading: bool,
    quit: bool,
    /// Content currently on screen.
    lines: Vec<String>,
    secondary: Option<Vec<String>>,
    /// Drill targets per view, refreshed by each successful load.
    targets: HashMap<ViewId, Vec<ViewId>>,
    /// Account count last reported by the wallet view.
    accounts: usize,
    /// Set by selection cycling; resolved once the reload lands.
    pending_cursor_scroll: bool,
    size: (u16, u16),
    completions_tx: mpsc::UnboundedSender<LoadDone>,
    requests_tx: mpsc::UnboundedSender<EngineRequest>,
}

impl Engine {
    pub fn new(
        provider: Arc<dyn ChainProvider>,
        tab: Tab,
        size: (u16, u16),
    ) -> (Self, EngineChannels) {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let engine = Self {
            provider,
            state: AppState {
                tab,
                scroll: 0,
                cursor: 0,
                stack: Vec::new(),
                raw: false,
                account: 0,
            },
            cache: HashMap::new(),
            ttl: CACHE_TTL,
            generation: 0,
            loading: false,
            quit: false,
            lines: Vec::new(),
            secondary: None,
            targets: HashMap::new(),
            accounts: 0,
            pending_cursor_scroll: false,
            size,
            completions_tx,
            requests_tx,
        };
        (
            engine,
            EngineChannels {
                completions,
                requests,
            },
        )
    }

    /// Override the cache time-to-live (tests shrink it to force reloads).
    pub fn set_cache_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn content(&self) -> &[String] {
        &self.lines
    }

    pub fn secondary(&self) -> Option<&[String]> {
        self.secondary.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a cache entry exists for `view`, fresh or not.
    pub fn cached(&self, view: ViewId) -> bool {
        self.cache.contains_key(&view)
    }

    /// The view currently shown: top of the drill-down stack, else the tab.
    pub fn current_view(&self) -> ViewId {
        self.state
            .stack
            .last()
            .copied()
            .unwrap_or(ViewId::Tab(self.state.tab))
    }

    /// Compose the current frame.
    pub fn frame(&self) -> Vec<String> {
        let input = FrameInput {
            tab: self.state.tab,
            depth: self.state.stack.len(),
            raw: self.state.raw,
            loading: self.loading,
            scroll: self.state.scroll,
            lines: &self.lines,
            secondary: self.secondary.as_deref(),
        };
        frame::compose(&input, usize::from(self.size.0), usize::from(self.size.1))
    }

    /// Apply one semantic key action.
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.quit = true,
            KeyAction::NextTab => self.switch_tab(self.state.tab.next()),
            KeyAction::PrevTab => self.switch_tab(self.state.tab.prev()),
            KeyAction::NextItem => self.cycle_item(1),
            KeyAction::PrevItem => self.cycle_item(-1),
            KeyAction::LineUp => self.scroll_by(-1),
            KeyAction::LineDown => self.scroll_by(1),
            KeyAction::PageUp => self.scroll_by(-(self.viewport_height() as i64)),
            KeyAction::PageDown => self.scroll_by(self.viewport_height() as i64),
            KeyAction::Top => self.state.scroll = 0,
            KeyAction::Bottom => self.state.scroll = self.max_scroll(),
            KeyAction::Confirm => self.confirm(),
            KeyAction::Back => self.back(),
            KeyAction::Refresh => self.refresh(),
            KeyAction::ToggleRaw => {
                self.state.raw = !self.state.raw;
                self.state.scroll = 0;
                self.start_load(true);
            }
        }
    }

    /// Handle a request pushed back by a view.
    pub fn handle_request(&mut self, request: EngineRequest) {
        match request {
            EngineRequest::Navigate(ViewId::Tab(tab)) => self.switch_tab(tab),
            EngineRequest::Navigate(id) => {
                // Keep the stack invariant: a drill-down always belongs to
                // the active tab.
                self.state.tab = id.tab();
                self.push_view(id);
            }
            EngineRequest::Refresh => self.refresh(),
        }
    }

    /// Resolve the current view and load its content.
    ///
    /// Unless forced (or in raw mode, which bypasses the cache entirely), a
    /// cache entry younger than the TTL is served without invoking the
    /// view. Otherwise the load runs as a spawned task; its completion is
    /// fed back through [`Engine::complete`].
    pub fn start_load(&mut self, force: bool) {
        let view = self.current_view();

        if !force && !self.state.raw {
            if let Some(entry) = self.cache.get(&view) {
                if entry.created.elapsed() < self.ttl {
                    debug!(?view, "serving cached render");
                    // A cache hit resolves the current view too: any load
                    // still in flight is now for a view the user has left,
                    // so its generation must stop being current.
                    self.generation += 1;
                    self.lines = entry.lines.clone();
                    self.secondary = entry.secondary.clone();
                    self.loading = false;
                    self.clamp_scroll();
                    return;
                }
            }
        }

        self.loading = true;
        self.generation += 1;
        let generation = self.generation;
        let ctx = ViewContext::new(
            usize::from(self.size.0),
            self.viewport_height(),
            self.state.cursor,
            self.state.account,
            Arc::clone(&self.provider),
            self.requests_tx.clone(),
        );
        let tx = self.completions_tx.clone();
        debug!(?view, generation, "starting view load");
        tokio::spawn(async move {
            let result = views::load(view, ctx).await;
            // The engine may be gone on shutdown; nothing to do then.
            let _ = tx.send(LoadDone {
                generation,
                view,
                result,
            });
        });
    }

    /// Apply a finished load. A result whose generation is no longer
    /// current was superseded by navigation and is discarded untouched.
    pub fn complete(&mut self, done: LoadDone) {
        if done.generation != self.generation {
            debug!(
                stale = done.generation,
                current = self.generation,
                "discarding superseded load result"
            );
            return;
        }
        self.loading = false;

        match done.result {
            Ok(result) => {
                if let Some(count) = result.accounts {
                    self.accounts = count;
                }
                self.targets.insert(done.view, result.targets.clone());

                if self.state.raw {
                    self.lines = raw_lines(&result);
                    self.secondary = None;
                } else {
                    self.cache.insert(
                        done.view,
                        CacheEntry {
                            lines: result.lines.clone(),
                            secondary: result.secondary.clone(),
                            created: Instant::now(),
                        },
                    );
                    self.lines = result.lines;
                    self.secondary = result.secondary;
                }

                if self.pending_cursor_scroll {
                    if let Some(line) = result.cursor_line {
                        self.scroll_into_view(line);
                    }
                }
            }
            Err(err) => {
                warn!(view = ?done.view, error = %format!("{err:#}"), "view load failed");
                self.lines = error_block(&err);
                self.secondary = None;
            }
        }
        self.pending_cursor_scroll = false;
        self.clamp_scroll();
    }

    /// Terminal size changed: widths are stale, so the whole cache is.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        info!(cols, rows, "terminal resized");
        self.size = (cols, rows);
        self.cache.clear();
        self.clamp_scroll();
        self.start_load(false);
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.state.stack.clear();
        self.state.tab = tab;
        self.state.scroll = 0;
        self.state.cursor = 0;
        self.start_load(false);
    }

    fn push_view(&mut self, id: ViewId) {
        self.state.stack.push(id);
        self.state.scroll = 0;
        self.state.cursor = 0;
        self.start_load(false);
    }

    fn back(&mut self) {
        if self.state.stack.pop().is_some() {
            self.state.scroll = 0;
            self.state.cursor = 0;
            self.start_load(false);
        }
    }

    fn refresh(&mut self) {
        let view = self.current_view();
        self.cache.remove(&view);
        self.start_load(true);
    }

    fn confirm(&mut self) {
        let view = self.current_view();
        let target = self
            .targets
            .get(&view)
            .and_then(|t| t.get(self.state.cursor))
            .copied();
        if let Some(target) = target {
            self.push_view(target);
        }
    }

    /// Next/previous sub-item: account cycling on the wallet tab, selection
    /// cycling on selectable views, adjacent tab otherwise.
    fn cycle_item(&mut self, step: i64) {
        let view = self.current_view();

        if view == ViewId::Tab(Tab::Wallet) && self.accounts > 0 {
            let count = self.accounts as i64;
            self.state.account = (self.state.account as i64 + step).rem_euclid(count) as usize;
            self.cache.remove(&view);
            self.start_load(true);
            return;
        }

        let count = self.targets.get(&view).map_or(0, Vec::len) as i64;
        if count > 0 {
            self.state.cursor = (self.state.cursor as i64 + step).rem_euclid(count) as usize;
            self.pending_cursor_scroll = true;
            self.cache.remove(&view);
            self.start_load(true);
        } else if step >= 0 {
            self.switch_tab(self.state.tab.next());
        } else {
            self.switch_tab(self.state.tab.prev());
        }
    }

    fn viewport_height(&self) -> usize {
        usize::from(self.size.1).saturating_sub(3)
    }

    fn total_lines(&self) -> usize {
        let right = self.secondary.as_ref().map_or(0, Vec::len);
        self.lines.len().max(right)
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.viewport_height())
    }

    fn scroll_by(&mut self, delta: i64) {
        let target = (self.state.scroll as i64 + delta).max(0) as usize;
        self.state.scroll = target.min(self.max_scroll());
    }

    fn clamp_scroll(&mut self) {
        self.state.scroll = self.state.scroll.min(self.max_scroll());
    }

    /// Adjust scroll so `line` is inside the viewport.
    fn scroll_into_view(&mut self, line: usize) {
        let viewport = self.viewport_height();
        if line < self.state.scroll {
            self.state.scroll = line;
        } else if viewport > 0 && line >= self.state.scroll + viewport {
            self.state.scroll = line + 1 - viewport;
        }
    }
}

/// Human-readable error body with a retry hint.
fn error_block(err: &anyhow::Error) -> Vec<String> {
    vec![
        String::new(),
        format!("  Error: {err:#}"),
        String::new(),
        "  Press 'r' to retry.".to_string(),
    ]
}

/// Raw/export rendering: one compact JSON line per record for array
/// payloads, pretty-printed JSON otherwise, the rendered lines as fallback.
fn raw_lines(result: &LoadResult) -> Vec<String> {
    match &result.data {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| serde_json::to_string(item).unwrap_or_else(|_| "null".to_string()))
            .collect(),
        Some(value) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| "null".to_string())
            .lines()
            .map(str::to_string)
            .collect(),
        None => result.lines.clone(),
    }
}

/// SIGTERM (or nothing, on platforms without it).
async fn terminated() {
    #[cfg(unix)]
    if let Ok(mut sig) = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
        sig.recv().await;
        return;
    }
    std::future::pending::<()>().await;
}

/// Drive the engine against the real terminal: stdin bytes, the escape
/// grace timer, resize notifications, load completions, view requests and
/// termination signals, drawing one frame after every handled event.
pub async fn run(engine: &mut Engine, screen: &mut Screen, mut channels: EngineChannels) -> Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut resize = term::resize_events()?;
    let mut decoder = Decoder::default();
    let mut buf = [0u8; 64];
    let mut escape_deadline: Option<tokio::time::Instant> = None;

    engine.start_load(false);
    screen.draw(&engine.frame())?;

    while !engine.should_quit() {
        tokio::select! {
            read = stdin.read(&mut buf) => {
                let n = read.context("Failed to read terminal input")?;
                if n == 0 {
                    info!("stdin closed");
                    break;
                }
                let decoded = decoder.feed(&buf[..n]);
                // A double escape resolves to Back and re-arms, so the
                // deadline tracks the decoder's pending state, not the
                // decode outcome.
                escape_deadline = decoder
                    .escape_pending()
                    .then(|| tokio::time::Instant::now() + ESCAPE_GRACE);
                if let Decoded::Action(action) = decoded {
                    engine.apply(action);
                }
            }
            () = tokio::time::sleep_until(
                escape_deadline.unwrap_or_else(tokio::time::Instant::now)
            ), if escape_deadline.is_some() => {
                escape_deadline = None;
                if let Some(action) = decoder.timeout() {
                    engine.apply(action);
                }
            }
            Some(()) = resize.recv() => {
                let (cols, rows) = screen.size()?;
                engine.resize(cols, rows);
            }
            Some(done) = channels.completions.recv() => engine.complete(done),
            Some(request) = channels.requests.recv() => engine.handle_request(request),
            _ = tokio::signal::ctrl_c() => break,
            () = terminated() => {
                info!("received termination signal");
                break;
            }
        }
        screen.draw(&engine.frame())?;
    }

    Ok(())
}
