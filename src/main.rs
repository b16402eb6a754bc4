//! # daoscope CLI Entry Point
//!
//! ## Overview
//!
//! daoscope is a full-screen, read-only terminal dashboard for DAO
//! governance: a tabbed view over the DAO summary, its proposals and wallet
//! balances, backed by a chain data provider. Views load asynchronously so
//! the interface never blocks on a slow query.
//!
//! ## Usage
//!
//! ```bash
//! # Open on the overview tab
//! daoscope
//!
//! # Open on a specific tab
//! daoscope --tab proposals
//!
//! # Write structured logs to a file (watch with `tail -f`)
//! daoscope --log-file /tmp/daoscope.log
//! ```
//!
//! ## Key Bindings
//!
//! - `q` / `Ctrl+C` - Quit
//! - `Tab` / `Shift+Tab` - Next / previous tab
//! - `n` / `p` - Next / previous item (proposal selection, wallet account)
//! - `j` / `k`, arrows - Scroll by line
//! - `PageUp` / `PageDown` - Scroll by page
//! - `g` / `G`, Home / End - Jump to top / bottom
//! - `Enter` - Open the selected proposal
//! - `Backspace` / `Esc` - Back out of a drill-down
//! - `r` - Refresh the current view
//! - `x` - Toggle raw/export mode

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use daoscope::config::Config;
use daoscope::provider::demo::DemoProvider;
use daoscope::provider::ChainProvider;
use daoscope::ui::engine::{self, Engine};
use daoscope::ui::term::{self, Screen};
use daoscope::views::Tab;

/// daoscope - a read-only terminal dashboard for DAO governance
#[derive(Parser, Debug)]
#[command(name = "daoscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A terminal dashboard for DAO governance", long_about = None)]
struct Args {
    /// Tab to open on startup (overview, proposals, wallet)
    #[arg(short, long, value_name = "TAB")]
    tab: Option<String>,

    /// Write structured logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Simulated provider latency in milliseconds
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    if let Some(path) = args.log_file.as_ref().or(config.log_file.as_ref()) {
        daoscope::logging::init(path)?;
    }

    let tab_name = args.tab.as_deref().unwrap_or(&config.default_tab);
    let tab = Tab::parse(tab_name)
        .ok_or_else(|| anyhow!("Unknown tab: {tab_name} (expected overview, proposals or wallet)"))?;
    let latency = Duration::from_millis(args.latency_ms.unwrap_or(config.latency_ms));

    // Set up panic hook to ensure the terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        term::emergency_restore();
        original_hook(panic_info);
    }));

    let result = run_application(tab, latency).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

async fn run_application(tab: Tab, latency: Duration) -> Result<()> {
    info!(?tab, latency_ms = latency.as_millis() as u64, "starting dashboard");
    let provider: Arc<dyn ChainProvider> = Arc::new(DemoProvider::with_latency(latency));

    let mut screen = Screen::new();
    screen.enter().context("Failed to set up terminal")?;

    // Run the dashboard and ensure cleanup happens even on error
    let run_result = run_dashboard(&mut screen, provider, tab).await;
    let cleanup_result = screen.leave();

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

async fn run_dashboard(
    screen: &mut Screen,
    provider: Arc<dyn ChainProvider>,
    tab: Tab,
) -> Result<()> {
    let size = screen.size().context("Failed to query terminal size")?;
    let (mut engine, channels) = Engine::new(provider, tab, size);
    engine::run(&mut engine, screen, channels).await
}
