//! # Terminal I/O
//!
//! Owns the raw-mode lifecycle and frame output. Entering interactive mode
//! switches to the alternate screen buffer and hides the cursor; leaving
//! restores both. Both transitions are idempotent, and [`Screen`] restores
//! the terminal on drop so an early error cannot strand the user in raw
//! mode.
//!
//! A frame is written as one coalesced, queued write: cursor to origin,
//! each line preceded by a line clear, lines joined by `\r\n`, one flush.
//! That keeps a full redraw flicker-free without tracking damage.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};
use tokio::sync::mpsc;

/// Handle on the interactive terminal.
pub struct Screen {
    out: Stdout,
    active: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            active: false,
        }
    }

    /// Enter raw interactive mode: alternate screen, hidden cursor.
    /// Calling it twice is a no-op.
    pub fn enter(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode().context("Failed to enable raw mode for terminal")?;
        queue!(self.out, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        self.out.flush().context("Failed to flush terminal setup")?;
        self.active = true;
        Ok(())
    }

    /// Leave raw interactive mode and restore the cursor. Idempotent.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode().context("Failed to disable raw mode")?;
        queue!(self.out, LeaveAlternateScreen, Show).context("Failed to restore terminal")?;
        self.out.flush().context("Failed to flush terminal restore")?;
        Ok(())
    }

    /// Current terminal size as `(cols, rows)`.
    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("Failed to query terminal size")
    }

    /// Write one frame. The whole frame is queued and flushed as a single
    /// write so the terminal never shows a half-drawn state.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        queue!(self.out, MoveTo(0, 0)).context("Failed to reposition cursor")?;
        for (i, line) in lines.iter().enumerate() {
            queue!(self.out, Clear(ClearType::CurrentLine), Print(line))
                .context("Failed to queue frame line")?;
            if i + 1 < lines.len() {
                queue!(self.out, Print("\r\n")).context("Failed to queue line break")?;
            }
        }
        self.out.flush().context("Failed to flush frame")
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        // Last-resort restore; errors are moot at this point.
        let _ = self.leave();
    }
}

/// Restore the terminal without a [`Screen`] handle. Used by the panic hook,
/// which cannot reach the screen owned by the run loop.
pub fn emergency_restore() {
    let _ = disable_raw_mode();
    let mut out = io::stdout();
    let _ = queue!(out, LeaveAlternateScreen, Show);
    let _ = out.flush();
}

/// Subscribe to terminal resize notifications.
///
/// Returns a channel that yields one unit message per size change. The
/// backing task exits when the receiver is dropped, which is the
/// unsubscribe handle.
pub fn resize_events() -> Result<mpsc::UnboundedReceiver<()>> {
    let (tx, rx) = mpsc::unbounded_channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut winch =
            signal(SignalKind::window_change()).context("Failed to install SIGWINCH handler")?;
        tokio::spawn(async move {
            while winch.recv().await.is_some() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
    }

    #[cfg(not(unix))]
    {
        // No resize signal on this platform; the channel simply never fires.
        drop(tx);
    }

    Ok(rx)
}
