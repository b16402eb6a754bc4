//! # Input Decoder
//!
//! Turns raw stdin byte chunks into semantic [`KeyAction`]s. The decoder is
//! a small, time-free state machine (idle → pending-escape → resolved): a
//! lone `ESC` byte is ambiguous between the Escape key and the start of a
//! multi-byte sequence, so it arms a grace timer owned by the run loop. If
//! no continuation arrives before [`ESCAPE_GRACE`] elapses, the loop calls
//! [`Decoder::timeout`] and a single `Back` action fires; a recognised
//! continuation cancels the timer and its own mapping wins.
//!
//! Unrecognised input decodes to [`Decoded::Ignored`] and is dropped
//! silently.

use std::time::Duration;

/// How long a lone escape byte may wait for a continuation sequence.
pub const ESCAPE_GRACE: Duration = Duration::from_millis(50);

/// The closed set of semantic key actions understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NextTab,
    PrevTab,
    NextItem,
    PrevItem,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Confirm,
    Back,
    Refresh,
    ToggleRaw,
}

/// Outcome of feeding one raw byte chunk to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// The chunk mapped to a key action.
    Action(KeyAction),
    /// A lone escape byte arrived; arm the grace timer and feed the next
    /// chunk (or call [`Decoder::timeout`]) to resolve it.
    AwaitEscape,
    /// Unrecognised input, dropped silently.
    Ignored,
}

/// Stateful byte-chunk decoder. One per input stream.
#[derive(Debug, Default)]
pub struct Decoder {
    pending_escape: bool,
}

impl Decoder {
    /// True while a lone escape byte is waiting for its grace timer.
    pub fn escape_pending(&self) -> bool {
        self.pending_escape
    }

    /// Decode one raw chunk. A chunk that continues a pending escape is
    /// joined with it before matching.
    pub fn feed(&mut self, bytes: &[u8]) -> Decoded {
        if bytes.is_empty() {
            return Decoded::Ignored;
        }

        if self.pending_escape {
            self.pending_escape = false;
            if bytes == [0x1b] {
                // A second lone escape resolves the first as Back and is
                // itself ambiguous again.
                self.pending_escape = true;
                return Decoded::Action(KeyAction::Back);
            }
            return map_sequence(bytes);
        }

        if bytes == [0x1b] {
            self.pending_escape = true;
            return Decoded::AwaitEscape;
        }
        if let Some(rest) = bytes.strip_prefix(&[0x1b]) {
            return map_sequence(rest);
        }
        map_byte(bytes[0])
    }

    /// The grace timer elapsed with no continuation: a pending escape
    /// resolves to `Back`. Idempotent when nothing is pending.
    pub fn timeout(&mut self) -> Option<KeyAction> {
        if self.pending_escape {
            self.pending_escape = false;
            Some(KeyAction::Back)
        } else {
            None
        }
    }
}

/// Map the bytes following an escape character.
fn map_sequence(rest: &[u8]) -> Decoded {
    let action = match rest {
        b"[A" => KeyAction::LineUp,
        b"[B" => KeyAction::LineDown,
        b"[5~" => KeyAction::PageUp,
        b"[6~" => KeyAction::PageDown,
        b"[H" => KeyAction::Top,
        b"[F" => KeyAction::Bottom,
        b"[Z" => KeyAction::PrevTab, // shift-tab
        _ => return Decoded::Ignored,
    };
    Decoded::Action(action)
}

/// Map a standalone byte.
fn map_byte(byte: u8) -> Decoded {
    let action = match byte {
        b'q' | 0x03 => KeyAction::Quit, // ctrl-c arrives as a raw byte
        b'\t' => KeyAction::NextTab,
        b'n' => KeyAction::NextItem,
        b'p' => KeyAction::PrevItem,
        b'k' => KeyAction::LineUp,
        b'j' => KeyAction::LineDown,
        b'g' => KeyAction::Top,
        b'G' => KeyAction::Bottom,
        b'\r' | b'\n' => KeyAction::Confirm,
        0x7f | 0x08 => KeyAction::Back, // backspace / delete
        b'r' => KeyAction::Refresh,
        b'x' => KeyAction::ToggleRaw,
        _ => return Decoded::Ignored,
    };
    Decoded::Action(action)
}
