//! # UI Module
//!
//! The full-screen terminal dashboard: state machine, compositor, layout
//! primitives and terminal plumbing.
//!
//! ## Components
//!
//! - [`Engine`] - View state machine: navigation, cache, load generations
//! - [`mod@frame`] - Frame compositor producing exact-size line vectors
//! - [`mod@panel`] - Width-aware layout primitives (boxes, columns, grids)
//! - [`mod@input`] - Raw byte to key action decoder
//! - [`mod@term`] - Raw mode / alternate screen lifecycle and frame output
//! - [`mod@style`] - ANSI styling helpers
//!
//! ## Layout
//!
//! Every frame has the same chrome:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  Tab bar                                        │
//! ├─────────────────────────────────────────────────┤
//! │                                                 │
//! │  Body (scrollable; single or dual panel)        │
//! │                                                 │
//! ├─────────────────────────────────────────────────┤
//! │  Status bar (key hints · scroll progress)       │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod frame;
pub mod input;
pub mod panel;
pub mod style;
pub mod term;

pub use engine::Engine;
