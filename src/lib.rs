//! daoscope - a read-only terminal dashboard for DAO governance
//!
//! This library provides the dashboard engine: views over on-chain
//! governance data (summary, proposals, wallet balances), a frame
//! compositor, and the state machine that keeps async loads, caching and
//! navigation coherent.

pub mod config;
pub mod logging;
pub mod provider;
pub mod ui;
pub mod views;
