//! # Chain Provider Boundary
//!
//! The engine is read-only: everything it shows comes from a
//! [`ChainProvider`], the seam behind which the actual blockchain query SDK
//! lives. The engine never decodes chain data itself; it receives the
//! already-typed records below and leaves formatting to the views.
//!
//! [`demo::DemoProvider`] is an in-process stand-in with deterministic data
//! and simulated latency, used by default and by the test suite.

pub mod demo;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token amount in a given denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub denom: String,
    pub amount: u128,
}

/// Top-level DAO state shown on the overview tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaoSummary {
    pub name: String,
    pub token: String,
    pub total_supply: u128,
    pub members: u64,
    pub active_proposals: u64,
    pub quorum_percent: u8,
    pub treasury: Vec<Balance>,
}

/// Lifecycle of a governance proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Deposit,
    Voting,
    Passed,
    Rejected,
    Executed,
}

impl ProposalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Voting => "voting",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
        }
    }
}

/// Vote tally for one proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: u128,
    pub no: u128,
    pub abstain: u128,
    pub veto: u128,
}

impl Tally {
    pub fn total(&self) -> u128 {
        self.yes + self.no + self.abstain + self.veto
    }
}

/// A governance proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub status: ProposalStatus,
    pub submitted: DateTime<Utc>,
    pub voting_end: DateTime<Utc>,
    pub description: String,
    pub tally: Tally,
}

/// A wallet account known to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub address: String,
}

/// Read-only queries against the chain. All calls may suspend and all may
/// fail; the engine recovers failures locally as display state.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn summary(&self) -> Result<DaoSummary>;
    async fn proposals(&self) -> Result<Vec<Proposal>>;
    async fn proposal(&self, id: u64) -> Result<Proposal>;
    async fn accounts(&self) -> Result<Vec<Account>>;
    async fn balances(&self, address: &str) -> Result<Vec<Balance>>;
}
