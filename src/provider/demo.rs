//! Deterministic in-process provider.
//!
//! Serves a fixed DAO snapshot with an optional simulated round-trip delay,
//! and counts calls so tests can assert whether the cache was hit or the
//! provider was consulted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use super::{Account, Balance, ChainProvider, DaoSummary, Proposal, ProposalStatus, Tally};

/// Demo data provider. Cheap to construct, deterministic output.
pub struct DemoProvider {
    latency: Duration,
    calls: AtomicUsize,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulate a network round trip of `latency` per call.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new()
        }
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn proposal_set() -> Vec<Proposal> {
        vec![
            Proposal {
                id: 12,
                title: "Raise validator set to 150".to_string(),
                status: ProposalStatus::Voting,
                submitted: Utc::now() - ChronoDuration::days(4),
                voting_end: Utc::now() + ChronoDuration::days(10),
                description: "Expands the active validator set from 125 to 150 seats. \
                              Additional seats lower the stake threshold for entry and \
                              improve geographic distribution of consensus power."
                    .to_string(),
                tally: Tally {
                    yes: 4_210_000,
                    no: 890_000,
                    abstain: 120_000,
                    veto: 40_000,
                },
            },
            Proposal {
                id: 11,
                title: "Fund core tooling workstream Q4".to_string(),
                status: ProposalStatus::Passed,
                submitted: Utc::now() - ChronoDuration::days(52),
                voting_end: Utc::now() - ChronoDuration::days(38),
                description: "Allocates 250,000 SCOPE from the community pool to the core \
                              tooling workstream for the fourth quarter, covering indexer \
                              maintenance and the public dashboard."
                    .to_string(),
                tally: Tally {
                    yes: 6_010_000,
                    no: 310_000,
                    abstain: 95_000,
                    veto: 12_000,
                },
            },
            Proposal {
                id: 10,
                title: "Reduce voting period to 7 days".to_string(),
                status: ProposalStatus::Rejected,
                submitted: Utc::now() - ChronoDuration::days(73),
                voting_end: Utc::now() - ChronoDuration::days(59),
                description: "Shortens the governance voting period from 14 to 7 days to \
                              speed up parameter changes."
                    .to_string(),
                tally: Tally {
                    yes: 1_420_000,
                    no: 4_980_000,
                    abstain: 300_000,
                    veto: 410_000,
                },
            },
        ]
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainProvider for DemoProvider {
    async fn summary(&self) -> Result<DaoSummary> {
        self.round_trip().await;
        Ok(DaoSummary {
            name: "Scope Collective".to_string(),
            token: "SCOPE".to_string(),
            total_supply: 100_000_000,
            members: 18_423,
            active_proposals: 1,
            quorum_percent: 40,
            treasury: vec![
                Balance {
                    denom: "SCOPE".to_string(),
                    amount: 12_450_000,
                },
                Balance {
                    denom: "ATOM".to_string(),
                    amount: 84_210,
                },
                Balance {
                    denom: "USDC".to_string(),
                    amount: 1_905_322,
                },
            ],
        })
    }

    async fn proposals(&self) -> Result<Vec<Proposal>> {
        self.round_trip().await;
        Ok(Self::proposal_set())
    }

    async fn proposal(&self, id: u64) -> Result<Proposal> {
        self.round_trip().await;
        Self::proposal_set()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow!("proposal {id} not found"))
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        self.round_trip().await;
        Ok(vec![
            Account {
                name: "treasury-ops".to_string(),
                address: "scope1qty8rw7pnt2u2hzj3m4xsyoza9ne0hmdz7a2xl".to_string(),
            },
            Account {
                name: "grants".to_string(),
                address: "scope1m93f8kjc5e0rluaw3pvdx9q4z6u7sh2g4ktn0".to_string(),
            },
        ])
    }

    async fn balances(&self, address: &str) -> Result<Vec<Balance>> {
        self.round_trip().await;
        let scale = if address.ends_with('0') { 3 } else { 1 };
        Ok(vec![
            Balance {
                denom: "SCOPE".to_string(),
                amount: 310_500 * scale,
            },
            Balance {
                denom: "USDC".to_string(),
                amount: 48_020 * scale,
            },
        ])
    }
}

/// Provider whose every call fails with the given message. Test helper for
/// the error-recovery path.
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn err(&self) -> anyhow::Error {
        anyhow!("{}", self.message)
    }
}

#[async_trait]
impl ChainProvider for FailingProvider {
    async fn summary(&self) -> Result<DaoSummary> {
        Err(self.err())
    }

    async fn proposals(&self) -> Result<Vec<Proposal>> {
        Err(self.err())
    }

    async fn proposal(&self, _id: u64) -> Result<Proposal> {
        Err(self.err())
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        Err(self.err())
    }

    async fn balances(&self, _address: &str) -> Result<Vec<Balance>> {
        Err(self.err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_provider_counts_calls() {
        let provider = DemoProvider::new();
        let _ = provider.summary().await;
        let _ = provider.proposals().await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn proposal_lookup_finds_known_ids() {
        let provider = DemoProvider::new();
        let p = provider.proposal(12).await.expect("proposal 12 exists");
        assert_eq!(p.status, ProposalStatus::Voting);
        assert!(provider.proposal(999).await.is_err());
    }

    #[tokio::test]
    async fn failing_provider_surfaces_its_message() {
        let provider = FailingProvider::new("boom");
        let err = provider.summary().await.expect_err("must fail");
        assert_eq!(err.to_string(), "boom");
    }
}
