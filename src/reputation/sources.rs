//! Read-only aggregate interfaces exposed by upstream collaborators.
//!
//! Each trait covers one behavioral signal's backing view. Implementations are
//! expected to surface structural unavailability (missing columns, dropped
//! views) as [`SourceError::Degraded`] and anything transient (network, query
//! timeouts inside the store) as [`SourceError::Transient`]; the loaders decide
//! how each flavor degrades.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{BenchStatus, MatchHealth, QuoteId, SupplierId};

/// Error surfaced by a signal source. Never fatal to a scoring call.
#[derive(Debug)]
pub enum SourceError {
    /// The backing aggregate is structurally absent for the whole batch.
    Degraded { source: &'static str },
    /// A transient fetch fault; the affected ids simply contribute no data.
    Transient {
        source: &'static str,
        message: String,
    },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Degraded { source } => {
                write!(f, "{source} aggregate is structurally unavailable")
            }
            Self::Transient { source, message } => {
                write!(f, "{source} fetch failed: {message}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

pub type SourceResult<T> = Result<T, SourceError>;

/// Per-supplier row from the bid/win match-health view.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchHealthRow {
    pub bids_90d: u32,
    pub wins_90d: u32,
    /// Win rate as reported by the view; derived from the counts when absent.
    pub win_rate_pct: Option<f64>,
    pub match_health: MatchHealth,
}

/// Per-supplier row from the bench-utilization view.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRow {
    pub bench_status: BenchStatus,
    pub awards_last_30d: u32,
    pub last_capacity_update_at: Option<DateTime<Utc>>,
}

/// Per-supplier award/kickoff counts over the requested lookback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickoffRow {
    pub awarded: u32,
    /// Awards whose kickoff completed within the on-time window.
    pub on_time: u32,
}

impl KickoffRow {
    pub fn on_time_ratio(&self) -> Option<f64> {
        if self.awarded == 0 {
            return None;
        }
        Some(f64::from(self.on_time) / f64::from(self.awarded))
    }
}

/// Latest message timestamps for each counterparty on one quote thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadActivity {
    pub last_customer_message_at: Option<DateTime<Utc>>,
    pub last_supplier_message_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait MatchHealthSource: Send + Sync {
    async fn fetch(&self, ids: &[SupplierId])
        -> SourceResult<HashMap<SupplierId, MatchHealthRow>>;
}

#[async_trait]
pub trait BenchUtilizationSource: Send + Sync {
    async fn fetch(&self, ids: &[SupplierId]) -> SourceResult<HashMap<SupplierId, BenchRow>>;
}

#[async_trait]
pub trait AwardKickoffSource: Send + Sync {
    async fn fetch(
        &self,
        ids: &[SupplierId],
        lookback_days: u32,
        on_time_days: u32,
    ) -> SourceResult<HashMap<SupplierId, KickoffRow>>;
}

/// Stage 1 of the responsiveness sample: recent quote participation per supplier.
#[async_trait]
pub trait ParticipationSource: Send + Sync {
    async fn fetch(
        &self,
        ids: &[SupplierId],
        lookback_days: u32,
        per_supplier_cap: usize,
    ) -> SourceResult<HashMap<SupplierId, Vec<QuoteId>>>;
}

/// Stage 2 of the responsiveness sample: thread activity for a bounded quote set.
#[async_trait]
pub trait ThreadActivitySource: Send + Sync {
    async fn fetch(&self, quote_ids: &[QuoteId]) -> SourceResult<HashMap<QuoteId, ThreadActivity>>;
}

#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn fetch(
        &self,
        ids: &[SupplierId],
        lookback_days: u32,
    ) -> SourceResult<HashMap<SupplierId, BTreeMap<String, u32>>>;
}

/// Raised when a caller without administrative context reaches a scoring path.
#[derive(Debug, thiserror::Error)]
#[error("caller is not an authorized administrator")]
pub struct AuthorizationError;

/// Authorization hook supplied by the host; the engine never inspects sessions
/// itself.
pub trait AuthorizationContext: Send + Sync {
    fn require_admin(&self) -> Result<(), AuthorizationError>;
}
