use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for suppliers; all scoring is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplierId(pub String);

/// Identifier wrapper for quote requests a supplier participated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteId(pub String);

/// How well a supplier's bid history aligns with the jobs routed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchHealth {
    Good,
    Caution,
    Poor,
    Unknown,
}

/// How heavily a supplier is utilized relative to peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchStatus {
    Underused,
    Balanced,
    Overused,
    Unknown,
}

/// Sampled message-thread responsiveness over the 90-day lookback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsivenessSample {
    /// Sampled quotes where the latest customer message is still unanswered.
    pub needs_reply: u32,
    /// Subset of `needs_reply` where the outstanding message is under 48 hours old.
    pub needs_reply_within_48h: u32,
}

/// Per-supplier snapshot of every behavioral signal, assembled fresh on each call.
///
/// Absent fields mean the backing source had no data (or was degraded) for this
/// supplier; the rubric maps absence to a null contribution rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub match_health: MatchHealth,
    pub bench_status: BenchStatus,
    pub bids_last_90d: Option<u32>,
    pub wins_last_90d: Option<u32>,
    pub win_rate_pct: Option<f64>,
    pub kickoff_on_time_ratio: Option<f64>,
    pub responsiveness: Option<ResponsivenessSample>,
    pub feedback_by_category: Option<BTreeMap<String, u32>>,
}

impl SignalBundle {
    /// Source-provided win rate, or the derived `wins / bids * 100` when the
    /// source omitted it but both counts are present and bids is non-zero.
    pub fn effective_win_rate_pct(&self) -> Option<f64> {
        if self.win_rate_pct.is_some() {
            return self.win_rate_pct;
        }
        match (self.bids_last_90d, self.wins_last_90d) {
            (Some(bids), Some(wins)) if bids > 0 => Some(f64::from(wins) / f64::from(bids) * 100.0),
            _ => None,
        }
    }
}

impl Default for SignalBundle {
    fn default() -> Self {
        Self {
            match_health: MatchHealth::Unknown,
            bench_status: BenchStatus::Unknown,
            bids_last_90d: None,
            wins_last_90d: None,
            win_rate_pct: None,
            kickoff_on_time_ratio: None,
            responsiveness: None,
            feedback_by_category: None,
        }
    }
}

/// Coarse reliability label derived solely from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Fair,
    Limited,
    Unknown,
}

impl ScoreLabel {
    /// Label for a clamped score. Score 0 is `Limited`; there is no distinct
    /// "zero" label.
    pub fn for_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => Self::Excellent,
            70..=84 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::Limited,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Limited => "limited",
            Self::Unknown => "unknown",
        }
    }
}

/// Composite reputation output with per-component deltas retained so admin
/// tooling can explain how a score was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationScore {
    /// Clamped composite score, or `None` when no signal produced a usable delta.
    pub score: Option<u8>,
    pub label: ScoreLabel,
    pub win_rate_score: Option<i16>,
    pub participation_score: Option<i16>,
    pub kickoff_score: Option<i16>,
    pub responsiveness_score: Option<i16>,
    pub bench_match_score: Option<i16>,
    pub feedback_penalty: Option<i16>,
}

impl ReputationScore {
    /// A score with every component null, as produced for a supplier with zero
    /// observable history.
    pub fn unknown() -> Self {
        Self {
            score: None,
            label: ScoreLabel::Unknown,
            win_rate_score: None,
            participation_score: None,
            kickoff_score: None,
            responsiveness_score: None,
            bench_match_score: None,
            feedback_penalty: None,
        }
    }
}

/// Trim, drop empties, and deduplicate caller-supplied supplier ids into a
/// stable order before any loader runs.
pub fn normalize_ids(ids: &[SupplierId]) -> Vec<SupplierId> {
    let mut seen = BTreeSet::new();
    for id in ids {
        let trimmed = id.0.trim();
        if trimmed.is_empty() {
            continue;
        }
        seen.insert(SupplierId(trimmed.to_string()));
    }
    seen.into_iter().collect()
}
