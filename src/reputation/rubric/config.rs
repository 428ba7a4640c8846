use serde::{Deserialize, Serialize};

/// Hand-authored rubric thresholds. Deltas themselves live in the rules table;
/// only the cut points that product has tuned over time are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Neutral starting point before any delta is applied.
    pub base_score: i16,
    /// Kickoff on-time ratio at or above which the strong bonus applies.
    pub kickoff_strong_ratio: f64,
    /// Kickoff on-time ratio at or above which the smaller bonus applies.
    pub kickoff_fair_ratio: f64,
    /// Within-48h reply ratio at or above which the strong bonus applies.
    pub reply_strong_ratio: f64,
    /// Within-48h reply ratio at or above which the smaller bonus applies.
    pub reply_fair_ratio: f64,
    /// Occurrences of `outside_capability` feedback before the penalty lands.
    pub outside_capability_threshold: u32,
    /// Occurrences of `scope_unclear` feedback before the penalty lands.
    pub scope_unclear_threshold: u32,
    /// Occurrences of `timeline_unrealistic` feedback before the penalty lands.
    pub timeline_unrealistic_threshold: u32,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            kickoff_strong_ratio: 0.8,
            kickoff_fair_ratio: 0.5,
            reply_strong_ratio: 0.8,
            reply_fair_ratio: 0.5,
            outside_capability_threshold: 3,
            scope_unclear_threshold: 3,
            timeline_unrealistic_threshold: 6,
        }
    }
}
