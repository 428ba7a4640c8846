mod config;
mod rules;

pub use config::RubricConfig;

use super::domain::{ReputationScore, ScoreLabel, SignalBundle};

/// Stateless rubric evaluator. Pure function of the bundle: no I/O, no clock,
/// no per-supplier state.
pub struct RubricEngine {
    config: RubricConfig,
}

impl RubricEngine {
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    /// Map one supplier's signal bundle to a composite score.
    ///
    /// Each signal contributes an independent bounded delta, or null when its
    /// data is absent. When every delta is null the score itself is null; a
    /// supplier with zero observable history must not read as a neutral 50.
    pub fn score(&self, bundle: &SignalBundle) -> ReputationScore {
        let win_rate_score = rules::win_rate_delta(bundle);
        let participation_score = rules::participation_delta(bundle.bids_last_90d);
        let kickoff_score = rules::kickoff_delta(bundle.kickoff_on_time_ratio, &self.config);
        let responsiveness_score =
            rules::responsiveness_delta(bundle.responsiveness, &self.config);
        let bench_match_score =
            rules::bench_match_delta(bundle.match_health, bundle.bench_status);
        let feedback_penalty =
            rules::feedback_delta(bundle.feedback_by_category.as_ref(), &self.config);

        let deltas = [
            win_rate_score,
            participation_score,
            kickoff_score,
            responsiveness_score,
            bench_match_score,
            feedback_penalty,
        ];

        if deltas.iter().all(Option::is_none) {
            return ReputationScore::unknown();
        }

        let total = self.config.base_score + deltas.iter().flatten().sum::<i16>();
        let clamped = total.clamp(0, 100) as u8;
        let (score, label) = (Some(clamped), ScoreLabel::for_score(clamped));

        ReputationScore {
            score,
            label,
            win_rate_score,
            participation_score,
            kickoff_score,
            responsiveness_score,
            bench_match_score,
            feedback_penalty,
        }
    }
}
