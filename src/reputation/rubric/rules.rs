use std::collections::BTreeMap;

use super::super::domain::{BenchStatus, MatchHealth, ResponsivenessSample, SignalBundle};
use super::config::RubricConfig;

/// Feedback categories carrying a rubric penalty, keyed lower-cased.
const OUTSIDE_CAPABILITY: &str = "outside_capability";
const SCOPE_UNCLEAR: &str = "scope_unclear";
const TIMELINE_UNREALISTIC: &str = "timeline_unrealistic";

pub(crate) fn win_rate_delta(bundle: &SignalBundle) -> Option<i16> {
    bundle.bids_last_90d?;
    let rate = bundle.effective_win_rate_pct()?;

    let delta = if rate <= 0.0 {
        0
    } else if rate >= 50.0 {
        25
    } else if rate >= 20.0 {
        15
    } else if rate >= 5.0 {
        5
    } else if rate >= 1.0 {
        2
    } else {
        0
    };
    Some(delta)
}

pub(crate) fn participation_delta(bids_last_90d: Option<u32>) -> Option<i16> {
    let bids = bids_last_90d?;
    let delta = match bids {
        0 => -5,
        1..=4 => 2,
        5..=9 => 6,
        _ => 10,
    };
    Some(delta)
}

pub(crate) fn kickoff_delta(ratio: Option<f64>, config: &RubricConfig) -> Option<i16> {
    let ratio = ratio?;
    let delta = if ratio >= config.kickoff_strong_ratio {
        10
    } else if ratio >= config.kickoff_fair_ratio {
        5
    } else {
        -10
    };
    Some(delta)
}

pub(crate) fn bench_match_delta(match_health: MatchHealth, bench_status: BenchStatus) -> Option<i16> {
    if match_health == MatchHealth::Unknown && bench_status == BenchStatus::Unknown {
        return None;
    }

    let mut delta: i16 = 0;
    match match_health {
        MatchHealth::Good => {
            delta += match bench_status {
                BenchStatus::Underused => 8,
                BenchStatus::Balanced => 5,
                _ => 2,
            };
        }
        MatchHealth::Caution => delta -= 3,
        MatchHealth::Poor => delta -= 8,
        MatchHealth::Unknown => {}
    }
    if bench_status == BenchStatus::Overused {
        delta -= 5;
    }
    Some(delta)
}

pub(crate) fn responsiveness_delta(
    sample: Option<ResponsivenessSample>,
    config: &RubricConfig,
) -> Option<i16> {
    let sample = sample?;
    if sample.needs_reply == 0 {
        // Nothing outstanding in the sampled window; no evidence either way.
        return None;
    }

    let ratio = f64::from(sample.needs_reply_within_48h) / f64::from(sample.needs_reply);
    let delta = if ratio >= config.reply_strong_ratio {
        10
    } else if ratio >= config.reply_fair_ratio {
        5
    } else {
        -10
    };
    Some(delta)
}

pub(crate) fn feedback_delta(
    feedback: Option<&BTreeMap<String, u32>>,
    config: &RubricConfig,
) -> Option<i16> {
    let feedback = feedback?;
    let count = |category: &str| feedback.get(category).copied().unwrap_or(0);

    let mut penalty: i16 = 0;
    if count(OUTSIDE_CAPABILITY) >= config.outside_capability_threshold {
        penalty -= 5;
    }
    if count(SCOPE_UNCLEAR) >= config.scope_unclear_threshold {
        penalty -= 3;
    }
    // Timeline pressure is rarely the supplier's fault, so this one stays small.
    if count(TIMELINE_UNREALISTIC) >= config.timeline_unrealistic_threshold {
        penalty -= 1;
    }

    if penalty == 0 {
        None
    } else {
        Some(penalty)
    }
}
