use std::collections::BTreeMap;

use tracing::debug;

use super::super::domain::SupplierId;
use super::super::sources::FeedbackSource;
use super::{guarded_fetch, DegradeLog, LoaderSettings, SignalOutcome};

static DEGRADED: DegradeLog = DegradeLog::new("feedback");

/// Feedback occurrence counts by lower-cased category per supplier.
///
/// When feedback collection is switched off the source is never called and the
/// whole signal reads as absent.
pub(crate) async fn load(
    source: &dyn FeedbackSource,
    ids: &[SupplierId],
    settings: &LoaderSettings,
) -> SignalOutcome<BTreeMap<String, u32>> {
    if !settings.feedback_enabled {
        debug!("feedback collection disabled; skipping feedback signal");
        return SignalOutcome::Degraded;
    }

    guarded_fetch(
        "feedback",
        settings.loader_timeout,
        &DEGRADED,
        source.fetch(ids, settings.feedback_lookback_days),
    )
    .await
    .map_or(SignalOutcome::Degraded, SignalOutcome::Loaded)
}
