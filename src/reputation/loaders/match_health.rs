use super::super::domain::SupplierId;
use super::super::sources::{MatchHealthRow, MatchHealthSource};
use super::{guarded_fetch, DegradeLog, LoaderSettings, SignalOutcome};

static DEGRADED: DegradeLog = DegradeLog::new("match_health");

/// Bid/win counts, win rate, and match-health classification per supplier.
pub(crate) async fn load(
    source: &dyn MatchHealthSource,
    ids: &[SupplierId],
    settings: &LoaderSettings,
) -> SignalOutcome<MatchHealthRow> {
    guarded_fetch(
        "match_health",
        settings.loader_timeout,
        &DEGRADED,
        source.fetch(ids),
    )
    .await
    .map_or(SignalOutcome::Degraded, SignalOutcome::Loaded)
}
