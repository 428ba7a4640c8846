use super::super::domain::SupplierId;
use super::super::sources::{AwardKickoffSource, KickoffRow};
use super::{guarded_fetch, DegradeLog, LoaderSettings, SignalOutcome};

static DEGRADED: DegradeLog = DegradeLog::new("award_kickoff");

/// Awarded/on-time kickoff counts per supplier over the award lookback.
pub(crate) async fn load(
    source: &dyn AwardKickoffSource,
    ids: &[SupplierId],
    settings: &LoaderSettings,
) -> SignalOutcome<KickoffRow> {
    guarded_fetch(
        "award_kickoff",
        settings.loader_timeout,
        &DEGRADED,
        source.fetch(
            ids,
            settings.kickoff_lookback_days,
            settings.kickoff_on_time_days,
        ),
    )
    .await
    .map_or(SignalOutcome::Degraded, SignalOutcome::Loaded)
}
