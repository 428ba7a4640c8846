use super::super::domain::SupplierId;
use super::super::sources::{BenchRow, BenchUtilizationSource};
use super::{guarded_fetch, DegradeLog, LoaderSettings, SignalOutcome};

static DEGRADED: DegradeLog = DegradeLog::new("bench_utilization");

/// Bench-utilization classification per supplier.
pub(crate) async fn load(
    source: &dyn BenchUtilizationSource,
    ids: &[SupplierId],
    settings: &LoaderSettings,
) -> SignalOutcome<BenchRow> {
    guarded_fetch(
        "bench_utilization",
        settings.loader_timeout,
        &DEGRADED,
        source.fetch(ids),
    )
    .await
    .map_or(SignalOutcome::Degraded, SignalOutcome::Loaded)
}
