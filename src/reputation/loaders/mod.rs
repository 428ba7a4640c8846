//! Signal loaders: one per behavioral signal, each tolerating source
//! degradation without failing the batch.
//!
//! A loader resolves to [`SignalOutcome::Degraded`] when the backing aggregate
//! is structurally unavailable (or the fetch deadline passes) and to an empty
//! map on transient faults, so one flaky source never aborts an orchestration.
//! Loaders never retry; the caller re-invokes the whole orchestration if it
//! wants fault recovery.

pub(crate) mod bench;
pub(crate) mod feedback;
pub(crate) mod kickoff;
pub(crate) mod match_health;
pub(crate) mod responsiveness;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing::{error, warn};

use super::domain::SupplierId;
use super::sources::{SourceError, SourceResult};

/// Operational knobs for the loaders; rubric thresholds live elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSettings {
    /// Award lookback for the kickoff-timeliness signal.
    pub kickoff_lookback_days: u32,
    /// Window after award within which a kickoff counts as on time.
    pub kickoff_on_time_days: u32,
    /// Lookback for feedback occurrence counts.
    pub feedback_lookback_days: u32,
    /// Lookback for quote participation (responsiveness stage 1).
    pub participation_lookback_days: u32,
    /// Most quote threads sampled per supplier.
    pub per_supplier_quote_cap: usize,
    /// Batches larger than this skip the responsiveness sample entirely.
    pub responsiveness_batch_ceiling: usize,
    /// Feature flag for the feedback subsystem; off means the signal is absent.
    pub feedback_enabled: bool,
    /// Per-fetch deadline; a timed-out source counts as degraded.
    pub loader_timeout: Duration,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            kickoff_lookback_days: 365,
            kickoff_on_time_days: 14,
            feedback_lookback_days: 365,
            participation_lookback_days: 90,
            per_supplier_quote_cap: 25,
            responsiveness_batch_ceiling: 50,
            feedback_enabled: true,
            loader_timeout: Duration::from_secs(5),
        }
    }
}

/// Result of one signal load across the whole batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome<T> {
    /// Per-supplier rows; suppliers missing from the map simply had no data.
    Loaded(HashMap<SupplierId, T>),
    /// The source was structurally unavailable; the signal is absent batch-wide.
    Degraded,
}

impl<T> SignalOutcome<T> {
    pub fn get(&self, id: &SupplierId) -> Option<&T> {
        match self {
            Self::Loaded(rows) => rows.get(id),
            Self::Degraded => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

/// Once-per-process-lifetime degradation log, one static per source, so a
/// widely-degraded deployment does not storm the logs.
pub(crate) struct DegradeLog {
    once: Once,
    source: &'static str,
}

impl DegradeLog {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            once: Once::new(),
            source,
        }
    }

    pub(crate) fn warn_once(&self) {
        self.once.call_once(|| {
            warn!(
                source = self.source,
                "signal source structurally unavailable; omitting signal"
            );
        });
    }
}

/// Run one source fetch under the loader deadline, mapping every failure mode
/// to the degrade policy: `None` means degraded, `Some(default)` means a
/// transient fault swallowed into an empty result.
pub(crate) async fn guarded_fetch<O, Fut>(
    source: &'static str,
    timeout: Duration,
    degraded_log: &DegradeLog,
    fut: Fut,
) -> Option<O>
where
    O: Default,
    Fut: Future<Output = SourceResult<O>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(rows)) => Some(rows),
        Ok(Err(SourceError::Degraded { .. })) => {
            degraded_log.warn_once();
            None
        }
        Ok(Err(err @ SourceError::Transient { .. })) => {
            // Real operational trouble: log every occurrence with context.
            error!(source, error = %err, "transient signal fetch fault; treating as empty");
            Some(O::default())
        }
        Err(_) => {
            warn!(source, timeout_ms = timeout.as_millis() as u64, "signal fetch deadline passed");
            None
        }
    }
}
