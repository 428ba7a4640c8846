use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use super::super::domain::{QuoteId, ResponsivenessSample, SupplierId};
use super::super::sources::{ParticipationSource, ThreadActivity, ThreadActivitySource};
use super::{guarded_fetch, DegradeLog, LoaderSettings, SignalOutcome};

static PARTICIPATION_DEGRADED: DegradeLog = DegradeLog::new("participation");
static THREADS_DEGRADED: DegradeLog = DegradeLog::new("thread_activity");

/// Two-stage responsiveness sample: recent quote participation, then thread
/// activity for the bounded quote set, reduced in one pass.
///
/// The batch ceiling is the hard guard against unbounded fan-out into the
/// message store: an oversized batch skips the whole signal rather than
/// computing it partially.
pub(crate) async fn sample(
    participation: &dyn ParticipationSource,
    threads: &dyn ThreadActivitySource,
    ids: &[SupplierId],
    settings: &LoaderSettings,
    now: DateTime<Utc>,
) -> SignalOutcome<ResponsivenessSample> {
    if ids.len() > settings.responsiveness_batch_ceiling {
        warn!(
            batch = ids.len(),
            ceiling = settings.responsiveness_batch_ceiling,
            "batch exceeds responsiveness ceiling; skipping sample"
        );
        return SignalOutcome::Degraded;
    }

    let quotes_by_supplier = match guarded_fetch(
        "participation",
        settings.loader_timeout,
        &PARTICIPATION_DEGRADED,
        participation.fetch(
            ids,
            settings.participation_lookback_days,
            settings.per_supplier_quote_cap,
        ),
    )
    .await
    {
        Some(rows) => rows,
        None => return SignalOutcome::Degraded,
    };

    if quotes_by_supplier.is_empty() {
        return SignalOutcome::Loaded(HashMap::new());
    }

    // Union of sampled quotes, re-capped per supplier in case the source
    // ignored the cap hint.
    let quote_ids: Vec<QuoteId> = quotes_by_supplier
        .values()
        .flat_map(|quotes| quotes.iter().take(settings.per_supplier_quote_cap))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let activity = match guarded_fetch(
        "thread_activity",
        settings.loader_timeout,
        &THREADS_DEGRADED,
        threads.fetch(&quote_ids),
    )
    .await
    {
        Some(rows) => rows,
        None => return SignalOutcome::Degraded,
    };

    SignalOutcome::Loaded(roll_up(&quotes_by_supplier, &activity, settings, now))
}

/// Single-pass rollup over the flat activity records: per quote decide whether
/// a supplier reply is outstanding, then aggregate per supplier.
fn roll_up(
    quotes_by_supplier: &HashMap<SupplierId, Vec<QuoteId>>,
    activity: &HashMap<QuoteId, ThreadActivity>,
    settings: &LoaderSettings,
    now: DateTime<Utc>,
) -> HashMap<SupplierId, ResponsivenessSample> {
    let mut samples = HashMap::with_capacity(quotes_by_supplier.len());

    for (supplier, quotes) in quotes_by_supplier {
        let sample: &mut ResponsivenessSample = samples.entry(supplier.clone()).or_default();
        for quote in quotes.iter().take(settings.per_supplier_quote_cap) {
            let Some(thread) = activity.get(quote) else {
                continue;
            };
            let Some(customer_at) = thread.last_customer_message_at else {
                continue;
            };
            let outstanding = match thread.last_supplier_message_at {
                None => true,
                Some(supplier_at) => customer_at > supplier_at,
            };
            if !outstanding {
                continue;
            }
            sample.needs_reply += 1;
            if now - customer_at < Duration::hours(48) {
                sample.needs_reply_within_48h += 1;
            }
        }
    }

    samples
}
