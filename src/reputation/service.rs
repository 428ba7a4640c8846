use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::domain::{normalize_ids, ReputationScore, SignalBundle, SupplierId};
use super::loaders::{self, LoaderSettings};
use super::rubric::{RubricConfig, RubricEngine};
use super::sources::{
    AuthorizationContext, AuthorizationError, AwardKickoffSource, BenchUtilizationSource,
    FeedbackSource, MatchHealthSource, ParticipationSource, ThreadActivitySource,
};

/// The read-only aggregate sources one scoring service draws from.
pub struct SignalSources {
    pub match_health: Arc<dyn MatchHealthSource>,
    pub bench: Arc<dyn BenchUtilizationSource>,
    pub kickoff: Arc<dyn AwardKickoffSource>,
    pub participation: Arc<dyn ParticipationSource>,
    pub threads: Arc<dyn ThreadActivitySource>,
    pub feedback: Arc<dyn FeedbackSource>,
}

/// Error raised by the scoring service. Everything except authorization
/// degrades to "less signal" inside the loaders and never reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum ReputationError {
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),
}

static BOTH_CHEAP_VIEWS_DEGRADED: Once = Once::new();

/// Service composing the signal loaders and the rubric engine.
///
/// Scores are recomputed from current signal data on every call; nothing is
/// cached or persisted here.
pub struct ReputationService {
    sources: SignalSources,
    auth: Arc<dyn AuthorizationContext>,
    engine: RubricEngine,
    settings: LoaderSettings,
}

impl ReputationService {
    pub fn new(
        sources: SignalSources,
        auth: Arc<dyn AuthorizationContext>,
        rubric: RubricConfig,
        settings: LoaderSettings,
    ) -> Self {
        Self {
            sources,
            auth,
            engine: RubricEngine::new(rubric),
            settings,
        }
    }

    /// Score a batch of suppliers for an administrative listing.
    ///
    /// `already_authorized` skips the admin check when the caller sits on a
    /// bulk pathway that has already performed it. Malformed and duplicate ids
    /// are filtered up front; an empty set is a no-op, not an error.
    pub async fn score_for_suppliers(
        &self,
        ids: &[SupplierId],
        already_authorized: bool,
    ) -> Result<BTreeMap<SupplierId, ReputationScore>, ReputationError> {
        if !already_authorized {
            self.auth.require_admin()?;
        }

        let ids = normalize_ids(ids);
        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let bundles = self.load_bundles(&ids, Utc::now()).await;
        Ok(bundles
            .into_iter()
            .map(|(id, bundle)| {
                let score = self.engine.score(&bundle);
                (id, score)
            })
            .collect())
    }

    /// Score one supplier for its own dashboard.
    ///
    /// Always authorizes. Returns `Ok(None)` when the supplier has no 90-day
    /// bidding history: a supplier that never bids sees no reputation panel at
    /// all rather than a discouraging number. A computed-but-null score (bids
    /// present, every source degraded) is passed through with label `Unknown`.
    pub async fn score_for_supplier(
        &self,
        id: &SupplierId,
    ) -> Result<Option<ReputationScore>, ReputationError> {
        self.auth.require_admin()?;

        let ids = normalize_ids(std::slice::from_ref(id));
        let Some(id) = ids.first() else {
            return Ok(None);
        };

        let bundles = self.load_bundles(&ids, Utc::now()).await;
        let bundle = match bundles.get(id) {
            Some(bundle) => bundle,
            None => return Ok(None),
        };

        if bundle.bids_last_90d.unwrap_or(0) == 0 {
            debug!(supplier = %id.0, "suppressing reputation panel for supplier without recent bids");
            return Ok(None);
        }

        Ok(Some(self.engine.score(bundle)))
    }

    /// Fan out the five loaders concurrently and join their outcomes into one
    /// fresh bundle per supplier. Each loader degrades independently.
    async fn load_bundles(
        &self,
        ids: &[SupplierId],
        now: DateTime<Utc>,
    ) -> BTreeMap<SupplierId, SignalBundle> {
        let (match_health, bench, kickoff, feedback, responsiveness) = tokio::join!(
            loaders::match_health::load(self.sources.match_health.as_ref(), ids, &self.settings),
            loaders::bench::load(self.sources.bench.as_ref(), ids, &self.settings),
            loaders::kickoff::load(self.sources.kickoff.as_ref(), ids, &self.settings),
            loaders::feedback::load(self.sources.feedback.as_ref(), ids, &self.settings),
            loaders::responsiveness::sample(
                self.sources.participation.as_ref(),
                self.sources.threads.as_ref(),
                ids,
                &self.settings,
                now,
            ),
        );

        if match_health.is_degraded() && bench.is_degraded() {
            // Structural condition worth one loud line per process, not per call.
            BOTH_CHEAP_VIEWS_DEGRADED.call_once(|| {
                warn!("both match-health and bench views degraded; scores will be mostly unknown");
            });
        }

        ids.iter()
            .map(|id| {
                let mut bundle = SignalBundle::default();
                if let Some(row) = match_health.get(id) {
                    bundle.match_health = row.match_health;
                    bundle.bids_last_90d = Some(row.bids_90d);
                    bundle.wins_last_90d = Some(row.wins_90d);
                    bundle.win_rate_pct = row.win_rate_pct;
                }
                if let Some(row) = bench.get(id) {
                    bundle.bench_status = row.bench_status;
                }
                if let Some(row) = kickoff.get(id) {
                    bundle.kickoff_on_time_ratio = row.on_time_ratio();
                }
                if let Some(sample) = responsiveness.get(id) {
                    bundle.responsiveness = Some(*sample);
                }
                if let Some(categories) = feedback.get(id) {
                    bundle.feedback_by_category = Some(categories.clone());
                }
                (id.clone(), bundle)
            })
            .collect()
    }
}
