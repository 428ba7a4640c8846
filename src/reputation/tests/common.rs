use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::reputation::domain::{QuoteId, SupplierId};
use crate::reputation::loaders::LoaderSettings;
use crate::reputation::rubric::RubricConfig;
use crate::reputation::service::{ReputationService, SignalSources};
use crate::reputation::sources::{
    AuthorizationContext, AuthorizationError, AwardKickoffSource, BenchRow,
    BenchUtilizationSource, FeedbackSource, KickoffRow, MatchHealthRow, MatchHealthSource,
    ParticipationSource, SourceError, SourceResult, ThreadActivity, ThreadActivitySource,
};
use crate::reputation::{BenchStatus, MatchHealth};

/// How a fake source behaves on fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) enum Behavior {
    #[default]
    Normal,
    Degraded,
    Transient,
    /// Never resolves; exercises the loader deadline.
    Hang,
}

async fn respond<T: Clone>(
    behavior: Behavior,
    source: &'static str,
    rows: &T,
) -> SourceResult<T> {
    match behavior {
        Behavior::Normal => Ok(rows.clone()),
        Behavior::Degraded => Err(SourceError::Degraded { source }),
        Behavior::Transient => Err(SourceError::Transient {
            source,
            message: "connection reset by peer".to_string(),
        }),
        Behavior::Hang => {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }
}

#[derive(Default)]
pub(super) struct FakeMatchHealth {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<SupplierId, MatchHealthRow>,
    pub(super) calls: AtomicUsize,
}

#[async_trait]
impl MatchHealthSource for FakeMatchHealth {
    async fn fetch(
        &self,
        _ids: &[SupplierId],
    ) -> SourceResult<HashMap<SupplierId, MatchHealthRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        respond(self.behavior, "match_health", &self.rows).await
    }
}

#[derive(Default)]
pub(super) struct FakeBench {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<SupplierId, BenchRow>,
    pub(super) calls: AtomicUsize,
}

#[async_trait]
impl BenchUtilizationSource for FakeBench {
    async fn fetch(&self, _ids: &[SupplierId]) -> SourceResult<HashMap<SupplierId, BenchRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        respond(self.behavior, "bench_utilization", &self.rows).await
    }
}

#[derive(Default)]
pub(super) struct FakeKickoff {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<SupplierId, KickoffRow>,
    pub(super) calls: AtomicUsize,
    pub(super) last_args: Mutex<Option<(u32, u32)>>,
}

#[async_trait]
impl AwardKickoffSource for FakeKickoff {
    async fn fetch(
        &self,
        _ids: &[SupplierId],
        lookback_days: u32,
        on_time_days: u32,
    ) -> SourceResult<HashMap<SupplierId, KickoffRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().expect("kickoff args mutex") = Some((lookback_days, on_time_days));
        respond(self.behavior, "award_kickoff", &self.rows).await
    }
}

#[derive(Default)]
pub(super) struct FakeParticipation {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<SupplierId, Vec<QuoteId>>,
    pub(super) calls: AtomicUsize,
    pub(super) last_args: Mutex<Option<(u32, usize)>>,
}

#[async_trait]
impl ParticipationSource for FakeParticipation {
    async fn fetch(
        &self,
        _ids: &[SupplierId],
        lookback_days: u32,
        per_supplier_cap: usize,
    ) -> SourceResult<HashMap<SupplierId, Vec<QuoteId>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().expect("participation args mutex") =
            Some((lookback_days, per_supplier_cap));
        respond(self.behavior, "participation", &self.rows).await
    }
}

#[derive(Default)]
pub(super) struct FakeThreads {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<QuoteId, ThreadActivity>,
    pub(super) calls: AtomicUsize,
    pub(super) last_quotes: Mutex<Vec<QuoteId>>,
}

#[async_trait]
impl ThreadActivitySource for FakeThreads {
    async fn fetch(&self, quote_ids: &[QuoteId]) -> SourceResult<HashMap<QuoteId, ThreadActivity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_quotes.lock().expect("thread quotes mutex") = quote_ids.to_vec();
        respond(self.behavior, "thread_activity", &self.rows).await
    }
}

#[derive(Default)]
pub(super) struct FakeFeedback {
    pub(super) behavior: Behavior,
    pub(super) rows: HashMap<SupplierId, BTreeMap<String, u32>>,
    pub(super) calls: AtomicUsize,
}

#[async_trait]
impl FeedbackSource for FakeFeedback {
    async fn fetch(
        &self,
        _ids: &[SupplierId],
        _lookback_days: u32,
    ) -> SourceResult<HashMap<SupplierId, BTreeMap<String, u32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        respond(self.behavior, "feedback", &self.rows).await
    }
}

pub(super) struct FakeAuth {
    pub(super) allow: bool,
    pub(super) calls: AtomicUsize,
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self {
            allow: true,
            calls: AtomicUsize::new(0),
        }
    }
}

impl AuthorizationContext for FakeAuth {
    fn require_admin(&self) -> Result<(), AuthorizationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.allow {
            Ok(())
        } else {
            Err(AuthorizationError)
        }
    }
}

/// All fakes wired together; tests swap individual sources before building
/// the service.
#[derive(Default)]
pub(super) struct Harness {
    pub(super) match_health: Arc<FakeMatchHealth>,
    pub(super) bench: Arc<FakeBench>,
    pub(super) kickoff: Arc<FakeKickoff>,
    pub(super) participation: Arc<FakeParticipation>,
    pub(super) threads: Arc<FakeThreads>,
    pub(super) feedback: Arc<FakeFeedback>,
    pub(super) auth: Arc<FakeAuth>,
}

impl Harness {
    pub(super) fn service(&self, settings: LoaderSettings) -> ReputationService {
        ReputationService::new(
            SignalSources {
                match_health: self.match_health.clone(),
                bench: self.bench.clone(),
                kickoff: self.kickoff.clone(),
                participation: self.participation.clone(),
                threads: self.threads.clone(),
                feedback: self.feedback.clone(),
            },
            self.auth.clone(),
            RubricConfig::default(),
            settings,
        )
    }
}

pub(super) fn sid(raw: &str) -> SupplierId {
    SupplierId(raw.to_string())
}

pub(super) fn qid(raw: &str) -> QuoteId {
    QuoteId(raw.to_string())
}

pub(super) fn match_row(
    bids: u32,
    wins: u32,
    win_rate_pct: Option<f64>,
    health: MatchHealth,
) -> MatchHealthRow {
    MatchHealthRow {
        bids_90d: bids,
        wins_90d: wins,
        win_rate_pct,
        match_health: health,
    }
}

pub(super) fn bench_row(status: BenchStatus) -> BenchRow {
    BenchRow {
        bench_status: status,
        awards_last_30d: 2,
        last_capacity_update_at: None,
    }
}
