//! Supplier reputation scoring: signal loaders, the pure rubric engine, and
//! the batch/self-service orchestration on top of them.

pub mod domain;
pub mod loaders;
pub mod rubric;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use domain::{
    normalize_ids, BenchStatus, MatchHealth, QuoteId, ReputationScore, ResponsivenessSample,
    ScoreLabel, SignalBundle, SupplierId,
};
pub use loaders::{LoaderSettings, SignalOutcome};
pub use rubric::{RubricConfig, RubricEngine};
pub use service::{ReputationError, ReputationService, SignalSources};
pub use sources::{
    AuthorizationContext, AuthorizationError, AwardKickoffSource, BenchRow,
    BenchUtilizationSource, FeedbackSource, KickoffRow, MatchHealthRow, MatchHealthSource,
    ParticipationSource, SourceError, SourceResult, ThreadActivity, ThreadActivitySource,
};
