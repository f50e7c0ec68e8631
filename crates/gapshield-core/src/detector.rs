//! Capture suppression decision.
//!
//! Two causes can suppress a capture: the URL is a crisis resource, or the
//! timestamp falls inside the child's scheduled privacy gap. The caller only
//! ever learns the OR of the two. [`CaptureSuppressResult`] has a single
//! boolean, and nothing on this path logs, so a suppressed capture looks the
//! same whatever the cause.
//!
//! When the gap feature is enabled the schedule is consulted even if the URL
//! already matched, so call latency does not hint at the cause either.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::PrivacyGapConfig;
use crate::crisis::CrisisUrlPredicate;
use crate::store::{InMemoryScheduleStore, ScheduleStore};

/// Outcome of a suppression check. Serializes as `{"suppress": <bool>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CaptureSuppressResult {
    suppress: bool,
}

impl CaptureSuppressResult {
    pub fn suppress(&self) -> bool {
        self.suppress
    }
}

impl From<bool> for CaptureSuppressResult {
    fn from(suppress: bool) -> Self {
        Self { suppress }
    }
}

/// Combines the crisis predicate and the gap schedule into one decision.
pub struct CaptureSuppressionDetector<S, P> {
    store: S,
    predicate: P,
    config: Arc<PrivacyGapConfig>,
}

impl<S, P> CaptureSuppressionDetector<S, P>
where
    S: ScheduleStore,
    P: CrisisUrlPredicate,
{
    /// `config` gates the gap path; it must be the config `store` generates
    /// schedules from. [`CaptureSuppressionDetector::in_memory`] wires both
    /// from one value.
    pub fn new(store: S, predicate: P, config: Arc<PrivacyGapConfig>) -> Self {
        Self {
            store,
            predicate,
            config,
        }
    }

    pub fn config(&self) -> &PrivacyGapConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether a capture of `url` at `timestamp` must be dropped.
    ///
    /// Crisis URLs are suppressed even when privacy gaps are disabled.
    pub async fn should_suppress_capture(
        &self,
        child_id: &str,
        timestamp: DateTime<Utc>,
        url: &str,
    ) -> CaptureSuppressResult {
        let crisis_match = self.predicate.is_crisis_url(url);
        let gap_match = self.is_within_scheduled_gap(child_id, timestamp).await;
        CaptureSuppressResult::from(crisis_match | gap_match)
    }

    /// Whether `timestamp` falls in one of the child's gaps for that UTC day.
    ///
    /// `false` when the feature is disabled or no schedule is available.
    pub async fn is_within_scheduled_gap(&self, child_id: &str, timestamp: DateTime<Utc>) -> bool {
        if !self.config.enabled() {
            return false;
        }
        match self.store.get_schedule(child_id, timestamp.date_naive()).await {
            Some(schedule) => schedule.contains(timestamp),
            None => false,
        }
    }
}

impl<P: CrisisUrlPredicate> CaptureSuppressionDetector<InMemoryScheduleStore, P> {
    /// Detector over a fresh in-memory store sharing `config`.
    pub fn in_memory(predicate: P, config: Arc<PrivacyGapConfig>) -> Self {
        let store = InMemoryScheduleStore::with_shared_config(Arc::clone(&config));
        Self::new(store, predicate, config)
    }
}
