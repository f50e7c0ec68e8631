//! Schedule lookup and memoization.
//!
//! Generation is deterministic, so a store is only a latency optimization:
//! a hit and a miss always yield the same gaps. Concurrent misses for the
//! same key may both regenerate; the identical results simply overwrite one
//! another.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::config::PrivacyGapConfig;
use crate::schedule::{generate_daily_gap_schedule_at, GapSchedule};

/// Source of daily gap schedules.
///
/// Returning `None` means "no schedule applies" and is not an error.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_schedule(&self, child_id: &str, date: NaiveDate) -> Option<Arc<GapSchedule>>;
}

#[async_trait]
impl<T: ScheduleStore + ?Sized> ScheduleStore for Arc<T> {
    async fn get_schedule(&self, child_id: &str, date: NaiveDate) -> Option<Arc<GapSchedule>> {
        (**self).get_schedule(child_id, date).await
    }
}

type ScheduleKey = (String, NaiveDate);

/// Process-local memoizing store.
pub struct InMemoryScheduleStore {
    config: Arc<PrivacyGapConfig>,
    schedules: RwLock<HashMap<ScheduleKey, Arc<GapSchedule>>>,
}

impl InMemoryScheduleStore {
    pub fn new(config: PrivacyGapConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    pub fn with_shared_config(config: Arc<PrivacyGapConfig>) -> Self {
        Self {
            config,
            schedules: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &PrivacyGapConfig {
        &self.config
    }

    /// Lookup as of `now`; expired entries are regenerated and replaced.
    ///
    /// A miss also drops every other entry expired as of `now`, so the map
    /// stays bounded by the keys looked up within one schedule lifetime.
    pub async fn get_schedule_at(
        &self,
        child_id: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Arc<GapSchedule> {
        let key = (child_id.to_string(), date);
        {
            let schedules = self.schedules.read().await;
            if let Some(schedule) = schedules.get(&key) {
                if !schedule.is_expired(now) {
                    return Arc::clone(schedule);
                }
            }
        }

        let schedule = Arc::new(generate_daily_gap_schedule_at(
            child_id,
            date,
            &self.config,
            now,
        ));
        let mut schedules = self.schedules.write().await;
        schedules.retain(|_, cached| !cached.is_expired(now));
        schedules.insert(key, Arc::clone(&schedule));
        schedule
    }

    /// Drop every entry expired as of `now`. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut schedules = self.schedules.write().await;
        let before = schedules.len();
        schedules.retain(|_, schedule| !schedule.is_expired(now));
        let removed = before - schedules.len();
        tracing::debug!(removed, remaining = schedules.len(), "purged expired gap schedules");
        removed
    }

    pub async fn len(&self) -> usize {
        self.schedules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schedules.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.schedules.write().await.clear();
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn get_schedule(&self, child_id: &str, date: NaiveDate) -> Option<Arc<GapSchedule>> {
        Some(self.get_schedule_at(child_id, date, Utc::now()).await)
    }
}
