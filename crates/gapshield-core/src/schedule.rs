//! Daily privacy-gap schedules.
//!
//! A [`GapSchedule`] lists the short windows of a child's day during which
//! capture is suppressed as cover noise. The schedule is a pure function of
//! `(child_id, date, config)`: the same inputs always produce the same gaps,
//! so any process can regenerate it instead of storing it.
//!
//! [`Gap`] carries only timing. There is no field, tag or enum
//! that could say why a capture was dropped.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::config::{PrivacyGapConfig, MS_PER_MINUTE};
use crate::distributor::distribute_gaps_with_spacing;
use crate::rng::{
    create_keyed_seeded_random, create_seeded_random, generate_seed, random_int_from_seed,
};

/// Lifetime of a generated schedule before it is considered stale.
pub const SCHEDULE_TTL_HOURS: i64 = 24;

/// One suppression window, half-open: `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration_ms: i64,
}

impl Gap {
    pub(crate) fn new(start_time: DateTime<Utc>, duration_ms: i64) -> Self {
        Self {
            start_time,
            end_time: start_time + Duration::milliseconds(duration_ms),
            duration_ms,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Start-inclusive, end-exclusive membership.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start_time <= timestamp && timestamp < self.end_time
    }
}

/// Gaps for one child on one calendar day, sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapSchedule {
    child_id: String,
    date: NaiveDate,
    gaps: Vec<Gap>,
    generated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl GapSchedule {
    pub fn child_id(&self) -> &str {
        &self.child_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the cached value should be regenerated.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// The gap covering `timestamp`, if any.
    pub fn find_gap(&self, timestamp: DateTime<Utc>) -> Option<&Gap> {
        self.gaps.iter().find(|gap| gap.contains(timestamp))
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.find_gap(timestamp).is_some()
    }
}

/// Midnight UTC of `date` shifted by `hour`.
pub(crate) fn day_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(i64::from(hour))
}

/// Generate the schedule for `child_id` on `date`, stamped with the current time.
pub fn generate_daily_gap_schedule(
    child_id: &str,
    date: NaiveDate,
    config: &PrivacyGapConfig,
) -> GapSchedule {
    generate_daily_gap_schedule_at(child_id, date, config, Utc::now())
}

/// Generate the schedule with an explicit generation instant.
///
/// Everything except `generated_at`/`expires_at` depends only on
/// `(child_id, date, config)`.
pub fn generate_daily_gap_schedule_at(
    child_id: &str,
    date: NaiveDate,
    config: &PrivacyGapConfig,
    generated_at: DateTime<Utc>,
) -> GapSchedule {
    let seed = generate_seed(child_id, date);
    let mut rng = match config.seed_key() {
        Some(key) => create_keyed_seeded_random(&seed, key),
        None => create_seeded_random(&seed),
    };

    let gap_count = random_int_from_seed(
        &mut rng,
        i64::from(config.min_daily_gaps()),
        i64::from(config.max_daily_gaps()),
    ) as usize;

    let offsets = distribute_gaps_with_spacing(
        &mut rng,
        gap_count,
        config.waking_window_minutes(),
        config.min_gap_spacing_ms(),
        config.max_gap_duration_ms(),
    );

    let window_start = day_hour(date, config.waking_hours_start());
    let gaps = offsets
        .into_iter()
        .map(|offset| {
            let duration_ms = random_int_from_seed(
                &mut rng,
                config.min_gap_duration_ms(),
                config.max_gap_duration_ms(),
            );
            Gap::new(
                window_start + Duration::milliseconds(offset * MS_PER_MINUTE),
                duration_ms,
            )
        })
        .collect();

    GapSchedule {
        child_id: child_id.to_string(),
        date,
        gaps,
        generated_at,
        expires_at: generated_at + Duration::hours(SCHEDULE_TTL_HOURS),
    }
}
