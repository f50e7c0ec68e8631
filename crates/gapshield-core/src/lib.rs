//! # Gapshield Core Library
//!
//! Decides whether a screen-capture event for a monitored child must be
//! dropped before it is taken or uploaded.
//!
//! Two independent causes lead to suppression:
//!
//! - **Crisis resources**: the child is visiting a safety or crisis site.
//!   Such visits must never be recorded.
//! - **Privacy gaps**: a handful of short, randomized windows per child and
//!   day that exist purely as cover, so a missing capture says nothing about
//!   why it is missing.
//!
//! ## Architecture
//!
//! - **RNG**: deterministic PCG generator seeded from `"{child}:{date}"`,
//!   optionally keyed with HMAC-SHA256
//! - **Distributor / Generator**: lays out the day's gaps inside waking hours
//! - **Store**: memoizes generated schedules per `(child, date)`
//! - **Detector**: ORs the crisis predicate with the schedule lookup and
//!   returns a single opaque boolean
//!
//! ## Key Components
//!
//! - [`CaptureSuppressionDetector`]: the entry point for the capture pipeline
//! - [`GapSchedule`]: a child's gaps for one day
//! - [`PrivacyGapConfig`]: validated feature configuration
//! - [`Config`]: on-disk application configuration

pub mod config;
pub mod crisis;
pub mod detector;
pub mod distributor;
pub mod error;
pub mod rng;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod telemetry;

pub use config::{PrivacyGapConfig, PrivacyGapSettings};
pub use crisis::{CrisisAllowlist, CrisisSettings, CrisisUrlPredicate};
pub use detector::{CaptureSuppressResult, CaptureSuppressionDetector};
pub use error::{ConfigError, CoreError, ValidationError};
pub use rng::SeedKey;
pub use schedule::{generate_daily_gap_schedule, generate_daily_gap_schedule_at, Gap, GapSchedule};
pub use storage::Config;
pub use store::{InMemoryScheduleStore, ScheduleStore};
