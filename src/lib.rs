//! # tweetpulse
//!
//! Timeline aggregation and incremental retrieval engine for a user's
//! social-timeline activity:
//!
//! - Buckets raw activity into calendar-day groups with running averages
//!   and day-over-day velocity
//! - Summarizes follower/friend rosters into reach-potential stats
//! - Coordinates paginated, rate-limit-aware retrieval that extends an
//!   existing aggregation with older history on demand
//! - Monitors the remote API's remaining quota on a fixed cadence
//!
//! Everything network-facing goes through the injected `SocialGraphClient`
//! capability; the aggregators themselves are pure and never fail. Chart
//! rendering and page wiring are the caller's concern - this crate only
//! produces the numbers.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod rate_limit;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use client::{validate_identity, FetchError, HttpSocialGraphClient, SocialGraphClient};
pub use config::EngineConfig;
pub use coordinator::{Profile, RetrievalCoordinator};
pub use rate_limit::{MonitorHandle, RateLimitMonitor, RateLimitStatus, Severity};
pub use stats::{aggregate_roster, aggregate_timeline, DayBucket, RosterStats, TimelineStats};
pub use types::{ActivityRecord, QuotaSnapshot, RosterEntry, RosterKind, UserProfile};
