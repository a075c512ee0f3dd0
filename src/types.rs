//! Core data structures shared across the engine
//!
//! These are passive shapes: records as fetched from the remote API and the
//! user profile header. Derived statistics live in `stats`, pagination state
//! in `coordinator`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped short-text post by a profile owner.
///
/// Immutable once fetched. The timeline that contains it owns it; day
/// buckets hold their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Text length in Unicode scalar values.
    pub fn text_length(&self) -> u64 {
        self.text.chars().count() as u64
    }
}

/// One follower or friend in a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u64,
    pub follower_count: u64,
}

/// Which roster a paged fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Followers,
    Friends,
}

impl RosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterKind::Followers => "followers",
            RosterKind::Friends => "friends",
        }
    }
}

/// Profile header as reported by the remote API.
///
/// The counts here are the API's own totals; they may exceed what has been
/// paged in locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub screen_name: String,
    pub statuses_count: u64,
    pub followers_count: u64,
    pub friends_count: u64,
}

/// Raw quota answer from the remote API, before severity classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaSnapshot {
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}
