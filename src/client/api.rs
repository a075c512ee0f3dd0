//! Social-graph client capability and its failure modes

use crate::types::{ActivityRecord, QuotaSnapshot, RosterEntry, RosterKind, UserProfile};
use async_trait::async_trait;

/// Failure modes of the fetch capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Identity failed local format validation; raised before any network
    /// call. Recoverable by prompting for corrected input.
    InvalidIdentity(String),

    /// The remote API reports no such identity.
    NotFound(String),

    /// Network or parse failure on a single request. Extensions abort on
    /// this and leave accumulated data untouched; the core never retries.
    Transient(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidIdentity(identity) => {
                write!(f, "Invalid identity: {}", identity)
            }
            FetchError::NotFound(identity) => write!(f, "No such identity: {}", identity),
            FetchError::Transient(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Check an identity against the remote API's screen-name format:
/// non-empty, ASCII alphanumeric only.
///
/// Local and synchronous; callers use it to short-circuit before spending
/// a network request.
pub fn validate_identity(identity: &str) -> Result<(), FetchError> {
    if identity.is_empty() || !identity.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FetchError::InvalidIdentity(identity.to_string()));
    }
    Ok(())
}

/// Fetch capability over the remote social-graph API.
///
/// All operations are async and non-blocking; implementations report
/// failures as `FetchError` values, never as silent empty results. Pages
/// are 1-based and ordered newest-first, matching the API's native order.
#[async_trait]
pub trait SocialGraphClient: Send + Sync {
    /// Fetch the profile header for an identity.
    async fn fetch_user(&self, identity: &str) -> Result<UserProfile, FetchError>;

    /// Fetch one timeline page, capped at `page_size` records.
    async fn fetch_timeline_page(
        &self,
        identity: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ActivityRecord>, FetchError>;

    /// Fetch one roster page for followers or friends.
    async fn fetch_roster_page(
        &self,
        identity: &str,
        kind: RosterKind,
        page: u32,
    ) -> Result<Vec<RosterEntry>, FetchError>;

    /// Fetch the remaining request quota and its reset time.
    async fn fetch_quota_status(&self) -> Result<QuotaSnapshot, FetchError>;
}
