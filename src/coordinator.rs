//! Paginated retrieval coordination
//!
//! Orchestrates the sequential fetch chain behind a profile load and the
//! incremental "load more" extensions. Raw pages are merged with what has
//! already been accumulated, then the pure aggregators are re-run over the
//! full sequence so derived statistics always match the raw data.
//!
//! The `Profile` aggregate is single-writer-at-a-time: callers must not run
//! two extensions against the same profile concurrently (typically by
//! disabling the triggering control until the in-flight call resolves).
//! The coordinator itself does not enforce that lock.

use crate::client::api::{validate_identity, FetchError, SocialGraphClient};
use crate::stats::{aggregate_roster, aggregate_timeline, RosterStats, TimelineStats};
use crate::types::{ActivityRecord, RosterKind, UserProfile};
use std::sync::Arc;

/// Pages are 1-based; the first page arrives during the initial load.
const FIRST_PAGE: u32 = 1;

/// Pagination cursor for one paged collection.
#[derive(Debug, Clone, Copy)]
struct PageCursor {
    /// Next page index to request
    next_page: u32,

    /// Whether the end of history has been observed (short or empty page).
    /// Once set, further extensions return `changed = false` without a
    /// network call.
    exhausted: bool,
}

impl PageCursor {
    fn after_first_page(exhausted: bool) -> Self {
        Self {
            next_page: FIRST_PAGE + 1,
            exhausted,
        }
    }
}

/// Everything known about one user in the current viewing session.
///
/// Created once per profile load; the stats fields are replaced wholesale
/// whenever an extension merges in more pages. Nothing here persists across
/// sessions.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: UserProfile,
    pub timeline: TimelineStats,
    pub followers: RosterStats,
    pub friends: RosterStats,

    timeline_cursor: PageCursor,
    follower_cursor: PageCursor,
    friend_cursor: PageCursor,
}

impl Profile {
    /// Whether the timeline's end of history has already been observed.
    pub fn timeline_exhausted(&self) -> bool {
        self.timeline_cursor.exhausted
    }
}

/// Fetches pages from the social-graph API, merges them with accumulated
/// raw data, and keeps the derived statistics consistent.
pub struct RetrievalCoordinator<C> {
    client: Arc<C>,

    /// Timeline page size cap, per request (the API maximum)
    page_size: u32,
}

impl<C: SocialGraphClient> RetrievalCoordinator<C> {
    pub fn new(client: Arc<C>, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Load a full profile: user header, first timeline page, first
    /// follower and friend pages, each aggregated once.
    ///
    /// The identity format check is local and short-circuits with
    /// `InvalidIdentity` before any request is made. The four fetches run
    /// strictly sequentially.
    pub async fn load_initial(&self, identity: &str) -> Result<Profile, FetchError> {
        validate_identity(identity)?;

        log::info!("🔍 Loading profile for {}", identity);

        let user = self.client.fetch_user(identity).await?;

        let first_page = self
            .client
            .fetch_timeline_page(identity, FIRST_PAGE, self.page_size)
            .await?;
        let timeline_cursor =
            PageCursor::after_first_page((first_page.len() as u32) < self.page_size);

        let follower_page = self
            .client
            .fetch_roster_page(identity, RosterKind::Followers, FIRST_PAGE)
            .await?;
        let follower_cursor = PageCursor::after_first_page(follower_page.is_empty());

        let friend_page = self
            .client
            .fetch_roster_page(identity, RosterKind::Friends, FIRST_PAGE)
            .await?;
        let friend_cursor = PageCursor::after_first_page(friend_page.is_empty());

        let timeline = aggregate_timeline(first_page);
        let followers = aggregate_roster(follower_page);
        let friends = aggregate_roster(friend_page);

        log::info!(
            "✅ Loaded {}: {} activities over {} days, {} followers, {} friends",
            identity,
            timeline.activity_count(),
            timeline.days.len(),
            followers.entry_count(),
            friends.entry_count()
        );

        Ok(Profile {
            user,
            timeline,
            followers,
            friends,
            timeline_cursor,
            follower_cursor,
            friend_cursor,
        })
    }

    /// Fetch up to `max_additional_pages` further timeline pages and fold
    /// them into the profile.
    ///
    /// Pages are fetched one at a time (each termination decision depends
    /// on the previous page's size); the walk stops early on a short page,
    /// which signals the end of history. New records are older than
    /// everything already held, so they are appended after the existing
    /// sequence and the whole concatenation is re-aggregated.
    ///
    /// Returns whether any new data was appended, so callers can skip
    /// dependent redraws. A failed page aborts the whole extension, leaves
    /// the profile untouched, and is never retried here.
    pub async fn extend_timeline(
        &self,
        profile: &mut Profile,
        max_additional_pages: u32,
    ) -> Result<bool, FetchError> {
        if max_additional_pages == 0 {
            return Ok(false);
        }
        if profile.timeline_cursor.exhausted {
            log::debug!(
                "Timeline for {} already exhausted, skipping fetch",
                profile.user.screen_name
            );
            return Ok(false);
        }

        // Accumulate locally; the profile is only touched once every page
        // has arrived, so a failure leaves it exactly as it was.
        let mut cursor = profile.timeline_cursor;
        let mut fetched: Vec<ActivityRecord> = Vec::new();

        for _ in 0..max_additional_pages {
            let page = self
                .client
                .fetch_timeline_page(&profile.user.screen_name, cursor.next_page, self.page_size)
                .await?;

            cursor.next_page += 1;
            let short_page = (page.len() as u32) < self.page_size;
            fetched.extend(page);

            if short_page {
                cursor.exhausted = true;
                log::debug!("Reached end of history for {}", profile.user.screen_name);
                break;
            }
        }

        let changed = !fetched.is_empty();
        profile.timeline_cursor = cursor;

        if changed {
            let mut all = std::mem::take(&mut profile.timeline.activities);
            all.extend(fetched);
            profile.timeline = aggregate_timeline(all);
            log::info!(
                "📈 Extended timeline for {} to {} activities over {} days",
                profile.user.screen_name,
                profile.timeline.activity_count(),
                profile.timeline.days.len()
            );
        }

        Ok(changed)
    }

    /// Fetch one further roster page for followers or friends and fold it
    /// into the profile. An empty page marks the roster as exhausted.
    pub async fn extend_roster(
        &self,
        profile: &mut Profile,
        kind: RosterKind,
    ) -> Result<bool, FetchError> {
        let cursor = match kind {
            RosterKind::Followers => profile.follower_cursor,
            RosterKind::Friends => profile.friend_cursor,
        };
        if cursor.exhausted {
            return Ok(false);
        }

        let page = self
            .client
            .fetch_roster_page(&profile.user.screen_name, kind, cursor.next_page)
            .await?;

        let updated = PageCursor {
            next_page: cursor.next_page + 1,
            exhausted: page.is_empty(),
        };
        let changed = !page.is_empty();

        let stats = match kind {
            RosterKind::Followers => {
                profile.follower_cursor = updated;
                &mut profile.followers
            }
            RosterKind::Friends => {
                profile.friend_cursor = updated;
                &mut profile.friends
            }
        };

        if changed {
            let mut entries = std::mem::take(&mut stats.entries);
            entries.extend(page);
            *stats = aggregate_roster(entries);
            log::info!(
                "📈 Extended {} roster for {} to {} entries",
                kind.as_str(),
                profile.user.screen_name,
                stats.entry_count()
            );
        }

        Ok(changed)
    }
}
