//! Integration tests for the paginated retrieval flow
//!
//! Drives the coordinator end to end against a scripted in-memory client:
//! load, multi-page timeline extension with natural-end detection, roster
//! extension, and day-bucket consistency across page boundaries.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tweetpulse::{
    ActivityRecord, FetchError, QuotaSnapshot, RetrievalCoordinator, RosterEntry, RosterKind,
    SocialGraphClient, UserProfile,
};

const PAGE_SIZE: u32 = 3;

fn record(id: u64, day: u32, hour: u32, text: &str) -> ActivityRecord {
    ActivityRecord {
        id,
        text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2010, 3, day, hour, 0, 0).unwrap(),
    }
}

/// Scripted social-graph client. Timeline and roster pages are handed out
/// in order; calls beyond the script return empty pages.
struct ScriptedClient {
    timeline_pages: Mutex<VecDeque<Vec<ActivityRecord>>>,
    follower_pages: Mutex<VecDeque<Vec<RosterEntry>>>,
    timeline_calls: AtomicU32,
}

impl ScriptedClient {
    fn new(timeline_pages: Vec<Vec<ActivityRecord>>, follower_pages: Vec<Vec<RosterEntry>>) -> Self {
        Self {
            timeline_pages: Mutex::new(timeline_pages.into_iter().collect()),
            follower_pages: Mutex::new(follower_pages.into_iter().collect()),
            timeline_calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SocialGraphClient for ScriptedClient {
    async fn fetch_user(&self, identity: &str) -> Result<UserProfile, FetchError> {
        Ok(UserProfile {
            id: 1,
            screen_name: identity.to_string(),
            statuses_count: 500,
            followers_count: 40,
            friends_count: 20,
        })
    }

    async fn fetch_timeline_page(
        &self,
        _identity: &str,
        _page: u32,
        _page_size: u32,
    ) -> Result<Vec<ActivityRecord>, FetchError> {
        self.timeline_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .timeline_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn fetch_roster_page(
        &self,
        _identity: &str,
        kind: RosterKind,
        _page: u32,
    ) -> Result<Vec<RosterEntry>, FetchError> {
        match kind {
            RosterKind::Followers => Ok(self
                .follower_pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default()),
            RosterKind::Friends => Ok(vec![RosterEntry {
                id: 99,
                follower_count: 5,
            }]),
        }
    }

    async fn fetch_quota_status(&self) -> Result<QuotaSnapshot, FetchError> {
        Ok(QuotaSnapshot {
            remaining: 150,
            reset_at: Utc.with_ymd_and_hms(2010, 3, 7, 0, 0, 0).unwrap(),
        })
    }
}

#[tokio::test]
async fn test_extension_stops_on_short_page() {
    // Pages after the initial one: full, full, short. A budget of 3 must
    // consume exactly those three calls, stop on the short page, and
    // report changed.
    let client = Arc::new(ScriptedClient::new(
        vec![
            // initial page (full)
            vec![
                record(9, 6, 12, "nine"),
                record(8, 6, 9, "eight"),
                record(7, 5, 20, "seven"),
            ],
            // extension pages
            vec![
                record(6, 5, 11, "six"),
                record(5, 4, 18, "five"),
                record(4, 4, 10, "four"),
            ],
            vec![
                record(3, 3, 22, "three"),
                record(2, 3, 7, "two"),
                record(1, 2, 15, "one"),
            ],
            vec![record(0, 1, 9, "zero")],
        ],
        vec![vec![RosterEntry {
            id: 1,
            follower_count: 10,
        }]],
    ));
    let coordinator = RetrievalCoordinator::new(client.clone(), PAGE_SIZE);

    let mut profile = coordinator.load_initial("rsandor").await.unwrap();
    assert_eq!(client.timeline_calls.load(Ordering::SeqCst), 1);
    assert_eq!(profile.timeline.activity_count(), 3);

    let changed = coordinator.extend_timeline(&mut profile, 3).await.unwrap();

    assert!(changed);
    assert_eq!(client.timeline_calls.load(Ordering::SeqCst), 4);
    assert_eq!(profile.timeline.activity_count(), 10);
    assert!(profile.timeline_exhausted());

    // Further extensions are no-ops once history is exhausted
    let changed = coordinator.extend_timeline(&mut profile, 2).await.unwrap();
    assert!(!changed);
    assert_eq!(client.timeline_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_extension_is_monotonic_and_rebuckets_split_days() {
    // The extension page starts on the same calendar day (Mar 5) the
    // initial page ended on. Re-aggregation must merge both halves into a
    // single bucket.
    let client = Arc::new(ScriptedClient::new(
        vec![
            vec![
                record(6, 6, 14, "aa"),
                record(5, 5, 23, "bb"),
                record(4, 5, 19, "cc"),
            ],
            vec![
                record(3, 5, 8, "dd"),
                record(2, 4, 12, "ee"),
            ],
        ],
        vec![],
    ));
    let coordinator = RetrievalCoordinator::new(client, PAGE_SIZE);

    let mut profile = coordinator.load_initial("rsandor").await.unwrap();
    let count_before = profile.timeline.activity_count();
    assert_eq!(profile.timeline.days.len(), 2);

    let changed = coordinator.extend_timeline(&mut profile, 1).await.unwrap();
    assert!(changed);
    assert!(profile.timeline.activity_count() >= count_before);

    // Mar 6 (1), Mar 5 (3, merged across the page boundary), Mar 4 (1)
    assert_eq!(profile.timeline.days.len(), 3);
    assert_eq!(profile.timeline.days[1].activity_count(), 3);
    assert_eq!(profile.timeline.days[0].velocity, Some(-2));
    assert_eq!(profile.timeline.days[1].velocity, Some(2));
    assert_eq!(profile.timeline.days[2].velocity, None);

    // Raw order preserved: newest first across both pages
    let ids: Vec<u64> = profile.timeline.activities.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![6, 5, 4, 3, 2]);
}

#[tokio::test]
async fn test_roster_extension_accumulates_and_exhausts() {
    let client = Arc::new(ScriptedClient::new(
        vec![vec![record(1, 3, 10, "only")]],
        vec![
            vec![
                RosterEntry {
                    id: 1,
                    follower_count: 100,
                },
                RosterEntry {
                    id: 2,
                    follower_count: 50,
                },
            ],
            vec![RosterEntry {
                id: 3,
                follower_count: 10,
            }],
            // third follower page is empty -> exhausted
        ],
    ));
    let coordinator = RetrievalCoordinator::new(client, PAGE_SIZE);

    let mut profile = coordinator.load_initial("rsandor").await.unwrap();
    assert_eq!(profile.followers.total_reach_potential, 150);
    assert_eq!(profile.followers.average_reach_potential, 75.0);

    let changed = coordinator
        .extend_roster(&mut profile, RosterKind::Followers)
        .await
        .unwrap();
    assert!(changed);
    assert_eq!(profile.followers.entry_count(), 3);
    assert_eq!(profile.followers.total_reach_potential, 160);

    // Empty page: no change, roster marked exhausted
    let changed = coordinator
        .extend_roster(&mut profile, RosterKind::Followers)
        .await
        .unwrap();
    assert!(!changed);
    assert_eq!(profile.followers.entry_count(), 3);

    // Exhausted roster stays put without further fetches
    let changed = coordinator
        .extend_roster(&mut profile, RosterKind::Followers)
        .await
        .unwrap();
    assert!(!changed);

    // Friends roster is independent of the followers cursor
    let changed = coordinator
        .extend_roster(&mut profile, RosterKind::Friends)
        .await
        .unwrap();
    assert!(changed);
    assert_eq!(profile.friends.entry_count(), 2);
}
