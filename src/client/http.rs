//! HTTP implementation of the social-graph client
//!
//! Talks to the remote JSON API with a timeout-bounded `reqwest` client.
//! Endpoints and field names follow the classic REST surface:
//!
//! - `users/show.json?screen_name=...`
//! - `statuses/user_timeline.json?screen_name=...&page=N&count=S`
//! - `statuses/followers.json` / `statuses/friends.json`
//! - `account/rate_limit_status.json`
//!
//! HTTP 404 maps to `FetchError::NotFound`; transport and parse failures
//! map to `FetchError::Transient`.

use super::api::{FetchError, SocialGraphClient};
use crate::types::{ActivityRecord, QuotaSnapshot, RosterEntry, RosterKind, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Timestamp layout used by the API, e.g. "Sat Mar 06 22:35:13 +0000 2010"
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// User header response structure
#[derive(Debug, Clone, Deserialize)]
struct UserDto {
    id: u64,
    screen_name: String,
    statuses_count: u64,
    followers_count: u64,
    friends_count: u64,
}

/// One timeline entry
#[derive(Debug, Clone, Deserialize)]
struct StatusDto {
    id: u64,
    text: String,
    created_at: String,
}

/// One roster member (only the reach-relevant fields)
#[derive(Debug, Clone, Deserialize)]
struct RosterMemberDto {
    id: u64,
    followers_count: u64,
}

/// Quota status response structure
#[derive(Debug, Clone, Deserialize)]
struct RateLimitDto {
    remaining_hits: u32,
    reset_time: String,
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, FetchError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FetchError::Transient(format!("bad timestamp {:?}: {}", raw, e)))
}

impl StatusDto {
    fn into_record(self) -> Result<ActivityRecord, FetchError> {
        Ok(ActivityRecord {
            id: self.id,
            text: self.text,
            created_at: parse_created_at(&self.created_at)?,
        })
    }
}

/// Social-graph client backed by the remote HTTP API.
pub struct HttpSocialGraphClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSocialGraphClient {
    /// Build a client with a per-request timeout.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transient(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        identity: Option<&str>,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(
                identity.unwrap_or("<none>").to_string(),
            ));
        }
        if !response.status().is_success() {
            return Err(FetchError::Transient(format!(
                "API error on {}: {}",
                path,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Transient(format!("bad response from {}: {}", path, e)))
    }
}

#[async_trait]
impl SocialGraphClient for HttpSocialGraphClient {
    async fn fetch_user(&self, identity: &str) -> Result<UserProfile, FetchError> {
        let dto: UserDto = self
            .get_json(
                "users/show.json",
                &[("screen_name", identity.to_string())],
                Some(identity),
            )
            .await?;

        Ok(UserProfile {
            id: dto.id,
            screen_name: dto.screen_name,
            statuses_count: dto.statuses_count,
            followers_count: dto.followers_count,
            friends_count: dto.friends_count,
        })
    }

    async fn fetch_timeline_page(
        &self,
        identity: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ActivityRecord>, FetchError> {
        let statuses: Vec<StatusDto> = self
            .get_json(
                "statuses/user_timeline.json",
                &[
                    ("screen_name", identity.to_string()),
                    ("page", page.to_string()),
                    ("count", page_size.to_string()),
                ],
                Some(identity),
            )
            .await?;

        statuses.into_iter().map(StatusDto::into_record).collect()
    }

    async fn fetch_roster_page(
        &self,
        identity: &str,
        kind: RosterKind,
        page: u32,
    ) -> Result<Vec<RosterEntry>, FetchError> {
        let path = match kind {
            RosterKind::Followers => "statuses/followers.json",
            RosterKind::Friends => "statuses/friends.json",
        };

        let members: Vec<RosterMemberDto> = self
            .get_json(
                path,
                &[
                    ("screen_name", identity.to_string()),
                    ("page", page.to_string()),
                ],
                Some(identity),
            )
            .await?;

        Ok(members
            .into_iter()
            .map(|m| RosterEntry {
                id: m.id,
                follower_count: m.followers_count,
            })
            .collect())
    }

    async fn fetch_quota_status(&self) -> Result<QuotaSnapshot, FetchError> {
        let dto: RateLimitDto = self
            .get_json("account/rate_limit_status.json", &[], None)
            .await?;

        Ok(QuotaSnapshot {
            remaining: dto.remaining_hits,
            reset_at: parse_created_at(&dto.reset_time)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_created_at() {
        let parsed = parse_created_at("Sat Mar 06 22:35:13 +0000 2010").unwrap();
        assert_eq!(parsed.date_naive().to_string(), "2010-03-06");
        assert_eq!(parsed.hour(), 22);
    }

    #[test]
    fn test_parse_created_at_rejects_garbage() {
        assert!(matches!(
            parse_created_at("yesterday-ish"),
            Err(FetchError::Transient(_))
        ));
    }

    #[test]
    fn test_status_dto_deserializes_and_converts() {
        let json = r#"{
            "id": 9876543210,
            "text": "just setting up my analytics",
            "created_at": "Mon Mar 01 09:15:00 +0000 2010",
            "truncated": false,
            "source": "web"
        }"#;

        let dto: StatusDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record().unwrap();

        assert_eq!(record.id, 9876543210);
        assert_eq!(record.text, "just setting up my analytics");
        assert_eq!(record.created_at.date_naive().to_string(), "2010-03-01");
    }

    #[test]
    fn test_roster_member_dto_ignores_extra_fields() {
        let json = r#"[
            {"id": 1, "followers_count": 42, "screen_name": "alpha", "verified": false},
            {"id": 2, "followers_count": 7, "screen_name": "beta"}
        ]"#;

        let members: Vec<RosterMemberDto> = serde_json::from_str(json).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].followers_count, 42);
    }

    #[test]
    fn test_rate_limit_dto_deserializes() {
        let json = r#"{
            "remaining_hits": 75,
            "hourly_limit": 150,
            "reset_time": "Sat Mar 06 23:00:00 +0000 2010",
            "reset_time_in_seconds": 1267916400
        }"#;

        let dto: RateLimitDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.remaining_hits, 75);
        assert!(parse_created_at(&dto.reset_time).is_ok());
    }
}
