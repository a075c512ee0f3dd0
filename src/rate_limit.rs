//! Rate-limit monitoring - quota polling on a fixed cadence
//!
//! Polls the remote API's quota endpoint and classifies the remaining
//! allowance into a severity band for display. A failed poll is logged and
//! swallowed so the previously displayed status stays up; polling continues
//! until the handle is cancelled.

use crate::client::api::{FetchError, SocialGraphClient};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Below this many remaining calls the session is about to stall.
const CRITICAL_BELOW: u32 = 50;

/// Below this many remaining calls the caller should go easy on extensions.
const WARNING_BELOW: u32 = 100;

/// Display band for the remaining request quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

impl Severity {
    /// Classify a remaining-call count into its display band.
    pub fn classify(remaining: u32) -> Self {
        if remaining < CRITICAL_BELOW {
            Severity::Critical
        } else if remaining < WARNING_BELOW {
            Severity::Warning
        } else {
            Severity::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Classified quota status, replaced wholesale on each poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    pub severity: Severity,
}

/// Cancellation handle for a running monitor.
///
/// After `cancel` returns, no further `on_update` dispatches occur; the
/// result of a poll already in flight is discarded on arrival.
pub struct MonitorHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

/// Periodically polls quota status and pushes classified updates to a
/// callback.
pub struct RateLimitMonitor<C> {
    client: Arc<C>,
}

impl<C: SocialGraphClient + 'static> RateLimitMonitor<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Fetch the quota status once and classify it.
    pub async fn poll_once(&self) -> Result<RateLimitStatus, FetchError> {
        let snapshot = self.client.fetch_quota_status().await?;
        Ok(RateLimitStatus {
            remaining: snapshot.remaining,
            reset_at: snapshot.reset_at,
            severity: Severity::classify(snapshot.remaining),
        })
    }

    /// Start polling on a fixed cadence.
    ///
    /// The first poll fires immediately so the caller has status without
    /// waiting a full interval. Poll failures are logged at warn level and
    /// swallowed; the next scheduled poll proceeds normally. Polling runs
    /// until the returned handle is cancelled.
    pub fn start<F>(&self, poll_interval: Duration, on_update: F) -> MonitorHandle
    where
        F: Fn(RateLimitStatus) + Send + Sync + 'static,
    {
        let client = self.client.clone();
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancel_flag = cancelled.clone();

        let task = tokio::spawn(async move {
            let monitor = RateLimitMonitor { client };
            let mut timer = interval(poll_interval);

            loop {
                // First tick completes immediately
                timer.tick().await;

                if cancel_flag.load(Ordering::SeqCst) {
                    break;
                }

                match monitor.poll_once().await {
                    Ok(status) => {
                        // Re-check after the await: a poll that was in
                        // flight when cancel() ran is discarded here.
                        if cancel_flag.load(Ordering::SeqCst) {
                            break;
                        }
                        log::debug!(
                            "Quota: {} remaining ({})",
                            status.remaining,
                            status.severity.as_str()
                        );
                        on_update(status);
                    }
                    Err(e) => {
                        log::warn!("⚠️  Quota poll failed (will retry on schedule): {}", e);
                    }
                }
            }
        });

        MonitorHandle { cancelled, task }
    }
}
