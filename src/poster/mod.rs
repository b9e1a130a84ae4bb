//! The delivery engine: drives each extracted comment through the remote
//! status client, one attempt at a time.
//!
//! Two timers live here and stay separate. The pacing interval is a short
//! sleep after every successful post that keeps steady-state throughput
//! under the service's request-rate ceiling. The cooldown is a long sleep
//! taken when the service reports it is rate limiting or overloaded.
//! Delivery is strictly sequential and in input order; a comment that cannot
//! be delivered stops the whole batch.

use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::api::{ClientError, StatusClient};
use crate::logutil::preview;

/// The one status code that counts as a delivered comment.
const SUCCESS_STATUS: u16 = 200;

// The following HTTP codes require special handling.
const UNAUTHORIZED_STATUSES: [u16; 2] = [400, 401];
const RATE_LIMIT_STATUSES: [u16; 2] = [420, 429];
const SERVER_OVERLOAD_STATUSES: [u16; 3] = [502, 503, 504];

/// Fatal delivery outcomes. Everything transient (lost connections,
/// rate limiting, unknown status codes) is retried inside the poster and
/// never escapes it.
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Unauthorized to update status. Check your API credentials.")]
    Unauthorized,

    #[error("Failed to post all comments.")]
    RetriesExhausted,
}

/// Tunable delivery behavior, read from the `[delivery]` config section.
///
/// Tests shorten the timers; production keeps the defaults, which are sized
/// for a service that allows roughly one update every half minute and backs
/// off hard when told to wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Delivery tries per comment before the batch fails.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Sleep after every successful post, in seconds.
    #[serde(default = "default_pacing_seconds")]
    pub pacing_seconds: u64,
    /// Sleep after a rate-limit response, in seconds.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    /// Treat 502/503/504 like explicit rate-limit responses (cooldown and
    /// retry) instead of unknown statuses.
    #[serde(default = "default_retry_server_overload")]
    pub retry_server_overload: bool,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_pacing_seconds() -> u64 {
    36
}

fn default_cooldown_seconds() -> u64 {
    60 * 5
}

fn default_retry_server_overload() -> bool {
    true
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            pacing_seconds: default_pacing_seconds(),
            cooldown_seconds: default_cooldown_seconds(),
            retry_server_overload: default_retry_server_overload(),
        }
    }
}

impl DeliveryConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Statuses that mean the credentials are bad. Never retried.
    pub fn is_unauthorized(&self, status: u16) -> bool {
        UNAUTHORIZED_STATUSES.contains(&status)
    }

    /// Statuses that mean "come back later": explicit rate limiting, plus
    /// server overload when configured.
    pub fn is_rate_limited(&self, status: u16) -> bool {
        RATE_LIMIT_STATUSES.contains(&status)
            || (self.retry_server_overload && SERVER_OVERLOAD_STATUSES.contains(&status))
    }
}

/// Running totals for a delivery batch.
#[derive(Debug, Clone, Default)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub connection_drops: u64,
    pub cooldowns: u64,
    pub unknown_statuses: u64,
}

/// Posts a batch of comments through a [`StatusClient`], retrying each one
/// within a bounded attempt budget.
pub struct StatusPoster<C> {
    client: C,
    config: DeliveryConfig,
    stats: DeliveryStats,
}

impl<C: StatusClient> StatusPoster<C> {
    pub fn new(client: C, config: DeliveryConfig) -> Self {
        Self {
            client,
            config,
            stats: DeliveryStats::default(),
        }
    }

    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    /// Deliver every comment, in order. Returns only when the whole batch
    /// has been posted; any fatal condition aborts the remaining comments.
    pub async fn post<S: AsRef<str>>(&mut self, comments: &[S]) -> Result<(), PostError> {
        for comment in comments {
            self.deliver(comment.as_ref()).await?;
        }
        info!("All comments successfully posted!");
        Ok(())
    }

    /// Run the retry loop for a single comment.
    ///
    /// Every attempt consumes budget, whether it failed on a lost
    /// connection, a rate-limit cooldown, or an unknown status. Falling out
    /// of the loop without a success is the exhausted-retries outcome.
    async fn deliver(&mut self, comment: &str) -> Result<(), PostError> {
        for attempt in 1..=self.config.max_attempts {
            match self.client.submit(comment).await {
                Err(ClientError::ConnectionLost(reason)) => {
                    self.stats.connection_drops += 1;
                    warn!(
                        "Connection to the status service was lost ({}). Attempted {} of {} times.",
                        reason, attempt, self.config.max_attempts
                    );
                }
                Ok(SUCCESS_STATUS) => {
                    self.stats.delivered += 1;
                    info!("Comment successfully posted: {}", preview(comment));
                    sleep(self.config.pacing()).await;
                    return Ok(());
                }
                Ok(status) if self.config.is_unauthorized(status) => {
                    return Err(PostError::Unauthorized);
                }
                Ok(status) if self.config.is_rate_limited(status) => {
                    self.stats.cooldowns += 1;
                    warn!(
                        "The status service asked us to wait (status {}). Retrying in {}s.",
                        status, self.config.cooldown_seconds
                    );
                    sleep(self.config.cooldown()).await;
                }
                Ok(status) => {
                    self.stats.unknown_statuses += 1;
                    warn!(
                        "The status service responded with a status code of {}.",
                        status
                    );
                }
            }
        }

        Err(PostError::RetriesExhausted)
    }
}
