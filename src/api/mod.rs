//! Remote status endpoint contract and its HTTP implementation.
//!
//! The delivery engine only ever needs one operation from the remote side:
//! submit a piece of text, get back the numeric status code of the attempt.
//! Everything else (retries, pacing, cooldowns) is the poster's job, so the
//! client stays deliberately thin.

use std::time::Duration;

use log::debug;
use tokio::time::timeout;

use crate::config::ApiConfig;
use crate::logutil::preview;

/// Errors raised by a status client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP status: the connection dropped,
    /// timed out, or could not be established.
    #[error("connection to the status service was lost: {0}")]
    ConnectionLost(String),
}

/// The one operation the delivery engine requires from the remote service.
///
/// Implementations must not retry, pace, or otherwise second-guess the
/// caller; a response of *any* HTTP status is a successful `submit`.
pub trait StatusClient {
    fn submit(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<u16, ClientError>> + Send;
}

/// Posts status updates to the configured HTTP endpoint.
pub struct HttpStatusClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpStatusClient {
    /// Create a new client for the configured endpoint.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Check whether the client has the credentials it needs to post.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty() && !self.config.url.is_empty()
    }
}

impl StatusClient for HttpStatusClient {
    async fn submit(&self, text: &str) -> Result<u16, ClientError> {
        debug!("Submitting status update: {}", preview(text));

        let request = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "status": text }));

        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);
        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| {
                ClientError::ConnectionLost(format!(
                    "request timed out after {}s",
                    self.config.timeout_seconds
                ))
            })?
            .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

        Ok(response.status().as_u16())
    }
}
