//! HTTP device registry
//!
//! Forwards registrations to the downstream notification worker. The hand-off
//! is fire-once with a timeout: this layer does not retry, so a worker outage
//! surfaces to the caller as a dependency failure straight away.

use super::registry::DeviceRegistry;
use crate::error::{Error, Result};
use crate::types::DeviceToken;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default per-request timeout for worker calls
pub const DEFAULT_WORKER_TIMEOUT_SECS: u64 = 10;

/// Process-wide client shared by every registry instance
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(Client::new);

/// Registry that hands tokens to the notification worker over HTTP
#[derive(Debug, Clone)]
pub struct HttpDeviceRegistry {
    worker_url: Url,
    timeout: Duration,
}

impl HttpDeviceRegistry {
    /// Create a registry forwarding to the given worker base URL
    pub fn new(worker_url: Url) -> Self {
        Self {
            worker_url,
            timeout: Duration::from_secs(DEFAULT_WORKER_TIMEOUT_SECS),
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the worker endpoint for an action
    fn endpoint(&self, action: &str) -> String {
        let base = self.worker_url.as_str().trim_end_matches('/');
        format!("{base}/{action}")
    }

    async fn forward(&self, action: &str, token: &DeviceToken) -> Result<()> {
        let url = self.endpoint(action);
        let request = SHARED_CLIENT.post(&url).timeout(self.timeout).json(token);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(platform = %token.platform, "Forwarded device {action} to worker");
        Ok(())
    }
}

#[async_trait]
impl DeviceRegistry for HttpDeviceRegistry {
    async fn register(&self, token: &DeviceToken) -> Result<()> {
        self.forward("register", token).await
    }

    async fn unregister(&self, token: &DeviceToken) -> Result<()> {
        self.forward("unregister", token).await
    }
}
