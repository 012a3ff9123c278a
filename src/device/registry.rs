//! Device registry trait and in-memory implementation

use crate::error::Result;
use crate::types::{DeviceToken, Platform};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Push token storage for mobile clients
///
/// Both operations are idempotent: registering the same token twice updates
/// it in place, and unregistering an unknown token succeeds quietly.
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Record a token so the device receives push notifications
    async fn register(&self, token: &DeviceToken) -> Result<()>;

    /// Remove a token from the registry
    async fn unregister(&self, token: &DeviceToken) -> Result<()>;
}

/// Registry keeping tokens in process memory
#[derive(Debug, Default)]
pub struct MemoryDeviceRegistry {
    devices: RwLock<HashMap<String, Platform>>,
}

impl MemoryDeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered devices
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Check whether a token is registered
    pub async fn contains(&self, token: &str) -> bool {
        self.devices.read().await.contains_key(token)
    }

    /// Platform a token was registered for
    pub async fn platform_of(&self, token: &str) -> Option<Platform> {
        self.devices.read().await.get(token).copied()
    }
}

#[async_trait]
impl DeviceRegistry for MemoryDeviceRegistry {
    async fn register(&self, token: &DeviceToken) -> Result<()> {
        self.devices
            .write()
            .await
            .insert(token.token.clone(), token.platform);
        Ok(())
    }

    async fn unregister(&self, token: &DeviceToken) -> Result<()> {
        self.devices.write().await.remove(&token.token);
        Ok(())
    }
}
