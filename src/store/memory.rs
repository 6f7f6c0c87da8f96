//! In-memory status store

use super::{StatusStore, StoreError};
use async_trait::async_trait;
use scope_shared::DeviceStatus;
use tokio::sync::RwLock;

/// Status record kept in process memory; lost on restart
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    status: RwLock<Option<DeviceStatus>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `status`
    #[cfg(test)]
    pub fn with_status(status: DeviceStatus) -> Self {
        Self {
            status: RwLock::new(Some(status)),
        }
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn read(&self) -> Result<Option<DeviceStatus>, StoreError> {
        Ok(self.status.read().await.clone())
    }

    async fn write(&self, status: &DeviceStatus) -> Result<(), StoreError> {
        *self.status.write().await = Some(status.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
