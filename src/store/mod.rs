//! Status store for the telescope status record
//!
//! This module handles:
//! - The `StatusStore` capability shared by every connection handler
//! - A file backend that survives restarts (write-to-temp then rename)
//! - An in-memory backend for volatile runs and tests

mod file;
mod memory;

pub use file::FileStatusStore;
pub use memory::MemoryStatusStore;

use async_trait::async_trait;
use scope_shared::{DeviceStatus, StatusParseError};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while accessing the status record
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read status record {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write status record {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },

    #[error("Corrupt status record {}: {}", .path.display(), .source)]
    Corrupt {
        path: PathBuf,
        source: StatusParseError,
    },
}

/// Shared record of the device status.
///
/// Implementations serialize all access internally: a reader never observes
/// a partially written record.
#[async_trait]
pub trait StatusStore: Send + Sync + 'static {
    /// Last written status, or `None` if nothing was ever written
    async fn read(&self) -> Result<Option<DeviceStatus>, StoreError>;

    /// Replace the stored status
    async fn write(&self, status: &DeviceStatus) -> Result<(), StoreError>;

    /// Human-readable description of the backend
    fn describe(&self) -> String;
}

/// Which status store backend to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Persist the record in a file
    File(PathBuf),
    /// Keep the record in process memory only
    Memory,
}

impl StoreBackend {
    /// Create the store for this backend
    pub fn open(&self) -> Arc<dyn StatusStore> {
        match self {
            StoreBackend::File(path) => Arc::new(FileStatusStore::new(path.clone())),
            StoreBackend::Memory => Arc::new(MemoryStatusStore::new()),
        }
    }
}
