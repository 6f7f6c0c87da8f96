//! File-backed status store

use super::{StatusStore, StoreError};
use async_trait::async_trait;
use scope_shared::DeviceStatus;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Status record persisted as a one-line text file
pub struct FileStatusStore {
    path: PathBuf,
    temp_path: PathBuf,
    /// Serializes every read and write of the record
    lock: Mutex<()>,
}

impl FileStatusStore {
    /// Create a store for the given record path. The file is not touched
    /// until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "status".into());
        let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

        Self {
            path,
            temp_path,
            lock: Mutex::new(()),
        }
    }

    async fn write_temp(&self, record: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.temp_path).await?;
        file.write_all(record.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl StatusStore for FileStatusStore {
    async fn read(&self) -> Result<Option<DeviceStatus>, StoreError> {
        let _guard = self.lock.lock().await;

        let record = match fs::read_to_string(&self.path).await {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        DeviceStatus::parse_record(&record)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    async fn write(&self, status: &DeviceStatus) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let record = status.to_record();

        // Rename is atomic, so other processes see either the old or new record
        let result = match self.write_temp(&record).await {
            Ok(()) => fs::rename(&self.temp_path, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(source) = result {
            let _ = fs::remove_file(&self.temp_path).await;
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), "Status record written: {}", status);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
