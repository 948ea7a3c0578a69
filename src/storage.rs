use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::ProcessedLeadRecord;

/// Append-only store for processed lead records.
///
/// The store is a single JSON document (an ordered array) rewritten in full
/// on every append. Pipeline runs are independent but physically serialize
/// here: the lock is held across the whole read-modify-write so interleaved
/// appends cannot lose updates.
pub struct LeadStore {
    path: PathBuf,
    dead_letter_path: PathBuf,
    write_lock: Mutex<()>,
}

impl LeadStore {
    /// Creates the store handle, ensuring the parent directory exists.
    pub fn new(
        path: impl AsRef<Path>,
        dead_letter_path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            dead_letter_path: dead_letter_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Appends a record to the store. Whole-document read-then-rewrite under
    /// the write lock.
    pub async fn append(&self, record: &ProcessedLeadRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all_unlocked().await?;
        records.push(record.clone());

        let body = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(&self.path, body).await?;

        tracing::debug!(
            lead_id = %record.lead_id,
            total = records.len(),
            "Appended record to lead store"
        );
        Ok(())
    }

    /// Reads the full ordered sequence of persisted records.
    pub async fn read_all(&self) -> Result<Vec<ProcessedLeadRecord>, AppError> {
        let _guard = self.write_lock.lock().await;
        self.read_all_unlocked().await
    }

    async fn read_all_unlocked(&self) -> Result<Vec<ProcessedLeadRecord>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::StorageError(e)),
        }
    }

    /// Best-effort dead-letter append for records that failed to persist.
    /// One JSON object per line; a failure here is only logged, the record
    /// has already been surfaced via a `persistence_failed` event.
    pub async fn dead_letter(&self, record: &ProcessedLeadRecord) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(lead_id = %record.lead_id, "Failed to serialize dead-letter record: {}", e);
                return;
            }
        };

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.dead_letter_path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.write_all(b"\n").await?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = result {
            tracing::error!(lead_id = %record.lead_id, "Failed to write dead-letter record: {}", e);
        }
    }
}
