use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{LeadInput, Priority};

/// Structured event log for the lead pipeline.
///
/// One JSON object per line, one line per stage transition
/// (`received`, `rejected`, `processed`, `done`) plus infrastructure events
/// (`file_error`, `enrichment_failed`, `persistence_failed`). Every entry
/// carries the stage name and a snapshot of the original lead; score,
/// priority, assignee and reason are filled per stage. Each write is also
/// mirrored to `tracing`.
///
/// The log is the only per-lead feedback channel besides the persisted
/// store: intake acknowledges batches without waiting for outcomes.
pub struct EventLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl EventLog {
    /// Opens (or creates) the append-only event log file, creating parent
    /// directories as needed. Initialized once at process start.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn received(&self, lead_id: Uuid, lead: &LeadInput) {
        self.record("received", Some(lead_id), Some(lead), None, None, None, None);
    }

    pub fn rejected(&self, lead_id: Uuid, lead: &LeadInput, reason: &str) {
        self.record(
            "rejected",
            Some(lead_id),
            Some(lead),
            None,
            None,
            None,
            Some(reason),
        );
    }

    pub fn processed(&self, lead_id: Uuid, lead: &LeadInput, score: u8, priority: Priority) {
        self.record(
            "processed",
            Some(lead_id),
            Some(lead),
            Some(score),
            Some(priority),
            None,
            None,
        );
    }

    pub fn done(
        &self,
        lead_id: Uuid,
        lead: &LeadInput,
        score: u8,
        priority: Priority,
        assigned_to: &str,
    ) {
        self.record(
            "done",
            Some(lead_id),
            Some(lead),
            Some(score),
            Some(priority),
            Some(assigned_to),
            None,
        );
    }

    pub fn enrichment_failed(&self, lead_id: Uuid, lead: &LeadInput, reason: &str) {
        self.record(
            "enrichment_failed",
            Some(lead_id),
            Some(lead),
            None,
            None,
            None,
            Some(reason),
        );
    }

    pub fn persistence_failed(&self, lead_id: Uuid, lead: &LeadInput, reason: &str) {
        self.record(
            "persistence_failed",
            Some(lead_id),
            Some(lead),
            None,
            None,
            None,
            Some(reason),
        );
    }

    /// Startup-time infrastructure event, e.g. a missing reference file.
    pub fn file_error(&self, reason: &str) {
        self.record("file_error", None, None, None, None, None, Some(reason));
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        stage: &str,
        lead_id: Option<Uuid>,
        lead: Option<&LeadInput>,
        score: Option<u8>,
        priority: Option<Priority>,
        assigned_to: Option<&str>,
        reason: Option<&str>,
    ) {
        let original_lead = match lead {
            Some(lead) => serde_json::to_value(lead).unwrap_or_else(|_| json!({})),
            None => json!({}),
        };

        let entry = json!({
            "stage": stage,
            "timestamp": Utc::now().to_rfc3339(),
            "lead_id": lead_id,
            "original_lead": original_lead,
            "score": score,
            "priority": priority,
            "assigned_to": assigned_to,
            "reason": reason,
        });

        tracing::info!(
            stage,
            lead_id = lead_id.map(|id| id.to_string()).as_deref().unwrap_or("-"),
            score,
            priority = priority.map(|p| p.as_str()),
            assigned_to,
            reason,
            "lead pipeline event"
        );

        self.write_line(&entry);
    }

    fn write_line(&self, entry: &Value) {
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(file, "{}", entry) {
            tracing::error!("Failed to write event log entry: {}", e);
        }
    }
}
