use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::export::{export_filename, render_export, ExportArtifact};
use super::Transcription;
use crate::clipboard::Clipboard;
use crate::notice::{Notices, Severity};
use crate::storage::KeyValueStorage;

/// Storage key the serialized transcript log lives under.
pub const STORAGE_KEY: &str = "transcriptions";

/// Ordered, persisted log of finalized transcriptions, newest first.
///
/// The in-memory sequence and the persisted blob converge after every
/// mutation: `load` once at startup, `save` after every change.
pub struct TranscriptStore {
    records: Vec<Transcription>,
    storage: Box<dyn KeyValueStorage>,
    notices: Arc<Notices>,
}

impl TranscriptStore {
    pub fn new(storage: Box<dyn KeyValueStorage>, notices: Arc<Notices>) -> Self {
        Self {
            records: Vec::new(),
            storage,
            notices,
        }
    }

    /// Read the persisted log. Absence is silent; an unreadable or corrupt
    /// blob falls back to an empty store with a warning notice.
    pub fn load(&mut self) {
        let blob = match self.storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read saved transcriptions: {e:#}");
                self.notices
                    .publish(Severity::Warning, "Could not load saved transcriptions");
                return;
            }
        };

        match serde_json::from_str::<Vec<Transcription>>(&blob) {
            Ok(records) => {
                debug!("Loaded {} saved transcriptions", records.len());
                self.records = records;
            }
            Err(e) => {
                warn!("Saved transcriptions are corrupt: {e}");
                self.notices
                    .publish(Severity::Warning, "Could not load saved transcriptions");
            }
        }
    }

    /// Insert one record at the front (newest first), then save.
    pub fn append(&mut self, record: Transcription) {
        self.records.insert(0, record);
        self.save();
    }

    /// Persist the full sequence. Failure is non-fatal: a warning notice is
    /// published and the in-memory state stands.
    pub fn save(&self) {
        let result = serde_json::to_string(&self.records)
            .map_err(anyhow::Error::from)
            .and_then(|blob| self.storage.set(STORAGE_KEY, &blob));

        if let Err(e) = result {
            warn!("Failed to save transcriptions: {e:#}");
            self.notices
                .publish(Severity::Warning, "Could not save transcriptions");
        }
    }

    /// Empty the sequence, then save.
    pub fn clear(&mut self) {
        self.records.clear();
        self.save();
    }

    /// Render the downloadable export artifact.
    ///
    /// An empty store yields no artifact and an info notice instead.
    pub fn export(&self) -> Option<ExportArtifact> {
        if self.records.is_empty() {
            self.notices
                .publish(Severity::Info, "There are no transcriptions to export");
            return None;
        }

        Some(ExportArtifact {
            filename: export_filename(Local::now().date_naive()),
            body: render_export(&self.records),
        })
    }

    /// Place one record's text on the system clipboard.
    pub fn copy(&self, id: Uuid, clipboard: &dyn Clipboard) -> Result<()> {
        let record = self
            .get(id)
            .with_context(|| format!("No transcription with id {id}"))?;
        clipboard.copy(&record.text)
    }

    pub fn get(&self, id: Uuid) -> Option<&Transcription> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[Transcription] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
