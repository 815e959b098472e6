//! Persisted transcript log
//!
//! This module provides the transcript store:
//! - Immutable transcription records
//! - Newest-first ordering with save-on-change persistence
//! - Derived operations: clear, per-record clipboard copy, text export

mod export;
mod record;
mod store;

pub use export::{export_filename, format_line, render_export, ExportArtifact};
pub use record::{Transcription, DEFAULT_CONFIDENCE};
pub use store::{TranscriptStore, STORAGE_KEY};
