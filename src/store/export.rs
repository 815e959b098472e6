use chrono::{Local, NaiveDate};

use super::Transcription;

/// Rendered export offered to the user as a downloadable text file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub body: String,
}

/// `transcriptions-<ISO date>.txt`
pub fn export_filename(date: NaiveDate) -> String {
    format!("transcriptions-{}.txt", date.format("%Y-%m-%d"))
}

/// One `[<local time> - <language>] <text>` line per record.
pub fn format_line(record: &Transcription) -> String {
    let local = record.timestamp.with_timezone(&Local);
    format!(
        "[{} - {}] {}",
        local.format("%Y-%m-%d %H:%M:%S"),
        record.language,
        record.text
    )
}

/// Render the full sequence in store order, blocks separated by one blank
/// line, no trailing separator.
pub fn render_export(records: &[Transcription]) -> String {
    records
        .iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n\n")
}
