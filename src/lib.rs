pub mod audio;
pub mod clipboard;
pub mod config;
pub mod http;
pub mod notice;
pub mod session;
pub mod speech;
pub mod storage;
pub mod store;

pub use audio::{
    level_from_bins, AnalysisGraph, AudioAnalysis, CaptureError, LevelMeter, MicStream, Microphone,
};
pub use clipboard::{Clipboard, CommandClipboard};
pub use config::Config;
pub use http::{create_router, AppState};
pub use notice::{Notice, Notices, Severity};
pub use session::{Capabilities, SessionController, SessionState, SessionStatus};
pub use speech::{
    Alternative, EngineError, EngineEvent, Language, ResultGroup, SpeechEngine, UnknownLanguage,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{
    export_filename, format_line, render_export, ExportArtifact, TranscriptStore, Transcription,
    DEFAULT_CONFIDENCE, STORAGE_KEY,
};
