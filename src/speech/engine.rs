use anyhow::Result;
use tokio::sync::mpsc;

use super::Language;

/// A single ranked transcript candidate within a result group.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    /// Engine-reported confidence in [0,1], when the engine provides one.
    pub confidence: Option<f32>,
}

/// One group of alternatives from the engine's growing result list.
///
/// Interim groups may still be revised by the engine; final groups are
/// committed and trigger storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup {
    pub is_final: bool,
    /// Ranked best-first; engines always report at least one.
    pub alternatives: Vec<Alternative>,
}

impl ResultGroup {
    /// The top-ranked alternative, if the engine reported any.
    pub fn top(&self) -> Option<&Alternative> {
        self.alternatives.first()
    }
}

/// Recognition failure kinds, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("microphone access was denied")]
    NotAllowed,
    #[error("the requested language is not available")]
    LanguageUnavailable,
    #[error("no speech was detected")]
    NoSpeech,
    #[error("recognition was aborted")]
    Aborted,
    #[error("recognition failed: {0}")]
    Other(String),
}

/// Events emitted by a running recognition session, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// New result groups appended to the session's growing result list.
    Results(Vec<ResultGroup>),
    Error(EngineError),
    /// The engine ended the session on its own (silence timeout and the
    /// like); the caller decides whether to restart.
    Ended,
}

/// Speech recognition capability.
///
/// Sessions run continuous with interim results enabled. `start` may be
/// called again after the previous session stopped or ended; at most one
/// session is live at a time.
#[async_trait::async_trait]
pub trait SpeechEngine: Send {
    /// Begin a recognition session in the given language.
    ///
    /// Returns a channel receiver that delivers the session's events.
    async fn start(&mut self, language: Language) -> Result<mpsc::Receiver<EngineEvent>>;

    /// Stop the live recognition session, if any.
    async fn stop(&mut self) -> Result<()>;

    /// Engine name for logging.
    fn name(&self) -> &str;
}
