use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Capabilities, SessionState, SessionStatus};
use crate::audio::{AnalysisGraph, CaptureError, LevelMeter, MicStream};
use crate::notice::{Notices, Severity};
use crate::speech::{EngineError, EngineEvent, Language, ResultGroup};
use crate::store::{Transcription, TranscriptStore};

/// Resources held by one live session.
///
/// Cleared only by `teardown`, which every exit path funnels through.
struct LiveSession {
    mic: Box<dyn MicStream>,
    graph: Arc<dyn AnalysisGraph>,
    meter: LevelMeter,
    pump: JoinHandle<()>,
    started_at: DateTime<Utc>,
}

struct Inner {
    state: SessionState,
    language: Language,
    interim: String,

    /// Identity of the tracked session, bumped on every start and teardown.
    /// Engine callbacks carry the identity they were spawned under; anything
    /// stale is discarded.
    session_seq: u64,

    live: Option<LiveSession>,

    /// Absent on hosts without a recognition engine; `start` is then
    /// rejected with a capability-unsupported notice.
    caps: Option<Capabilities>,
}

impl Inner {
    fn tracks(&self, session_id: u64) -> bool {
        self.state == SessionState::Recording && self.session_seq == session_id
    }
}

/// Coordinates the microphone, the analysis graph, and the recognition
/// engine into one consistent on/off recording session.
///
/// The microphone and engine are exclusively held by at most one live
/// session; starting while one is active is rejected rather than queued.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Mutex<Inner>>,
    store: Arc<Mutex<TranscriptStore>>,
    notices: Arc<Notices>,
    level_tx: Arc<watch::Sender<f32>>,
    level_rx: watch::Receiver<f32>,
    meter_interval: Duration,
}

impl SessionController {
    pub fn new(
        capabilities: Option<Capabilities>,
        language: Language,
        meter_interval: Duration,
        store: Arc<Mutex<TranscriptStore>>,
        notices: Arc<Notices>,
    ) -> Self {
        let (level_tx, level_rx) = watch::channel(0.0f32);

        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::Idle,
                language,
                interim: String::new(),
                session_seq: 0,
                live: None,
                caps: capabilities,
            })),
            store,
            notices,
            level_tx: Arc::new(level_tx),
            level_rx,
            meter_interval,
        }
    }

    /// Begin a recording session.
    ///
    /// Acquisition is all-or-nothing: microphone, then analysis graph, then
    /// recognition; a failure at any step releases everything acquired
    /// before it and leaves the controller idle.
    pub async fn start(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;

        if inner.state == SessionState::Recording {
            anyhow::bail!("a recording session is already active");
        }

        let language = inner.language;

        let Some(caps) = inner.caps.as_mut() else {
            self.notices.publish(
                Severity::Error,
                "Speech recognition is not supported on this host",
            );
            anyhow::bail!("no speech recognition engine is available");
        };

        let mut mic = match caps.microphone.open().await {
            Ok(mic) => mic,
            Err(CaptureError::PermissionDenied) => {
                self.notices
                    .publish(Severity::Error, "Microphone access denied");
                return Err(CaptureError::PermissionDenied.into());
            }
            Err(e) => {
                self.notices
                    .publish(Severity::Error, "Failed to start recording");
                return Err(e).context("Failed to open microphone");
            }
        };

        let graph = match caps.analysis.attach(mic.as_mut()) {
            Ok(graph) => graph,
            Err(e) => {
                mic.stop_tracks();
                self.notices
                    .publish(Severity::Error, "Failed to start recording");
                return Err(e).context("Failed to attach analysis graph");
            }
        };

        let events = match caps.engine.start(language).await {
            Ok(events) => events,
            Err(e) => {
                graph.close();
                mic.stop_tracks();
                self.notices
                    .publish(Severity::Error, "Failed to start recording");
                return Err(e).context("Failed to start recognition");
            }
        };

        inner.session_seq = inner.session_seq.wrapping_add(1);
        let session_id = inner.session_seq;

        let meter = LevelMeter::spawn(
            Arc::clone(&graph),
            self.meter_interval,
            Arc::clone(&self.level_tx),
        );
        let pump = self.spawn_event_pump(session_id, events);

        inner.interim.clear();
        inner.live = Some(LiveSession {
            mic,
            graph,
            meter,
            pump,
            started_at: Utc::now(),
        });
        inner.state = SessionState::Recording;

        info!(session = session_id, language = %language, "recording session started");
        Ok(())
    }

    /// Stop the live session. No-op when idle.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        if inner.state != SessionState::Recording {
            return;
        }
        self.teardown(&mut inner).await;
        info!("recording session stopped");
    }

    /// Switch the recognition language.
    ///
    /// A live session is torn down; recording must be resumed manually.
    pub async fn set_language(&self, language: Language) {
        let mut inner = self.inner.lock().await;
        inner.language = language;

        if inner.state == SessionState::Recording {
            self.teardown(&mut inner).await;
            self.notices.publish(
                Severity::Info,
                format!("Recording stopped; start again to continue in {language}"),
            );
        }
    }

    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        SessionStatus {
            state: inner.state,
            language: inner.language,
            interim_transcript: inner.interim.clone(),
            audio_level: *self.level_rx.borrow(),
            started_at: inner.live.as_ref().map(|live| live.started_at),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    pub async fn language(&self) -> Language {
        self.inner.lock().await.language
    }

    pub async fn recording_supported(&self) -> bool {
        self.inner.lock().await.caps.is_some()
    }

    /// Current audio level in [0,1].
    pub fn audio_level(&self) -> f32 {
        *self.level_rx.borrow()
    }

    /// Watch the audio level as the meter publishes it.
    pub fn level_watch(&self) -> watch::Receiver<f32> {
        self.level_rx.clone()
    }

    /// The single routine that releases session resources: recognition,
    /// microphone tracks, analysis graph, meter loop, then the ephemeral
    /// fields. Invoked from manual stop, recognition errors, swallowed
    /// restart failures, and language changes.
    async fn teardown(&self, inner: &mut Inner) {
        if let Some(caps) = inner.caps.as_mut() {
            if let Err(e) = caps.engine.stop().await {
                warn!("Failed to stop recognition cleanly: {e:#}");
            }
        }

        if let Some(mut live) = inner.live.take() {
            live.mic.stop_tracks();
            live.graph.close();
            live.meter.cancel().await;
            live.pump.abort();
        }

        inner.session_seq = inner.session_seq.wrapping_add(1);
        inner.interim.clear();
        inner.state = SessionState::Idle;
        let _ = self.level_tx.send(0.0);
    }

    /// Forward engine events to the controller, tagged with the session
    /// identity the pump was spawned under.
    fn spawn_event_pump(
        &self,
        session_id: u64,
        mut events: mpsc::Receiver<EngineEvent>,
    ) -> JoinHandle<()> {
        let controller = self.clone();

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    EngineEvent::Results(groups) => {
                        controller.on_results(session_id, groups).await;
                    }
                    EngineEvent::Error(error) => {
                        controller.on_engine_error(session_id, error).await;
                    }
                    EngineEvent::Ended => {
                        // A restarted engine gets a fresh pump; this one is
                        // done either way.
                        controller.on_engine_ended(session_id).await;
                        break;
                    }
                }
            }
            debug!(session = session_id, "engine event pump finished");
        })
    }

    /// Apply one result batch: final groups become a stored record, the
    /// remaining interim groups replace the ephemeral interim transcript.
    async fn on_results(&self, session_id: u64, groups: Vec<ResultGroup>) {
        let mut inner = self.inner.lock().await;
        if !inner.tracks(session_id) {
            return;
        }

        let mut final_parts: Vec<&str> = Vec::new();
        let mut confidence: Option<f32> = None;
        let mut interim = String::new();

        for group in &groups {
            let Some(top) = group.top() else { continue };
            if group.is_final {
                final_parts.push(top.transcript.as_str());
                confidence = top.confidence;
            } else {
                interim.push_str(&top.transcript);
            }
        }

        let final_text = final_parts.join(" ").trim().to_string();
        if !final_text.is_empty() {
            let record = Transcription::new(final_text, confidence, inner.language);
            debug!(session = session_id, text = %record.text, "utterance finalized");
            self.store.lock().await.append(record);
        }

        inner.interim = interim;
    }

    async fn on_engine_error(&self, session_id: u64, error: EngineError) {
        let mut inner = self.inner.lock().await;
        if !inner.tracks(session_id) {
            return;
        }

        let message = match &error {
            EngineError::NotAllowed => "Microphone access denied",
            EngineError::LanguageUnavailable => "The selected language is not available",
            EngineError::NoSpeech => "No speech was detected",
            EngineError::Aborted | EngineError::Other(_) => "Speech recognition error",
        };
        warn!(session = session_id, %error, "recognition error");
        self.notices.publish(Severity::Error, message);

        self.teardown(&mut inner).await;
    }

    /// The engine gave up on its own while we still want to record:
    /// restart recognition under the same session identity. A failed
    /// restart is treated as an intentional stop.
    async fn on_engine_ended(&self, session_id: u64) {
        let mut inner = self.inner.lock().await;
        if !inner.tracks(session_id) {
            return;
        }

        debug!(session = session_id, "recognition ended spontaneously, restarting");
        let language = inner.language;

        let restarted = match inner.caps.as_mut() {
            Some(caps) => caps.engine.start(language).await,
            None => Err(anyhow::anyhow!("recognition engine went away")),
        };

        match restarted {
            Ok(events) => {
                let pump = self.spawn_event_pump(session_id, events);
                if let Some(live) = inner.live.as_mut() {
                    live.pump = pump;
                }
            }
            Err(e) => {
                debug!("recognition restart failed, treating as stop: {e:#}");
                self.teardown(&mut inner).await;
            }
        }
    }
}
