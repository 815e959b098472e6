// Scripted capability fakes shared by the integration tests.
//
// The engine, microphone, and analysis graph are driven from the test body
// through small probe handles, so every asynchronous controller path can be
// exercised without platform capabilities.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex as AsyncMutex};

use voxlog::{
    Alternative, AnalysisGraph, AudioAnalysis, Capabilities, CaptureError, Clipboard, EngineEvent,
    Language, MemoryStorage, MicStream, Microphone, Notices, ResultGroup, SessionController,
    SpeechEngine, TranscriptStore,
};

// ============================================================================
// Scripted recognition engine
// ============================================================================

#[derive(Default)]
pub struct EngineHubState {
    pub sender: Option<mpsc::Sender<EngineEvent>>,
    pub start_count: usize,
    pub stop_count: usize,
    pub fail_next_start: bool,
    pub started_languages: Vec<Language>,
}

/// Test-side handle to the scripted engine.
#[derive(Clone, Default)]
pub struct EngineHub(pub Arc<Mutex<EngineHubState>>);

impl EngineHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> ScriptedEngine {
        ScriptedEngine(Arc::clone(&self.0))
    }

    pub fn fail_next_start(&self) {
        self.0.lock().unwrap().fail_next_start = true;
    }

    pub fn start_count(&self) -> usize {
        self.0.lock().unwrap().start_count
    }

    pub fn stop_count(&self) -> usize {
        self.0.lock().unwrap().stop_count
    }

    pub fn last_language(&self) -> Option<Language> {
        self.0.lock().unwrap().started_languages.last().copied()
    }

    /// Sender of the live scripted session, for stale-event tests.
    pub fn sender(&self) -> Option<mpsc::Sender<EngineEvent>> {
        self.0.lock().unwrap().sender.clone()
    }

    /// Deliver one event on the live session.
    pub async fn send(&self, event: EngineEvent) {
        let sender = self
            .sender()
            .expect("no live scripted recognition session");
        sender.send(event).await.expect("event channel closed");
    }
}

pub struct ScriptedEngine(Arc<Mutex<EngineHubState>>);

#[async_trait]
impl SpeechEngine for ScriptedEngine {
    async fn start(&mut self, language: Language) -> anyhow::Result<mpsc::Receiver<EngineEvent>> {
        let mut hub = self.0.lock().unwrap();
        hub.start_count += 1;
        hub.started_languages.push(language);
        if hub.fail_next_start {
            hub.fail_next_start = false;
            anyhow::bail!("scripted start failure");
        }
        let (tx, rx) = mpsc::channel(64);
        hub.sender = Some(tx);
        Ok(rx)
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        let mut hub = self.0.lock().unwrap();
        hub.stop_count += 1;
        hub.sender = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// Fake microphone
// ============================================================================

#[derive(Clone, Default)]
pub struct MicProbe {
    pub open_count: Arc<AtomicUsize>,
    pub stopped_tracks: Arc<AtomicUsize>,
    pub deny: Arc<AtomicBool>,
}

impl MicProbe {
    pub fn opens(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stopped_tracks.load(Ordering::SeqCst)
    }
}

pub struct FakeMicrophone {
    pub probe: MicProbe,
}

pub struct FakeMicStream {
    stopped: Arc<AtomicUsize>,
}

impl MicStream for FakeMicStream {
    fn stop_tracks(&mut self) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Microphone for FakeMicrophone {
    async fn open(&self) -> Result<Box<dyn MicStream>, CaptureError> {
        self.probe.open_count.fetch_add(1, Ordering::SeqCst);
        if self.probe.deny.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied);
        }
        Ok(Box::new(FakeMicStream {
            stopped: Arc::clone(&self.probe.stopped_tracks),
        }))
    }
}

// ============================================================================
// Fake analysis graph
// ============================================================================

pub struct FakeGraph {
    closed: AtomicBool,
    level: u8,
}

impl FakeGraph {
    pub fn new(level: u8) -> Self {
        Self {
            closed: AtomicBool::new(false),
            level,
        }
    }
}

impl AnalysisGraph for FakeGraph {
    fn frequency_bins(&self) -> Option<Vec<u8>> {
        if self.closed.load(Ordering::SeqCst) {
            None
        } else {
            Some(vec![self.level; 32])
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default)]
pub struct FakeAnalysis {
    pub graphs: Arc<Mutex<Vec<Arc<FakeGraph>>>>,
    pub fail: Arc<AtomicBool>,
}

impl FakeAnalysis {
    pub fn last_graph(&self) -> Arc<FakeGraph> {
        self.graphs
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no analysis graph was attached")
    }
}

impl AudioAnalysis for FakeAnalysis {
    fn attach(&self, _stream: &mut dyn MicStream) -> anyhow::Result<Arc<dyn AnalysisGraph>> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("scripted attach failure");
        }
        let graph = Arc::new(FakeGraph::new(128));
        self.graphs.lock().unwrap().push(Arc::clone(&graph));
        Ok(graph)
    }
}

// ============================================================================
// Recording clipboard
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingClipboard(pub Arc<Mutex<Vec<String>>>);

impl RecordingClipboard {
    pub fn copied(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Controller harness
// ============================================================================

pub struct Harness {
    pub controller: SessionController,
    pub store: Arc<AsyncMutex<TranscriptStore>>,
    pub notices: Arc<Notices>,
    pub engine: EngineHub,
    pub mic: MicProbe,
    pub analysis: FakeAnalysis,
}

pub fn harness() -> Harness {
    harness_with_language(Language::EnUs)
}

pub fn harness_with_language(language: Language) -> Harness {
    let notices = Arc::new(Notices::new());
    let store = Arc::new(AsyncMutex::new(TranscriptStore::new(
        Box::new(MemoryStorage::new()),
        Arc::clone(&notices),
    )));

    let engine = EngineHub::new();
    let mic = MicProbe::default();
    let analysis = FakeAnalysis::default();

    let capabilities = Capabilities::new(
        Box::new(FakeMicrophone { probe: mic.clone() }),
        Box::new(analysis.clone()),
        Box::new(engine.engine()),
    );

    let controller = SessionController::new(
        Some(capabilities),
        language,
        Duration::from_millis(5),
        Arc::clone(&store),
        Arc::clone(&notices),
    );

    Harness {
        controller,
        store,
        notices,
        engine,
        mic,
        analysis,
    }
}

// ============================================================================
// Event builders and async assertions
// ============================================================================

pub fn final_group(text: &str, confidence: Option<f32>) -> ResultGroup {
    ResultGroup {
        is_final: true,
        alternatives: vec![Alternative {
            transcript: text.to_string(),
            confidence,
        }],
    }
}

pub fn interim_group(text: &str) -> ResultGroup {
    ResultGroup {
        is_final: false,
        alternatives: vec![Alternative {
            transcript: text.to_string(),
            confidence: None,
        }],
    }
}

const WAIT_ATTEMPTS: usize = 400;
const WAIT_STEP: Duration = Duration::from_millis(5);

pub async fn wait_for_store_len(store: &Arc<AsyncMutex<TranscriptStore>>, expected: usize) {
    for _ in 0..WAIT_ATTEMPTS {
        if store.lock().await.len() == expected {
            return;
        }
        tokio::time::sleep(WAIT_STEP).await;
    }
    panic!(
        "store did not reach length {expected} (got {})",
        store.lock().await.len()
    );
}

pub async fn wait_for_interim(controller: &SessionController, expected: &str) {
    for _ in 0..WAIT_ATTEMPTS {
        if controller.status().await.interim_transcript == expected {
            return;
        }
        tokio::time::sleep(WAIT_STEP).await;
    }
    panic!(
        "interim transcript never became {expected:?} (got {:?})",
        controller.status().await.interim_transcript
    );
}

pub async fn wait_for_idle(controller: &SessionController) {
    for _ in 0..WAIT_ATTEMPTS {
        if controller.status().await.state == voxlog::SessionState::Idle {
            return;
        }
        tokio::time::sleep(WAIT_STEP).await;
    }
    panic!("controller never became idle");
}

pub async fn wait_for_start_count(engine: &EngineHub, expected: usize) {
    for _ in 0..WAIT_ATTEMPTS {
        if engine.start_count() == expected {
            return;
        }
        tokio::time::sleep(WAIT_STEP).await;
    }
    panic!(
        "engine start count never reached {expected} (got {})",
        engine.start_count()
    );
}
