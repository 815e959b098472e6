use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::MicStream;

/// Frequency-domain view over a live microphone stream.
///
/// Snapshots stop once the graph has been closed.
pub trait AnalysisGraph: Send + Sync {
    /// Current byte-scaled energy per frequency bin, `None` once closed.
    fn frequency_bins(&self) -> Option<Vec<u8>>;

    /// Release the graph; subsequent snapshots return `None`.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// Builds an analysis graph on top of an open microphone stream.
pub trait AudioAnalysis: Send + Sync {
    fn attach(&self, stream: &mut dyn MicStream) -> anyhow::Result<Arc<dyn AnalysisGraph>>;
}

/// Average a bin snapshot into a normalized [0,1] level.
pub fn level_from_bins(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| u32::from(b)).sum();
    (sum as f32 / bins.len() as f32 / 255.0).clamp(0.0, 1.0)
}

/// Periodic audio-level sampler.
///
/// While active it reads a frequency snapshot on every tick, averages it,
/// and publishes the normalized level on the watch channel. The loop
/// self-terminates when the graph reports closed (publishing a final 0.0),
/// and is cancelled by the session teardown.
pub struct LevelMeter {
    active: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl LevelMeter {
    pub fn spawn(
        graph: Arc<dyn AnalysisGraph>,
        interval: Duration,
        level_tx: Arc<watch::Sender<f32>>,
    ) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            while flag.load(Ordering::Relaxed) {
                ticker.tick().await;

                match graph.frequency_bins() {
                    Some(bins) => {
                        let _ = level_tx.send(level_from_bins(&bins));
                    }
                    None => break,
                }
            }

            let _ = level_tx.send(0.0);
            debug!("level meter stopped");
        });

        Self { active, handle }
    }

    /// Cancel the sampling loop and wait for it to finish, so no late frame
    /// can land after the teardown's final level. Called from every teardown
    /// path.
    pub async fn cancel(self) {
        self.active.store(false, Ordering::Relaxed);
        self.handle.abort();
        let _ = self.handle.await;
    }
}
