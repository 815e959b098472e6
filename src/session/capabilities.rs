use anyhow::Result;

use crate::audio::{AudioAnalysis, Microphone};
use crate::speech::SpeechEngine;

/// The three platform capabilities one recording session coordinates.
pub struct Capabilities {
    pub microphone: Box<dyn Microphone>,
    pub analysis: Box<dyn AudioAnalysis>,
    pub engine: Box<dyn SpeechEngine>,
}

impl Capabilities {
    /// Resolve the host's capability set.
    ///
    /// No recognition engine ships with this crate; hosts wire one in
    /// through the `SpeechEngine` seam, together with matching microphone
    /// and analysis adapters. Until one is integrated, recording is
    /// reported unsupported and the rest of the service stays functional.
    pub fn detect() -> Result<Self> {
        anyhow::bail!("no speech recognition engine is available on this host")
    }

    pub fn new(
        microphone: Box<dyn Microphone>,
        analysis: Box<dyn AudioAnalysis>,
        engine: Box<dyn SpeechEngine>,
    ) -> Self {
        Self {
            microphone,
            analysis,
            engine,
        }
    }
}
