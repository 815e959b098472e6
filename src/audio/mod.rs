//! Microphone and audio-level capability seams
//!
//! Capture and analysis are platform capabilities consumed through traits:
//! the session controller only ever sees a stoppable stream and a
//! frequency-domain snapshot source.

pub mod capture;
pub mod meter;

pub use capture::{CaptureError, MicStream, Microphone};
pub use meter::{level_from_bins, AnalysisGraph, AudioAnalysis, LevelMeter};
