//! Speech recognition capability seam
//!
//! The engine itself is an external capability: this module defines the
//! trait a recognition integration implements, the event and result types
//! it emits, and the closed set of recognition locales.

mod engine;
mod language;

pub use engine::{Alternative, EngineError, EngineEvent, ResultGroup, SpeechEngine};
pub use language::{Language, UnknownLanguage};
