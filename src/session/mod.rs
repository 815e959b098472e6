//! Recording session management
//!
//! This module provides the `SessionController` abstraction that manages:
//! - Microphone acquisition and release
//! - Continuous, interim-enabled speech recognition
//! - Audio-level metering for the visual meter
//! - Atomic teardown on stop, error, and language change
//! - Commitment of finalized utterances to the transcript store

mod capabilities;
mod controller;
mod status;

pub use capabilities::Capabilities;
pub use controller::SessionController;
pub use status::{SessionState, SessionStatus};
