use async_trait::async_trait;

/// Failure opening the microphone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The user (or platform policy) refused microphone access.
    #[error("microphone access was denied")]
    PermissionDenied,
    #[error("microphone unavailable: {0}")]
    Unavailable(String),
}

/// A live microphone stream with stoppable tracks.
pub trait MicStream: Send {
    /// Stop and release every track backing this stream.
    fn stop_tracks(&mut self);
}

/// Microphone capture capability.
#[async_trait]
pub trait Microphone: Send + Sync {
    /// Request microphone access and open a live stream.
    ///
    /// Platforms that prompt the user for permission do so here, which is
    /// why acquisition is async.
    async fn open(&self) -> Result<Box<dyn MicStream>, CaptureError>;
}
