use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clipboard::Clipboard;
use crate::notice::Notices;
use crate::session::SessionController;
use crate::store::TranscriptStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single recording session controller.
    pub controller: SessionController,

    /// Persisted transcript log.
    pub store: Arc<Mutex<TranscriptStore>>,

    /// System clipboard used by per-record copy.
    pub clipboard: Arc<dyn Clipboard>,

    /// User-facing notice fan-out.
    pub notices: Arc<Notices>,
}
