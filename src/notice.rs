use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A transient message surfaced to the user interface.
///
/// Notices never escalate to a crash boundary; they are the only way errors
/// reach the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// How many notices the recent-history buffer keeps.
const RECENT_CAPACITY: usize = 32;

/// Notice fan-out: live subscribers plus a bounded recent-history buffer
/// for late-joining clients.
pub struct Notices {
    tx: broadcast::Sender<Notice>,
    recent: Mutex<VecDeque<Notice>>,
}

impl Notices {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            tx,
            recent: Mutex::new(VecDeque::with_capacity(RECENT_CAPACITY)),
        }
    }

    pub fn publish(&self, severity: Severity, message: impl Into<String>) {
        let notice = Notice {
            severity,
            message: message.into(),
            at: Utc::now(),
        };

        match severity {
            Severity::Info => info!("{}", notice.message),
            Severity::Warning => warn!("{}", notice.message),
            Severity::Error => error!("{}", notice.message),
        }

        {
            let mut recent = self
                .recent
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if recent.len() == RECENT_CAPACITY {
                recent.pop_front();
            }
            recent.push_back(notice.clone());
        }

        // No live subscribers is fine; the recent buffer still has it.
        let _ = self.tx.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Most recent notices, oldest first.
    pub fn recent(&self) -> Vec<Notice> {
        self.recent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}
