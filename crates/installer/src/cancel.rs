use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag that aborts an install batch.
///
/// Checked before each unit starts and again before its staged write is
/// persisted: already-completed units stay installed, the in-flight unit's
/// partial content is discarded with its staging file.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
