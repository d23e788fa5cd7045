use std::sync::atomic::{AtomicBool, Ordering};

/// Whether this execution environment has already served an invocation.
///
/// Starts cold; flips to warm once and stays there for the life of the
/// process.
#[derive(Debug, Default)]
pub(crate) struct WarmState {
    warm: AtomicBool,
}

impl WarmState {
    pub(crate) fn is_cold(&self) -> bool {
        !self.warm.load(Ordering::Acquire)
    }

    pub(crate) fn mark_warm(&self) {
        self.warm.store(true, Ordering::Release);
    }
}
