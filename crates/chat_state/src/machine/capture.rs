//! Scoped acquisition of global pointer listeners

use std::fmt;
use std::sync::Arc;

/// Host hook that installs and removes page-wide move/release listeners
/// and the no-text-selection style used while a gesture runs.
pub trait PointerCapture: Send + Sync {
    fn acquire(&self);
    fn release(&self);
}

/// Capture host for environments without global listeners.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Holds the capture for the lifetime of a gesture; dropping it releases.
pub struct CaptureGuard {
    host: Arc<dyn PointerCapture>,
}

impl CaptureGuard {
    pub fn acquire(host: Arc<dyn PointerCapture>) -> Self {
        host.acquire();
        Self { host }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.host.release();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}
