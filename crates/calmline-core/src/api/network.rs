//! Connectivity tracking derived from request outcomes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Shared online/offline flag.
/// Starts online; the request primitive flips it whenever a call either
/// fails to connect or gets any HTTP response back.
#[derive(Debug, Clone)]
pub struct NetworkStatus {
    online: Arc<AtomicBool>,
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStatus {
    pub fn new() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn mark_online(&self) {
        if !self.online.swap(true, Ordering::Relaxed) {
            info!("Backend reachable again");
        }
    }

    pub fn mark_offline(&self) {
        if self.online.swap(false, Ordering::Relaxed) {
            info!("Backend unreachable, switching to offline mode");
        }
    }
}

/// Check whether the last transport-level outcome left us offline.
pub fn is_offline(status: &NetworkStatus) -> bool {
    !status.is_online()
}
