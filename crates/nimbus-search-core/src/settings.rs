//! In-memory settings handle shared between searches and the settings surface.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::service::SearchSettings;

/// Operator override for the per-search timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutOverride {
    pub enabled: bool,
    pub timeout: Duration,
}

impl Default for TimeoutOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Shared, mutable settings store.
///
/// Clones share state, so the settings surface can update the same handle
/// the searchers read from; each search observes the value current at call
/// time.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    inner: Arc<RwLock<TimeoutOverride>>,
}

impl InMemorySettings {
    #[must_use]
    pub fn new(initial: TimeoutOverride) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the current override.
    ///
    /// # Panics
    ///
    /// Panics if the settings lock has been poisoned.
    pub fn set(&self, value: TimeoutOverride) {
        *self.inner.write().expect("settings lock poisoned") = value;
    }

    fn get(&self) -> TimeoutOverride {
        *self.inner.read().expect("settings lock poisoned")
    }
}

impl SearchSettings for InMemorySettings {
    fn custom_timeout_enabled(&self) -> bool {
        self.get().enabled
    }

    fn custom_timeout(&self) -> Duration {
        self.get().timeout
    }
}
