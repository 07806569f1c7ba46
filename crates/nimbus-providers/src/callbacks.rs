//! Correlation registry pairing outbound searches with inbound callbacks.
//!
//! Each in-flight search registers a fresh correlation id and a single-slot
//! channel; the inbound delivery surface completes the slot when the addon
//! posts its result. Either delivery or the caller's timeout consumes the
//! entry, and whichever loses the race degrades to a no-op.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

struct PendingCallback {
    sender: oneshot::Sender<Vec<u8>>,
    registered_at: DateTime<Utc>,
}

/// Thread-safe table of pending correlation ids.
///
/// The map is the only shared mutable state across concurrent searches.
/// Critical sections are lookup/insert/remove only; no lock is held across
/// an await point, and the per-entry slot needs no locking of its own.
#[derive(Default)]
pub struct CallbackRegistry {
    slots: RwLock<HashMap<Uuid, PendingCallback>>,
}

impl CallbackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending callback, returning the correlation id and the
    /// receiving end of its single-slot channel.
    ///
    /// The id is unique among currently-registered ids: a fresh v4 id is
    /// drawn, retrying in the vanishing case it collides with a live entry.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock has been poisoned.
    #[must_use]
    pub fn register(&self) -> (Uuid, oneshot::Receiver<Vec<u8>>) {
        let (sender, receiver) = oneshot::channel();
        let mut slots = self.slots.write().expect("callback registry lock poisoned");
        let mut id = Uuid::new_v4();
        while slots.contains_key(&id) {
            id = Uuid::new_v4();
        }
        slots.insert(
            id,
            PendingCallback {
                sender,
                registered_at: Utc::now(),
            },
        );
        (id, receiver)
    }

    /// Deliver an addon payload to the waiter registered under `id`.
    ///
    /// Unknown or already-consumed ids are ignored: the caller's timeout may
    /// have removed the entry first, and a late answer is dropped by design.
    /// The entry is taken out of the map before the slot is completed, so a
    /// concurrent second delivery for the same id also degrades to a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock has been poisoned.
    pub fn deliver(&self, id: Uuid, payload: Vec<u8>) {
        {
            let slots = self.slots.read().expect("callback registry lock poisoned");
            if !slots.contains_key(&id) {
                debug!(%id, "dropping callback for unknown or stale correlation id");
                return;
            }
        }
        let entry = self
            .slots
            .write()
            .expect("callback registry lock poisoned")
            .remove(&id);
        let Some(entry) = entry else {
            // lost the race between the read check and the write lock
            return;
        };
        let waited_ms = (Utc::now() - entry.registered_at).num_milliseconds();
        if entry.sender.send(payload).is_err() {
            debug!(%id, waited_ms, "callback waiter already gone");
        } else {
            debug!(%id, waited_ms, "callback delivered");
        }
    }

    /// Remove a pending callback without delivering anything.
    ///
    /// Used by the timeout path; removing an id that was already consumed is
    /// a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock has been poisoned.
    pub fn remove(&self, id: Uuid) {
        self.slots
            .write()
            .expect("callback registry lock poisoned")
            .remove(&id);
    }

    /// Number of searches currently awaiting a callback.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock has been poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .expect("callback registry lock poisoned")
            .len()
    }

    /// Whether no searches are awaiting a callback.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock has been poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
