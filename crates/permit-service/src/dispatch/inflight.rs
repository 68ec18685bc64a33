//! In-flight markers keyed by permit id.
//!
//! A marker is set when the first dispatch for a permit starts and cleared
//! when the last overlapping dispatch settles. Clearing happens in the
//! guard's `Drop`, so it runs on success, error, and cancellation alike.
//! Nothing here blocks a second dispatch; callers consult [`InFlightSet::contains`].

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::debug;

use permit_core::types::PermitId;

const CHANGE_CAPACITY: usize = 64;

/// A marker transition, for observers such as a button that disables itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlightChange {
    /// A dispatch started for a permit with no outstanding dispatch.
    Marked(PermitId),
    /// The last outstanding dispatch for a permit settled.
    Cleared(PermitId),
}

/// Set of permit ids with an outstanding dispatch.
#[derive(Debug)]
pub struct InFlightSet {
    /// Outstanding dispatch count per permit.
    counts: Mutex<HashMap<PermitId, usize>>,
    changes: broadcast::Sender<InFlightChange>,
}

impl Default for InFlightSet {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            counts: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Whether a dispatch for `id` is outstanding.
    pub fn contains(&self, id: PermitId) -> bool {
        self.counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&id)
    }

    /// Permit ids currently marked.
    pub fn snapshot(&self) -> Vec<PermitId> {
        self.counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    /// Observe marker transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<InFlightChange> {
        self.changes.subscribe()
    }

    /// Mark `id` until the returned guard drops.
    pub fn enter(&self, id: PermitId) -> InFlightGuard<'_> {
        let first = {
            let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
            let count = counts.entry(id).or_insert(0);
            *count += 1;
            *count == 1
        };
        if first {
            debug!(permit_id = %id, "Dispatch in flight");
            let _ = self.changes.send(InFlightChange::Marked(id));
        }
        InFlightGuard { set: self, id }
    }

    fn leave(&self, id: PermitId) {
        let last = {
            let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
            match counts.get_mut(&id) {
                Some(count) if *count > 1 => {
                    *count -= 1;
                    false
                }
                Some(_) => {
                    counts.remove(&id);
                    true
                }
                None => false,
            }
        };
        if last {
            debug!(permit_id = %id, "Dispatch settled");
            let _ = self.changes.send(InFlightChange::Cleared(id));
        }
    }
}

/// Holds an in-flight marker; releases it on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    set: &'a InFlightSet,
    id: PermitId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.leave(self.id);
    }
}
