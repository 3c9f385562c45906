//! # Live actor table.
//!
//! Tracks every actor the [`System`](crate::System) has spawned and whose exit
//! has not yet been observed. Used for introspection ([`System::live`](crate::System::live))
//! and to name stuck actors when shutdown overruns its grace period.
//!
//! ## Rules
//! - Insert happens in `spawn`, before the actor task starts.
//! - Removal happens in the exit supervisor, before watchers are notified.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::handle::ActorId;

/// Table of live actors keyed by id.
#[derive(Default)]
pub(crate) struct Registry {
    actors: RwLock<HashMap<ActorId, Arc<str>>>,
}

impl Registry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn insert(&self, id: ActorId, name: Arc<str>) {
        self.actors.write().insert(id, name);
    }

    pub(crate) fn remove(&self, id: ActorId) -> Option<Arc<str>> {
        self.actors.write().remove(&id)
    }

    /// Returns sorted list of live actor names.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .actors
            .read()
            .values()
            .map(|name| name.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn len(&self) -> usize {
        self.actors.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_sorted_and_tracks_removal() {
        let reg = Registry::new();
        let b = ActorId::next();
        let a = ActorId::next();
        reg.insert(b, "device:g/b".into());
        reg.insert(a, "device:g/a".into());
        assert_eq!(reg.snapshot(), vec!["device:g/a", "device:g/b"]);

        assert_eq!(reg.remove(b).as_deref(), Some("device:g/b"));
        assert!(reg.remove(b).is_none());
        assert_eq!(reg.len(), 1);
    }
}
