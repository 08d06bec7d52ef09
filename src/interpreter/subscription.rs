//! Listener registry and unsubscribe handles.

use crate::core::{CallError, FsmError, StateObject};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Unique listener id. Ids are never reused within a service.
pub type ListenerId = u64;

/// Callback invoked with each newly committed state.
pub type Listener = Arc<dyn Fn(&StateObject) -> Result<(), CallError> + Send + Sync>;

#[derive(Default)]
struct ListenerTable {
    next_id: ListenerId,
    listeners: BTreeMap<ListenerId, Listener>,
}

/// Listeners of one service, notified in subscription order.
#[derive(Clone, Default)]
pub(crate) struct ListenerRegistry {
    table: Arc<Mutex<ListenerTable>>,
}

impl ListenerRegistry {
    fn lock(&self) -> MutexGuard<'_, ListenerTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add(&self, listener: Listener) -> Subscription {
        let mut table = self.lock();
        let id = table.next_id;
        table.next_id += 1;
        table.listeners.insert(id, listener);

        Subscription {
            table: Arc::downgrade(&self.table),
            id,
        }
    }

    pub(crate) fn clear(&self) {
        self.lock().listeners.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Call every listener with `state`. The table is not locked while
    /// listeners run, so a listener may unsubscribe itself or others; those
    /// changes apply from the next notification.
    ///
    /// The first failing listener aborts the notification.
    pub(crate) fn notify(&self, state: &StateObject) -> Result<(), FsmError> {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .lock()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            listener(state).map_err(|source| FsmError::Listener { id, source })?;
        }
        Ok(())
    }
}

/// Handle returned by `subscribe`. Dropping it does not unsubscribe.
///
/// The handle holds only its own id and a weak reference to the owning
/// service's listener table.
#[derive(Clone, Debug)]
pub struct Subscription {
    table: Weak<Mutex<ListenerTable>>,
    id: ListenerId,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove this listener. Returns false if it was already removed, the
    /// service was stopped, or the service no longer exists.
    pub fn unsubscribe(&self) -> bool {
        match self.table.upgrade() {
            Some(table) => table
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&self.id)
                .is_some(),
            None => false,
        }
    }
}

impl std::fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}
