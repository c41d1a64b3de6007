//! Change notification for edit histories layered over sequences.
//!
//! An undo/redo mechanism owns a `ListenerRegistry` and calls `notify()` each
//! time a tracked change is applied or reverted. Listeners get no payload; they
//! re-read whatever state they display.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

/// Receives a signal when a tracked change is applied or reverted.
pub trait RecordListener: Send + Sync {
    /// Fired after any change is undone or redone.
    fn record_changed(&self);
}

impl<F> RecordListener for F
where
    F: Fn() + Send + Sync,
{
    fn record_changed(&self) {
        self()
    }
}

/// Thread-safe set of registered listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn RecordListener>>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. The same listener may be registered twice and is
    /// then notified twice.
    pub fn add_listener(&self, listener: Arc<dyn RecordListener>) {
        self.lock().push(listener);
    }

    /// Unregisters one registration of `listener`, matched by pointer identity.
    pub fn remove_listener(&self, listener: &Arc<dyn RecordListener>) -> bool {
        let mut listeners = self.lock();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Calls every registered listener in registration order.
    ///
    /// The list is copied before dispatch, so listeners may register or
    /// unregister from inside `record_changed`.
    pub fn notify(&self) {
        let listeners: Vec<_> = self.lock().clone();
        trace!(listeners = listeners.len(), "record changed");
        for listener in listeners {
            listener.record_changed();
        }
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn RecordListener>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Arc<dyn RecordListener>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let listener: Arc<dyn RecordListener> = Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hits, listener)
    }

    #[test]
    fn test_notify_reaches_all_listeners() {
        let registry = ListenerRegistry::new();
        let (first_hits, first) = counter();
        let (second_hits, second) = counter();
        registry.add_listener(first);
        registry.add_listener(second);

        registry.notify();
        registry.notify();

        assert_eq!(first_hits.load(Ordering::SeqCst), 2);
        assert_eq!(second_hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_removed_listener_is_silent() {
        let registry = ListenerRegistry::new();
        let (hits, listener) = counter();
        registry.add_listener(Arc::clone(&listener));

        assert!(registry.remove_listener(&listener));
        assert!(!registry.remove_listener(&listener));
        assert!(registry.is_empty());

        registry.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_can_unregister_itself() {
        let registry = Arc::new(ListenerRegistry::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let slot: Arc<Mutex<Option<Arc<dyn RecordListener>>>> = Arc::new(Mutex::new(None));
        let listener: Arc<dyn RecordListener> = {
            let registry = Arc::clone(&registry);
            let hits = Arc::clone(&hits);
            let slot = Arc::clone(&slot);
            Arc::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                if let Some(me) = slot.lock().unwrap().take() {
                    registry.remove_listener(&me);
                }
            })
        };
        *slot.lock().unwrap() = Some(Arc::clone(&listener));
        registry.add_listener(listener);

        registry.notify();
        registry.notify();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 0);
    }

    struct Flag(AtomicUsize);

    impl RecordListener for Flag {
        fn record_changed(&self) {
            self.0.store(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_struct_listener() {
        let registry = ListenerRegistry::new();
        let flag = Arc::new(Flag(AtomicUsize::new(0)));
        registry.add_listener(flag.clone());

        registry.notify();
        assert_eq!(flag.0.load(Ordering::SeqCst), 1);
    }
}
