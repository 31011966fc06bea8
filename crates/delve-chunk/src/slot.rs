use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Single-producer handoff between a mesh builder and the renderer.
///
/// The builder publishes into `pending`; the renderer polls `has_new` and
/// moves the value into `current` with `take_new`.
#[derive(Debug)]
pub struct PublishSlot<T> {
    pending: Mutex<Option<Arc<T>>>,
    current: Mutex<Option<Arc<T>>>,
    received: AtomicBool,
}

impl<T> Default for PublishSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PublishSlot<T> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            current: Mutex::new(None),
            received: AtomicBool::new(false),
        }
    }

    /// Replaces any unconsumed pending value.
    pub fn publish(&self, value: Arc<T>) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        self.received.store(true, Ordering::Release);
    }

    #[inline]
    pub fn has_new(&self) -> bool {
        self.received.load(Ordering::Acquire)
    }

    pub fn take_new(&self) -> Option<Arc<T>> {
        if !self.received.swap(false, Ordering::AcqRel) {
            return None;
        }
        let next = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&next));
        Some(next)
    }

    pub fn current(&self) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops both values, as when the chunk unloads.
    pub fn clear(&self) {
        self.received.store(false, Ordering::Release);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}
