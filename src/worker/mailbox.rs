//! Single-slot mailbox with overwrite semantics.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct Slot<T> {
    value: Option<T>,
    closed: bool,
}

/// Holds at most one pending value. A new `put` replaces any value that has
/// not been taken yet, so a slow consumer only ever sees the latest one.
pub struct Mailbox<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    // Slot holds plain data, so a panicked holder cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value`, returning the unconsumed value it replaced.
    ///
    /// Values put after [`close`](Mailbox::close) are still stored and can
    /// be drained with [`try_take`](Mailbox::try_take).
    pub fn put(&self, value: T) -> Option<T> {
        let replaced = self.lock().value.replace(value);
        self.ready.notify_one();
        replaced
    }

    /// Takes the pending value without blocking.
    pub fn try_take(&self) -> Option<T> {
        self.lock().value.take()
    }

    /// Blocks until a value is available and takes it.
    ///
    /// Returns `None` once the mailbox is closed and empty.
    pub fn take(&self) -> Option<T> {
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.take() {
                return Some(value);
            }
            if slot.closed {
                return None;
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Wakes blocked consumers; [`take`](Mailbox::take) returns `None` once
    /// the pending value, if any, has been consumed.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn has_pending(&self) -> bool {
        self.lock().value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_put_overwrites_pending() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.put(1), None);
        assert_eq!(mailbox.put(2), Some(1));
        assert_eq!(mailbox.put(3), Some(2));
        assert_eq!(mailbox.try_take(), Some(3));
        assert_eq!(mailbox.try_take(), None);
    }

    #[test]
    fn test_take_returns_latest() {
        let mailbox = Mailbox::new();
        mailbox.put("p1");
        mailbox.put("p2");
        mailbox.put("p3");
        assert_eq!(mailbox.take(), Some("p3"));
        assert!(!mailbox.has_pending());
    }

    #[test]
    fn test_take_drains_before_reporting_closed() {
        let mailbox = Mailbox::new();
        mailbox.put(7);
        mailbox.close();
        assert!(mailbox.is_closed());
        assert_eq!(mailbox.take(), Some(7));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_take_blocks_until_put() {
        let mailbox = Arc::new(Mailbox::new());
        let consumer = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || mailbox.take())
        };
        thread::sleep(Duration::from_millis(20));
        mailbox.put(42);
        assert_eq!(consumer.join().unwrap(), Some(42));
    }

    #[test]
    fn test_close_wakes_blocked_consumer() {
        let mailbox: Arc<Mailbox<u32>> = Arc::new(Mailbox::new());
        let consumer = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || mailbox.take())
        };
        thread::sleep(Duration::from_millis(20));
        mailbox.close();
        assert_eq!(consumer.join().unwrap(), None);
    }
}
