//! Debounced persistence of state snapshots.
//!
//! Rapid successive state changes coalesce into a single write that fires
//! once the stream has been quiet for the configured delay. Scheduling a
//! new snapshot while one is pending replaces it and restarts the quiet
//! period, so the write that eventually lands always reflects the most
//! recent snapshot.
//!
//! The writer is poll-based rather than timer-thread-based: the hosting
//! loop calls [`Debouncer::poll`] on its own tick, which keeps the whole
//! persistence path synchronous and deterministic under test.

use crate::store::Storage;
use std::time::{Duration, Instant};

/// A batch of key-value writes captured from one state snapshot.
pub type WriteBatch = Vec<(&'static str, String)>;

pub struct Debouncer {
    delay: Duration,
    pending: Option<(Instant, WriteBatch)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Replace any pending batch with `batch` and restart the quiet period.
    pub fn schedule(&mut self, now: Instant, batch: WriteBatch) {
        self.pending = Some((now + self.delay, batch));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Write the pending batch if its quiet period has elapsed. Returns
    /// whether a write happened.
    pub fn poll(&mut self, now: Instant, storage: &impl Storage) -> bool {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.flush(storage),
            _ => false,
        }
    }

    /// Write the pending batch immediately, e.g. on shutdown.
    pub fn flush(&mut self, storage: &impl Storage) -> bool {
        let Some((_, batch)) = self.pending.take() else {
            return false;
        };
        for (key, value) in batch {
            if let Err(err) = storage.set(key, &value) {
                // Degraded but functional: drop the write, keep the session.
                tracing::warn!(key, %err, "persistence write failed");
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn writes_fire_only_after_the_quiet_period() {
        let storage = MemoryStorage::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        debouncer.schedule(start, vec![("k", "1".to_string())]);
        assert!(!debouncer.poll(start + Duration::from_millis(50), &storage));
        assert!(storage.get("k").is_none());

        assert!(debouncer.poll(start + Duration::from_millis(100), &storage));
        assert_eq!(storage.get("k").as_deref(), Some("1"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rescheduling_replaces_the_batch_and_restarts_the_clock() {
        let storage = MemoryStorage::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        debouncer.schedule(start, vec![("k", "1".to_string())]);
        // A new change arrives before the timer fires.
        debouncer.schedule(start + Duration::from_millis(90), vec![("k", "2".to_string())]);

        // The original deadline passes without a write.
        assert!(!debouncer.poll(start + Duration::from_millis(120), &storage));

        assert!(debouncer.poll(start + Duration::from_millis(190), &storage));
        assert_eq!(storage.get("k").as_deref(), Some("2"));
    }

    #[test]
    fn flush_writes_immediately_and_only_once() {
        let storage = MemoryStorage::new();
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.schedule(Instant::now(), vec![("k", "1".to_string())]);
        assert!(debouncer.flush(&storage));
        assert!(!debouncer.flush(&storage));
        assert_eq!(storage.get("k").as_deref(), Some("1"));
    }
}
