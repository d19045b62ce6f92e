//! Trailing-edge debounce for outgoing writes.
//!
//! The caller supplies the clock: `schedule` and `poll` take an `Instant`, so
//! the same code runs under a real command loop and under tests that step time
//! by hand.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Queue `item`, replacing anything pending and restarting the delay.
    /// Returns the item that was replaced.
    pub fn schedule(&mut self, item: T, now: Instant) -> Option<T> {
        self.pending
            .replace((item, now + self.delay))
            .map(|(previous, _)| previous)
    }

    /// Release the pending item if its delay has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline()?;
        if due <= now {
            self.flush()
        } else {
            None
        }
    }

    /// Release the pending item regardless of the delay.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(item, _)| item)
    }

    /// Drop the pending item without releasing it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending item becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Debouncer;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn releases_only_after_delay() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        assert_eq!(debouncer.schedule("a", t0), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + DELAY), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + DELAY * 2), None);
    }

    #[test]
    fn rescheduling_coalesces_and_restarts_the_timer() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(1, t0);
        let t1 = t0 + Duration::from_millis(200);
        assert_eq!(debouncer.schedule(2, t1), Some(1));
        assert_eq!(debouncer.deadline(), Some(t1 + DELAY));

        assert_eq!(debouncer.poll(t0 + DELAY), None);
        assert_eq!(debouncer.poll(t1 + DELAY), Some(2));
    }

    #[test]
    fn flush_and_cancel() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule("x", t0);
        assert_eq!(debouncer.flush(), Some("x"));
        assert_eq!(debouncer.flush(), None);

        debouncer.schedule("y", t0);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.poll(t0 + DELAY), None);
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule(7, t0);
        assert_eq!(debouncer.poll(t0), Some(7));
    }
}
