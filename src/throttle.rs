//! Pointer-move coalescing.
//!
//! Hosts deliver pointer moves far more often than frames are drawn. The
//! throttle lets at most one move through per interval and keeps only the
//! latest of the rest, which the next frame tick flushes.

use std::time::Duration;
use web_time::Instant;

use crate::constants::DEFAULT_MOVE_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct MoveThrottle<T> {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> MoveThrottle<T> {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(DEFAULT_MOVE_INTERVAL_MS))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a move now. See [`MoveThrottle::submit_at`].
    pub fn submit(&mut self, value: T) -> Option<T> {
        self.submit_at(value, Instant::now())
    }

    /// Offer a move at `now`. Returns it when it may be processed
    /// immediately, otherwise keeps it as the pending move.
    pub fn submit_at(&mut self, value: T, now: Instant) -> Option<T> {
        let due = self
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);

        if due {
            self.last_emit = Some(now);
            self.pending = None;
            Some(value)
        } else {
            log::trace!("Throttle: coalescing pointer move");
            self.pending = Some(value);
            None
        }
    }

    /// Frame tick: release the latest coalesced move, if any.
    pub fn flush(&mut self) -> Option<T> {
        self.flush_at(Instant::now())
    }

    pub fn flush_at(&mut self, now: Instant) -> Option<T> {
        let value = self.pending.take()?;
        self.last_emit = Some(now);
        Some(value)
    }

    /// Drop the pending move without processing it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for MoveThrottle<T> {
    fn default() -> Self {
        Self::new()
    }
}
