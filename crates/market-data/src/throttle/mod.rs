//! Minimum-interval pacing gate for provider-friendly batch processing.
//!
//! The batch enrichment loop processes holdings strictly one at a time; the
//! [`Pacer`] guarantees a configurable minimum interval between consecutive
//! rounds so the external providers never see more than one holding's worth
//! of requests per interval.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Minimum-interval gate between consecutive provider call rounds.
///
/// `pause()` ensures at least the configured interval has elapsed since the
/// previous call returned; the first call passes immediately. A zero
/// interval turns the gate into a no-op, which is how tests disable
/// throttling without touching the enrichment logic.
pub struct Pacer {
    interval: Duration,
    last_pass: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Create a pacer with the given minimum interval between passes.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: Mutex::new(None),
        }
    }

    /// A pacer that never waits. Used by tests and ad-hoc lookups.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured minimum interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lock the last-pass slot, recovering from poison if necessary.
    ///
    /// Worst case after recovery is one slightly-early pass, which is
    /// preferable to panicking inside the batch loop.
    fn lock_last_pass(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_pass.lock().unwrap_or_else(|poisoned| {
            warn!("Pacer mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Wait until the minimum interval since the previous pass has elapsed.
    ///
    /// Waiting happens outside the lock; the slot is stamped after the
    /// sleep completes so the next caller measures from this pass.
    pub async fn pause(&self) {
        if self.interval.is_zero() {
            return;
        }

        let wait = {
            let guard = self.lock_last_pass();
            match *guard {
                Some(last) => self.interval.saturating_sub(last.elapsed()),
                None => Duration::ZERO,
            }
        };

        if !wait.is_zero() {
            debug!("Pacer: waiting {:?} before next round", wait);
            tokio::time::sleep(wait).await;
        }

        let mut guard = self.lock_last_pass();
        *guard = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_pass_is_immediate() {
        let pacer = Pacer::new(Duration::from_millis(50));

        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_second_pass_waits_out_the_interval() {
        let pacer = Pacer::new(Duration::from_millis(40));

        let start = Instant::now();
        pacer.pause().await;
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_elapsed_time_counts_toward_the_interval() {
        let pacer = Pacer::new(Duration::from_millis(30));

        pacer.pause().await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        // The interval already elapsed while we were doing other work.
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_disabled_pacer_never_waits() {
        let pacer = Pacer::disabled();

        let start = Instant::now();
        for _ in 0..5 {
            pacer.pause().await;
        }
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
