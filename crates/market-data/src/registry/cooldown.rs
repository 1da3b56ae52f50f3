//! Minimum-spacing limiter for upstream requests.
//!
//! Unlike a token bucket there is no burst capacity: every request must be at
//! least `interval` after the previous one. The limiter remembers a single
//! "last request" instant shared by all callers.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Enforces a minimum interval between consecutive upstream requests.
///
/// The remaining wait is computed under a short lock and the lock is released
/// before sleeping, so two concurrent callers can occasionally both proceed
/// after the same wait. Spacing is best effort.
#[derive(Debug)]
pub struct Cooldown {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lock the last-request slot, recovering from poison if necessary.
    fn lock_last(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_request.lock().unwrap_or_else(|poisoned| {
            warn!("Cooldown mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// How long a caller arriving now would have to wait.
    pub fn remaining(&self) -> Duration {
        match *self.lock_last() {
            Some(last) => self.interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleep until the interval since the previous request has passed, then
    /// record the current instant as the latest request.
    pub async fn wait(&self) {
        let wait_time = self.remaining();

        if wait_time > Duration::ZERO {
            debug!("Cooldown: waiting {:?} before next request", wait_time);
            tokio::time::sleep(wait_time).await;
        }

        *self.lock_last() = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        let cooldown = Cooldown::new(Duration::from_secs(5));
        assert_eq!(cooldown.remaining(), Duration::ZERO);

        let start = Instant::now();
        cooldown.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_second_request_waits_for_interval() {
        let cooldown = Cooldown::new(Duration::from_millis(50));
        cooldown.wait().await;

        let start = Instant::now();
        cooldown.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_zero_interval_never_sleeps() {
        let cooldown = Cooldown::new(Duration::ZERO);
        cooldown.wait().await;
        assert_eq!(cooldown.remaining(), Duration::ZERO);

        let start = Instant::now();
        for _ in 0..5 {
            cooldown.wait().await;
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_remaining_counts_down() {
        let cooldown = Cooldown::new(Duration::from_secs(60));
        cooldown.wait().await;

        let remaining = cooldown.remaining();
        assert!(remaining > Duration::from_secs(55));
        assert!(remaining <= Duration::from_secs(60));
    }
}
