//! Rate limiting for Gateway requests.
//!
//! Implements a fixed-window token bucket: at most `max_requests`
//! acquisitions start within any window between reset points
//! (window-aligned, not sliding).

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct WindowState {
    /// Remaining budget in the current window.
    tokens: u32,
    /// Start of the current window.
    window_start: Instant,
}

/// Fixed-window token bucket limiter shared by every Gateway caller.
///
/// Refill and decrement happen atomically under one lock, so the budget
/// holds for concurrent callers on a multi-threaded runtime too.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    /// Create a new rate limiter.
    ///
    /// # Arguments
    /// * `max_requests` - Maximum requests per window (floored at 1)
    /// * `window` - Window duration
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            max_requests,
            window,
            state: Mutex::new(WindowState {
                tokens: max_requests,
                window_start: Instant::now(),
            }),
        }
    }

    /// Resolve once it is safe to issue one Gateway request.
    ///
    /// Never errors. An exhausted window suspends the caller until the
    /// window resets, then retries; each successful return consumes
    /// exactly one token. The wait is an explicit sleep loop, so
    /// sustained throttling cannot grow the call stack.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock();
                let elapsed = state.window_start.elapsed();
                if elapsed >= self.window {
                    state.tokens = self.max_requests;
                    state.window_start = Instant::now();
                }
                if state.tokens > 0 {
                    state.tokens -= 1;
                    return;
                }
                self.window.saturating_sub(state.window_start.elapsed())
            };
            debug!(wait_ms = wait.as_millis() as u64, "Rate limit window exhausted, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    /// Remaining budget in the current window.
    pub fn remaining(&self) -> u32 {
        let mut state = self.state.lock();
        if state.window_start.elapsed() >= self.window {
            state.tokens = self.max_requests;
            state.window_start = Instant::now();
        }
        state.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_acquire_within_budget_is_immediate() {
        let limiter = RateLimiter::new(3, Duration::from_millis(1000));

        let before = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(limiter.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_window_suspends_until_reset() {
        let limiter = RateLimiter::new(2, Duration::from_millis(1000));

        limiter.acquire().await;
        limiter.acquire().await;

        // Third acquisition must wait out the remainder of the window.
        let before = Instant::now();
        limiter.acquire().await;
        assert!(before.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_reset_refills_budget() {
        let limiter = RateLimiter::new(2, Duration::from_millis(100));

        limiter.acquire().await;
        limiter.acquire().await;
        tokio::time::advance(Duration::from_millis(150)).await;

        assert_eq!(limiter.remaining(), 2);
        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_budget() {
        let limiter = Arc::new(RateLimiter::new(2, Duration::from_millis(1000)));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    let before = Instant::now();
                    limiter.acquire().await;
                    before.elapsed()
                })
            })
            .collect();

        let mut waits = Vec::new();
        for task in tasks {
            waits.push(task.await.unwrap());
        }
        waits.sort();

        // Two fit the first window, two wait for the reset.
        assert_eq!(waits[0], Duration::ZERO);
        assert_eq!(waits[1], Duration::ZERO);
        assert!(waits[2] >= Duration::from_millis(1000));
        assert!(waits[3] >= Duration::from_millis(1000));
    }
}
