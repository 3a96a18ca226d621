//! Per-domain rate limiting
//!
//! Enforces a minimum delay between requests to the same domain, shared by
//! all fetch workers. The lock is held only to read or stamp a domain's
//! last-request time; the actual waiting happens outside it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tracks the last request time per domain and makes workers wait their turn
#[derive(Debug)]
pub struct DomainLimiter {
    min_delay: Duration,
    last_request: Mutex<HashMap<String, Instant>>,
}

impl DomainLimiter {
    /// Creates a limiter with the given minimum inter-request delay
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to `domain` is allowed, then claims the slot
    ///
    /// Claiming is atomic with the readiness check, so two workers hitting
    /// the same domain cannot both pass at once.
    pub async fn wait_turn(&self, domain: &str) {
        loop {
            let wait = {
                let mut last_request = self.last_request.lock().unwrap();
                let now = Instant::now();

                match last_request.get(domain) {
                    Some(last) if now.duration_since(*last) < self.min_delay => {
                        self.min_delay - now.duration_since(*last)
                    }
                    _ => {
                        last_request.insert(domain.to_string(), now);
                        return;
                    }
                }
            };

            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_passes_immediately() {
        let limiter = DomainLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.wait_turn("example.com").await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_second_request_waits_for_delay() {
        let limiter = DomainLimiter::new(Duration::from_millis(50));
        limiter.wait_turn("example.com").await;

        let start = Instant::now();
        limiter.wait_turn("example.com").await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_distinct_domains_do_not_wait_on_each_other() {
        let limiter = DomainLimiter::new(Duration::from_secs(5));
        limiter.wait_turn("one.example").await;

        let start = Instant::now();
        limiter.wait_turn("two.example").await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let limiter = DomainLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.wait_turn("example.com").await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
