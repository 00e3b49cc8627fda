// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for contact submissions.
//!
//! Tracks per-client submission timestamps and allows at most
//! `max_requests` within the sliding window. The current attempt is recorded
//! before the threshold comparison, so rejected attempts still count toward
//! future windows.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Decision for a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Attempt is allowed
    Allowed {
        /// Attempts left in the current window after this one
        remaining: u32,
    },
    /// Attempt is rate limited
    Limited {
        /// Time until the oldest in-window entry ages out
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Thread-safe sliding-window limiter keyed by client identifier.
///
/// State lives for the process lifetime; clients with no recent activity are
/// evicted by [`cleanup`](Self::cleanup), which should be called periodically.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    hits: RwLock<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter {
    /// Create a new limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            hits: RwLock::new(HashMap::new()),
        }
    }

    /// Record an attempt for `identifier` and decide whether it is allowed.
    ///
    /// Never fails; the only outcomes are allowed and limited.
    pub async fn check_and_record(&self, identifier: &str) -> RateLimitDecision {
        self.check_and_record_at(identifier, Instant::now()).await
    }

    /// Same as [`check_and_record`](Self::check_and_record) with an explicit
    /// clock, for deterministic tests.
    pub async fn check_and_record_at(&self, identifier: &str, now: Instant) -> RateLimitDecision {
        let window = self.config.window_duration();

        // The write lock covers the whole read-prune-append-store sequence,
        // so concurrent attempts for the same identifier serialize here.
        let mut hits = self.hits.write().await;
        let entry = hits.entry(identifier.to_string()).or_default();

        // Prune stale entries even when the attempt ends up rejected.
        entry.retain(|ts| now.duration_since(*ts) <= window);
        entry.push(now);

        let count = entry.len() as u32;
        if count > self.config.max_requests {
            let retry_after = entry
                .first()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            debug!(identifier, count, "submission rate limited");
            RateLimitDecision::Limited { retry_after }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.config.max_requests - count,
            }
        }
    }

    /// Evict identifiers with no activity within the idle expiry.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let idle = self.config.idle_expiry();

        let mut hits = self.hits.write().await;
        hits.retain(|_, entries| {
            entries
                .last()
                .is_some_and(|ts| now.duration_since(*ts) < idle)
        });
    }

    /// Number of identifiers currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.hits.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(RateLimitConfig {
            max_requests,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_sixth_allowed_seventh_limited() {
        let limiter = limiter(6);
        let base = Instant::now();

        for i in 0..6 {
            let decision = limiter
                .check_and_record_at("1.2.3.4", base + Duration::from_secs(i * 60))
                .await;
            assert!(decision.is_allowed(), "attempt {} should be allowed", i + 1);
        }

        let decision = limiter
            .check_and_record_at("1.2.3.4", base + Duration::from_secs(360))
            .await;
        assert!(matches!(decision, RateLimitDecision::Limited { .. }));
    }

    #[tokio::test]
    async fn test_remaining_counts_down() {
        let limiter = limiter(6);
        let base = Instant::now();

        let first = limiter.check_and_record_at("1.2.3.4", base).await;
        assert_eq!(first, RateLimitDecision::Allowed { remaining: 5 });

        for _ in 0..4 {
            limiter.check_and_record_at("1.2.3.4", base).await;
        }

        let sixth = limiter.check_and_record_at("1.2.3.4", base).await;
        assert_eq!(sixth, RateLimitDecision::Allowed { remaining: 0 });
    }

    #[tokio::test]
    async fn test_window_expiry_allows_again() {
        let limiter = limiter(6);
        let base = Instant::now();

        for _ in 0..6 {
            limiter.check_and_record_at("1.2.3.4", base).await;
        }
        assert!(!limiter
            .check_and_record_at("1.2.3.4", base + Duration::from_secs(60))
            .await
            .is_allowed());

        // Past the window every prior entry is stale and gets pruned.
        let later = base + Duration::from_secs(3700);
        let decision = limiter.check_and_record_at("1.2.3.4", later).await;
        assert_eq!(decision, RateLimitDecision::Allowed { remaining: 5 });
    }

    #[tokio::test]
    async fn test_identifiers_are_isolated() {
        let limiter = limiter(2);
        let base = Instant::now();

        for _ in 0..3 {
            limiter.check_and_record_at("saturated", base).await;
        }
        assert!(!limiter.check_and_record_at("saturated", base).await.is_allowed());

        let decision = limiter.check_and_record_at("fresh", base).await;
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn test_rejected_attempts_count_toward_window() {
        let limiter = limiter(2);
        let base = Instant::now();

        assert!(limiter.check_and_record_at("c", base).await.is_allowed());
        assert!(limiter
            .check_and_record_at("c", base + Duration::from_secs(600))
            .await
            .is_allowed());
        // Third attempt is rejected but still recorded.
        assert!(!limiter
            .check_and_record_at("c", base + Duration::from_secs(1200))
            .await
            .is_allowed());

        // The first entry has aged out, yet the rejected attempt keeps the
        // window saturated.
        let decision = limiter
            .check_and_record_at("c", base + Duration::from_secs(3700))
            .await;
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn test_limited_stays_limited_within_window() {
        let limiter = limiter(3);
        let base = Instant::now();

        for _ in 0..3 {
            limiter.check_and_record_at("c", base).await;
        }
        for i in 1..=5 {
            let decision = limiter
                .check_and_record_at("c", base + Duration::from_secs(i))
                .await;
            assert!(!decision.is_allowed(), "attempt at +{}s should stay limited", i);
        }
    }

    #[tokio::test]
    async fn test_retry_after_reflects_oldest_entry() {
        let limiter = limiter(1);
        let base = Instant::now();

        limiter.check_and_record_at("c", base).await;
        let decision = limiter
            .check_and_record_at("c", base + Duration::from_secs(100))
            .await;
        match decision {
            RateLimitDecision::Limited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(3500));
            }
            RateLimitDecision::Allowed { .. } => panic!("should be limited"),
        }
    }

    #[tokio::test]
    async fn test_cleanup_evicts_idle_clients() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig {
            max_requests: 6,
            idle_expiry_secs: 0,
            ..Default::default()
        });

        limiter.check_and_record("a").await;
        limiter.check_and_record("b").await;
        assert_eq!(limiter.tracked_clients().await, 2);

        limiter.cleanup().await;
        assert_eq!(limiter.tracked_clients().await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_active_clients() {
        let limiter = limiter(6);

        limiter.check_and_record("a").await;
        limiter.cleanup().await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
