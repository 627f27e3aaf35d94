use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;

/// Attempt counter for one client address.
#[derive(Debug, Clone, Copy)]
pub struct RateWindow {
    count: u64,
    window_start: Instant,
}

impl RateWindow {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u64,
    /// Seconds until the window resets, set on denial.
    pub retry_after: Option<u64>,
}

/// Fixed-window limiter keyed by client address.
///
/// The count is updated while the map entry is locked, so two requests from
/// the same address can never both observe a stale count.
#[derive(Debug, Clone)]
pub struct FixedWindowLimiter {
    map: Arc<DashMap<String, RateWindow>>,
    limit: u64,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(limit: u64, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            limit,
            window,
        }
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| RateWindow::new(now));
        let state = entry.value_mut();

        if state.is_expired(now, self.window) {
            *state = RateWindow::new(now);
        }

        state.count = state.count.saturating_add(1);

        if state.count <= self.limit {
            RateDecision {
                allowed: true,
                remaining: self.limit - state.count,
                retry_after: None,
            }
        } else {
            let reset_in = self
                .window
                .saturating_sub(now.saturating_duration_since(state.window_start));
            RateDecision {
                allowed: false,
                remaining: 0,
                retry_after: Some(reset_in.as_secs().max(1)),
            }
        }
    }

    /// Attempts recorded for `key` in its current window.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.map.get(key).map(|w| w.count)
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }

    /// Drops entries whose window has fully elapsed. Returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.map.len();
        self.map.retain(|_, w| !w.is_expired(now, self.window));
        before.saturating_sub(self.map.len())
    }
}
