use std::{
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::{Duration, Instant},
};

use portfolio_contact::limiter::rate_limiter::FixedWindowLimiter;

const WINDOW: Duration = Duration::from_secs(15 * 60);

#[test]
fn sixth_request_in_window_is_denied() {
    let limiter = FixedWindowLimiter::new(5, WINDOW);
    let start = Instant::now();

    for i in 0..5 {
        let decision = limiter.check_at("10.0.0.1", start + Duration::from_secs(i));
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4 - i);
    }

    let denied = limiter.check_at("10.0.0.1", start + Duration::from_secs(60));
    assert!(!denied.allowed);
    assert_eq!(denied.remaining, 0);
    assert_eq!(denied.retry_after, Some(WINDOW.as_secs() - 60));
}

#[test]
fn request_after_window_resets_count() {
    let limiter = FixedWindowLimiter::new(5, WINDOW);
    let start = Instant::now();

    for _ in 0..6 {
        limiter.check_at("10.0.0.1", start);
    }
    assert!(!limiter.check_at("10.0.0.1", start + WINDOW).allowed);

    let after = limiter.check_at("10.0.0.1", start + WINDOW + Duration::from_secs(1));

    assert!(after.allowed);
    assert_eq!(limiter.count("10.0.0.1"), Some(1));
}

#[test]
fn addresses_are_counted_separately() {
    let limiter = FixedWindowLimiter::new(1, WINDOW);
    let now = Instant::now();

    assert!(limiter.check_at("10.0.0.1", now).allowed);
    assert!(!limiter.check_at("10.0.0.1", now).allowed);
    assert!(limiter.check_at("10.0.0.2", now).allowed);
}

#[test]
fn concurrent_requests_from_one_address_never_exceed_limit() {
    let limiter = FixedWindowLimiter::new(5, WINDOW);
    let allowed = AtomicU64::new(0);

    thread::scope(|s| {
        for _ in 0..32 {
            s.spawn(|| {
                if limiter.check("192.0.2.10").allowed {
                    allowed.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(allowed.load(Ordering::SeqCst), 5);
    assert_eq!(limiter.count("192.0.2.10"), Some(32));
}

#[test]
fn purge_removes_only_elapsed_windows() {
    let limiter = FixedWindowLimiter::new(5, WINDOW);
    let start = Instant::now();

    limiter.check_at("old", start);
    limiter.check_at("fresh", start + WINDOW);

    let removed = limiter.purge_expired(start + WINDOW + Duration::from_secs(1));

    assert_eq!(removed, 1);
    assert_eq!(limiter.count("old"), None);
    assert_eq!(limiter.count("fresh"), Some(1));
    assert_eq!(limiter.tracked_keys(), 1);
}

#[test]
fn clones_share_counters() {
    let limiter = FixedWindowLimiter::new(2, WINDOW);
    let clone = limiter.clone();
    let now = Instant::now();

    limiter.check_at("10.0.0.1", now);
    clone.check_at("10.0.0.1", now);

    assert!(!limiter.check_at("10.0.0.1", now).allowed);
}
