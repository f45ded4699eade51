use std::time::{Duration, Instant};

/// Deadline tracker for a single wait loop.
///
/// Elapsed time is always measured from the last [TimeoutGuard::reset]
/// (or the last reported expiry), never from the previous poll.
#[derive(Debug, Clone)]
pub struct TimeoutGuard {
    timeout: Duration,
    started: Instant,
}

impl TimeoutGuard {
    pub fn create(timeout: Duration) -> Self {
        Self {
            timeout,
            started: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.started = Instant::now();
    }

    /// Returns true once the timeout has elapsed since the reference point.
    ///
    /// Reporting expiry re-arms the guard, so a later call measures from now.
    pub fn expired(&mut self) -> bool {
        if self.started.elapsed() >= self.timeout {
            self.started = Instant::now();

            return true;
        }

        false
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn not_expired_right_after_reset() {
        let mut guard = TimeoutGuard::create(Duration::from_millis(200));

        guard.reset();
        assert!(!guard.expired());
    }

    #[test]
    fn polls_do_not_rebase_the_deadline() {
        let mut guard = TimeoutGuard::create(Duration::from_millis(60));

        guard.reset();
        for _ in 0..4 {
            assert!(!guard.expired());
            sleep(Duration::from_millis(10));
        }
        sleep(Duration::from_millis(40));

        assert!(guard.expired());
    }

    #[test]
    fn expiry_rearms_the_guard() {
        let mut guard = TimeoutGuard::create(Duration::from_millis(30));

        guard.reset();
        sleep(Duration::from_millis(40));
        assert!(guard.expired());
        assert!(!guard.expired());
    }

    #[test]
    fn zero_timeout_expires_immediately() {
        let mut guard = TimeoutGuard::create(Duration::ZERO);

        guard.reset();
        assert!(guard.expired());
    }
}
