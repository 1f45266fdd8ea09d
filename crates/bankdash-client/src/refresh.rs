use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Polling cadence for live views: refresh every `interval` while the user was
/// active within `idle_timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub interval: Duration,
    pub idle_timeout: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl RefreshPolicy {
    pub fn should_refresh(&self, since_last_activity: Duration) -> bool {
        let refresh = since_last_activity < self.idle_timeout;
        tracing::trace!(
            idle_secs = since_last_activity.as_secs(),
            refresh,
            "refresh decision"
        );
        refresh
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RefreshPolicy;

    #[test]
    fn refreshes_until_idle_timeout() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(30));
        assert!(policy.should_refresh(Duration::ZERO));
        assert!(policy.should_refresh(Duration::from_secs(299)));
        assert!(!policy.should_refresh(Duration::from_secs(300)));
        assert!(!policy.should_refresh(Duration::from_secs(3_600)));
    }
}
