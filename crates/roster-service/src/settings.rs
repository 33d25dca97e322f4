//! Cache behaviour of the user service.

use roster_config::CacheConfig;
use std::time::Duration;

/// Lifetime of a cached user entry.
pub const DEFAULT_USER_TTL: Duration = Duration::from_secs(600);

/// What the user service does when the cache backend fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheFailurePolicy {
    /// Cache errors fail the operation.
    #[default]
    Propagate,
    /// Cache errors are logged; reads fall through to the store and
    /// cache writes or invalidations are skipped.
    FailOpen,
}

impl CacheFailurePolicy {
    /// Maps the `cache.fail_open` flag to a policy.
    #[must_use]
    pub const fn from_fail_open(fail_open: bool) -> Self {
        if fail_open {
            Self::FailOpen
        } else {
            Self::Propagate
        }
    }
}

/// Cache settings injected into the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// TTL applied to every cache write.
    pub ttl: Duration,
    /// Handling of cache backend failures.
    pub failure_policy: CacheFailurePolicy,
}

impl CacheSettings {
    /// Switches to [`CacheFailurePolicy::FailOpen`].
    #[must_use]
    pub const fn fail_open(mut self) -> Self {
        self.failure_policy = CacheFailurePolicy::FailOpen;
        self
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_USER_TTL,
            failure_policy: CacheFailurePolicy::Propagate,
        }
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            failure_policy: CacheFailurePolicy::from_fail_open(config.fail_open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        assert_eq!(CacheSettings::from(&CacheConfig::default()), CacheSettings::default());
        assert_eq!(CacheSettings::default().ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_fail_open_flag() {
        let config = CacheConfig {
            ttl_secs: 30,
            fail_open: true,
        };
        let settings = CacheSettings::from(&config);
        assert_eq!(settings.ttl, Duration::from_secs(30));
        assert_eq!(settings.failure_policy, CacheFailurePolicy::FailOpen);
    }
}
