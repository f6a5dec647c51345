//! Pool configuration

use std::time::Duration;

/// Default maximum number of pooled runtimes
pub const DEFAULT_MAX_SIZE: usize = 20;

/// Default idle timeout before a runtime is swept
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Floor on the idle timeout; shorter values thrash expensive runtimes
pub const MIN_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default interval between idle sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for a `RuntimePool`
///
/// Use the builder methods to adjust individual knobs:
///
/// ```ignore
/// let config = PoolConfig::default()
///     .with_max_size(50)
///     .with_idle_timeout(Duration::from_secs(15 * 60));
/// ```
///
/// The builders enforce floors (`max_size >= 1`, idle timeout at least
/// [`MIN_IDLE_TIMEOUT`]); the pool itself trusts whatever config it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of runtimes held at once
    pub max_size: usize,

    /// How long a runtime may sit unaccessed before the sweep reclaims it
    pub idle_timeout: Duration,

    /// How often the idle sweep runs (when started via `start_idle_cleanup`)
    pub sweep_interval: Duration,
}

impl PoolConfig {
    /// Create a config with the given capacity and default timings
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Set the maximum pool size (clamped to at least 1)
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Set the idle timeout (clamped to [`MIN_IDLE_TIMEOUT`])
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout.max(MIN_IDLE_TIMEOUT);
        self
    }

    /// Set the sweep interval (clamped to at least one second)
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval.max(Duration::from_secs(1));
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}
