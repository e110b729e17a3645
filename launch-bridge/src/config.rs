use std::time::Duration;

/// How long a launch may stay pending before the caller stops waiting
pub const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Run loop slice between completion checks
pub const PUMP_SLICE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Overall deadline for the completion handler to fire
    pub timeout: Duration,
    /// Upper bound for a single run loop pump
    pub pump_slice: Duration,
}

impl BridgeConfig {
    pub fn new(timeout: Duration, pump_slice: Duration) -> Self {
        BridgeConfig {
            timeout,
            pump_slice: pump_slice.min(timeout),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig::new(LAUNCH_TIMEOUT, PUMP_SLICE)
    }
}

#[cfg(test)]
mod tests {
    use super::BridgeConfig;
    use std::time::Duration;

    #[test]
    fn default_is_thirty_seconds() {
        let config = BridgeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.pump_slice < Duration::from_millis(100));
    }

    #[test]
    fn slice_never_exceeds_timeout() {
        let config = BridgeConfig::new(Duration::from_millis(10), Duration::from_secs(1));
        assert_eq!(config.pump_slice, Duration::from_millis(10));
    }
}
