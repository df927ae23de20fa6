use tile_link_core::config::env_or;
use tile_link_core::{ConfigError, RoundConfig};
use tile_link_types::{FEEDBACK_PAUSE_MS, RESOLVE_DELAY_MS, TICK_MS};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub round: RoundConfig,
    /// Delay between the second pick and match resolution
    pub resolve_delay_ms: u64,
    /// How long a failed pair stays locked before the selection clears
    pub feedback_pause_ms: u64,
    /// Countdown period
    pub tick_ms: u64,
    /// Optional JSON-lines log of every outbound event
    pub log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            resolve_delay_ms: RESOLVE_DELAY_MS,
            feedback_pause_ms: FEEDBACK_PAUSE_MS,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// - `TILE_LINK_BOARD_SIZE`, `TILE_LINK_KINDS`, `TILE_LINK_RESERVE`,
    ///   `TILE_LINK_ROUND_SECS` (see [`RoundConfig::from_env`])
    /// - `TILE_LINK_RESOLVE_DELAY_MS`, `TILE_LINK_FEEDBACK_PAUSE_MS`, `TILE_LINK_TICK_MS`
    /// - `TILE_LINK_LOG_PATH`: append outbound events as JSON lines
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let log_path = env::var("TILE_LINK_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            round: RoundConfig::from_env(),
            resolve_delay_ms: env_or("TILE_LINK_RESOLVE_DELAY_MS", defaults.resolve_delay_ms),
            feedback_pause_ms: env_or("TILE_LINK_FEEDBACK_PAUSE_MS", defaults.feedback_pause_ms),
            // A zero period would spin the ticker.
            tick_ms: env_or("TILE_LINK_TICK_MS", defaults.tick_ms).max(1),
            log_path,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.round.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.resolve_delay_ms, 100);
        assert_eq!(config.feedback_pause_ms, 500);
        assert_eq!(config.tick_ms, 1000);
        assert!(config.log_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_config_from_env() {
        // This test just ensures it doesn't panic
        let config = SessionConfig::from_env();
        assert!(config.tick_ms >= 1);
    }
}
