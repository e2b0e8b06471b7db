//! Runtime configuration for the client binary.

use std::time::Duration;

use aula_client::RetryPolicy;

/// Client configuration. Defaults match the deployed behavior; every knob is
/// overridable through `AULA_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    /// Session token poll interval.
    pub session_poll: Duration,
    /// Backend reachability probe interval.
    pub connectivity_poll: Duration,
    /// Bounded retry for view fetches.
    pub retry: RetryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            session_poll: Duration::from_secs(60),
            connectivity_poll: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, warning and keeping the
    /// default for anything missing or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        match std::env::var("AULA_API_URL") {
            Ok(url) if !url.trim().is_empty() => config.base_url = url,
            _ => tracing::warn!("AULA_API_URL not set; using {}", config.base_url),
        }

        if let Some(interval) = read_secs("AULA_SESSION_POLL_SECS") {
            config.session_poll = interval;
        }
        if let Some(interval) = read_secs("AULA_CONNECTIVITY_POLL_SECS") {
            config.connectivity_poll = interval;
        }

        config
    }
}

fn read_secs(name: &str) -> Option<Duration> {
    let raw = std::env::var(name).ok()?;
    match raw.parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(err) => {
            tracing::warn!(name, raw, %err, "ignoring unparseable duration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.session_poll, Duration::from_secs(60));
        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.retry.delay, Duration::from_secs(1));
    }
}
