use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// Generation is compute-heavy server side, so the client waits a long time.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("PICBOOK_BASE_URL").ok();
        let timeout_secs = env::var("PICBOOK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        ServiceConfig {
            base_url,
            timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = ServiceConfig::new();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServiceConfig::new()
            .with_base_url("http://10.0.0.2:9000")
            .with_timeout_secs(30);
        assert_eq!(config.base_url(), "http://10.0.0.2:9000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    // Single test owns the PICBOOK_* variables so parallel test runs
    // never see each other's values.
    #[test]
    fn test_from_env_layering() {
        env::set_var("PICBOOK_BASE_URL", "http://env-host:7000");
        env::set_var("PICBOOK_TIMEOUT_SECS", "120");
        let config = ServiceConfig::from_env();
        assert_eq!(config.base_url(), "http://env-host:7000");
        assert_eq!(config.timeout(), Duration::from_secs(120));

        // An unparsable timeout falls back to the default instead of
        // failing construction.
        env::set_var("PICBOOK_TIMEOUT_SECS", "not-a-number");
        let config = ServiceConfig::from_env();
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        // Builder calls layered after from_env win.
        let config = ServiceConfig::from_env().with_base_url("http://override:1");
        assert_eq!(config.base_url(), "http://override:1");

        env::remove_var("PICBOOK_BASE_URL");
        env::remove_var("PICBOOK_TIMEOUT_SECS");

        let config = ServiceConfig::from_env();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }
}
