//! Gateway configuration
//!
//! All settings come from environment variables with sensible defaults so
//! the gateway can run unconfigured against the hosted service.

use actrun_upstream::DEFAULT_BASE_URL;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Base URL of the upstream automation API
    pub upstream_url: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ACTRUN_BIND_ADDR (optional, default: 0.0.0.0:3000)
    /// - ACTRUN_UPSTREAM_URL (optional, default: the hosted service)
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("ACTRUN_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let upstream_url =
            std::env::var("ACTRUN_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            bind_addr,
            upstream_url,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_addr.is_empty() {
            return Err("bind_addr cannot be empty".to_string());
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            return Err("upstream_url must start with http:// or https://".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            upstream_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.upstream_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.upstream_url = "http://localhost:9000".to_string();
        assert!(config.validate().is_ok());

        config.bind_addr = String::new();
        assert!(config.validate().is_err());
    }
}
