//! HTTP listener configuration

use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`. A generation request waits on
/// the model, so this is well above a typical API timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, logging and CORS settings for the API process.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind, IPv4 or IPv6 without brackets
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request timeout applied by the HTTP layer
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins; unset allows any origin
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production switches logs to JSON.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.trim().parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins, trimmed, with empty entries dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.socket_addr().is_err() {
            return Err(ValidationError::InvalidHost);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info,blocksign=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;

    #[test]
    fn defaults_listen_on_8000_with_debug_logs_for_the_crate() {
        let config = ServerConfig::default();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert!(config.log_level.contains("blocksign=debug"));
        assert!(config.cors_origins_list().is_empty());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn request_timeout_outlasts_the_model_call() {
        let server = ServerConfig::default();

        assert_eq!(server.request_timeout(), Duration::from_secs(120));
        assert!(server.request_timeout() > AiConfig::default().timeout());
    }

    #[test]
    fn binds_ipv6_hosts() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 9000,
            ..Default::default()
        };

        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:9000");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn hostnames_are_rejected() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::InvalidHost));
    }

    #[test]
    fn cors_list_ignores_blank_and_trailing_entries() {
        let config = ServerConfig {
            cors_origins: Some(" https://blocksign.app ,, http://localhost:3000,".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.cors_origins_list(),
            vec!["https://blocksign.app", "http://localhost:3000"]
        );
    }

    #[test]
    fn timeout_bounds() {
        let at_limit = ServerConfig {
            request_timeout_secs: MAX_REQUEST_TIMEOUT_SECS,
            ..Default::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));

        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
