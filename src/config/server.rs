//! HTTP listener, environment and CORS settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request the service will wait on; PDF conversion dominates.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener and request-handling settings.
///
/// Every field has a default, so `PROPOSAL_BUILDER__SERVER__*` variables
/// only need to name what differs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Covers the whole request, narrative rendering and PDF conversion included
    pub request_timeout_secs: u64,
    /// Comma-separated browser origins allowed to call the API
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin; only used in development with nothing configured.
    Any,
    /// Exactly these origins. May be empty, which allows none.
    Origins(Vec<String>),
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidAddress(addr))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins, trimmed, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Development without configured origins is open; everything else
    /// is restricted to the configured list.
    pub fn cors_policy(&self) -> CorsPolicy {
        let origins = self.cors_origins_list();
        if origins.is_empty() && self.environment == Environment::Development {
            CorsPolicy::Any
        } else {
            CorsPolicy::Origins(origins)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,proposal_builder=debug,tower_http=info".to_string(),
            request_timeout_secs: 120,
            cors_origins: None,
        }
    }
}
