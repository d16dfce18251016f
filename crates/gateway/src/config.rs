//! Gateway configuration.

use std::path::PathBuf;

use common::{env_first, env_or, env_parse_or, Platform};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Deployment platform; `/admin/reset` only works on dev
    pub platform: Platform,
    /// API key the payment provider sends with webhooks
    pub polka_key: Option<String>,
    /// Directory served under `/app`
    pub fileserver_root: PathBuf,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or(&["HOST"], &defaults.host),
            port: env_parse_or(&["PORT"], defaults.port),
            platform: env_first(&["PLATFORM"])
                .map(|p| Platform::from(p.as_str()))
                .unwrap_or_default(),
            polka_key: env_first(&["POLKA_KEY"]),
            fileserver_root: PathBuf::from(env_or(&["FILESERVER_ROOT"], ".")),
        }
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            platform: Platform::Production,
            polka_key: None,
            fileserver_root: PathBuf::from("."),
        }
    }
}
