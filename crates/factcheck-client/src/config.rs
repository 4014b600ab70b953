//! Client configuration and deployment-mode routing.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::ClientError;

/// Loopback address of the backend in the development profile.
pub const DEV_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable selecting the deployment mode.
pub const MODE_ENV_VAR: &str = "FACTCHECK_ENV";

/// Where requests for `/api/chat` are routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Requests go straight to the fixed loopback backend.
    #[default]
    Development,
    /// Requests go to the configured endpoint (reverse proxy).
    Production,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ClientError::InvalidMode(other.to_string())),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Deployment mode.
    pub mode: DeploymentMode,

    /// Explicit base URL; takes precedence over the mode's default.
    pub endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(mode: DeploymentMode, endpoint: Option<String>) -> Self {
        Self { mode, endpoint }
    }

    /// Resolve the base URL every request path is appended to.
    ///
    /// Production mode has no implicit target, so it requires an endpoint.
    pub fn base_url(&self) -> Result<String, ClientError> {
        let base = match (&self.endpoint, self.mode) {
            (Some(endpoint), _) => endpoint.trim().trim_end_matches('/').to_string(),
            (None, DeploymentMode::Development) => DEV_BASE_URL.to_string(),
            (None, DeploymentMode::Production) => {
                return Err(ClientError::InvalidEndpoint(
                    "production mode requires an explicit endpoint".to_string(),
                ))
            }
        };

        let url = Url::parse(&base)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", base, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                base,
                url.scheme()
            )));
        }

        Ok(base)
    }
}
