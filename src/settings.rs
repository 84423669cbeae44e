//! Endpoint selection for the sandbox and production environments

use crate::{Error, Result};
use std::time::Duration;
use url::Url;

/// Sandbox Adaptive Payments endpoint
pub const SANDBOX_ENDPOINT: &str = "https://svcs.sandbox.paypal.com/AdaptivePayments";

/// Production Adaptive Payments endpoint
pub const PRODUCTION_ENDPOINT: &str = "https://svcs.paypal.com/AdaptivePayments";

/// Sandbox authorization redirect base
pub const SANDBOX_AUTH_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// Production authorization redirect base
pub const PRODUCTION_AUTH_URL: &str = "https://www.paypal.com/webscr";

/// Application id PayPal publishes for sandbox testing
pub const SANDBOX_APP_ID: &str = "APP-80W284485P519543T";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// PayPal environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Map the "use sandbox" flag to an environment
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    /// Adaptive Payments endpoint for this environment
    pub fn endpoint(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_ENDPOINT,
            Environment::Production => PRODUCTION_ENDPOINT,
        }
    }

    /// Authorization redirect base for this environment
    pub fn auth_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_AUTH_URL,
            Environment::Production => PRODUCTION_AUTH_URL,
        }
    }

    /// Shared sandbox application id, if any
    pub fn app_id(&self) -> Option<&'static str> {
        match self {
            Environment::Sandbox => Some(SANDBOX_APP_ID),
            Environment::Production => None,
        }
    }
}

/// Resolved endpoint configuration used by every operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Environment the settings were resolved from
    pub environment: Environment,
    /// Base URL; operation names are appended to it
    pub endpoint: String,
    /// Base URL the payer is redirected to for approval
    pub auth_url: Option<String>,
    /// Sandbox application id
    pub app_id: Option<String>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Resolve settings from the "use sandbox" flag
    pub fn new(sandbox: bool) -> Self {
        Self::for_environment(Environment::from_sandbox_flag(sandbox))
    }

    /// Resolve settings for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            endpoint: environment.endpoint().to_string(),
            auth_url: Some(environment.auth_url().to_string()),
            app_id: environment.app_id().map(str::to_string),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Sandbox settings
    pub fn sandbox() -> Self {
        Self::for_environment(Environment::Sandbox)
    }

    /// Production settings
    pub fn production() -> Self {
        Self::for_environment(Environment::Production)
    }

    /// Point operations at a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|e| Error::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Override the authorization redirect base
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Drop the authorization redirect base; pre-approval next URLs become empty
    pub fn without_auth_url(mut self) -> Self {
        self.auth_url = None;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fully qualified URL of an operation
    pub fn operation_url(&self, operation: &str) -> String {
        format!("{}/{}", self.endpoint, operation)
    }

    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_settings() {
        let settings = Settings::new(true);

        assert_eq!(settings.endpoint, SANDBOX_ENDPOINT);
        assert_eq!(settings.auth_url.as_deref(), Some(SANDBOX_AUTH_URL));
        assert_eq!(settings.app_id.as_deref(), Some("APP-80W284485P519543T"));
        assert!(settings.is_sandbox());
    }

    #[test]
    fn test_production_settings() {
        let settings = Settings::new(false);

        assert_eq!(settings.endpoint, "https://svcs.paypal.com/AdaptivePayments");
        assert_eq!(
            settings.auth_url.as_deref(),
            Some("https://www.paypal.com/webscr")
        );
        assert_eq!(settings.app_id, None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_operation_url() {
        let settings = Settings::sandbox();
        assert_eq!(
            settings.operation_url("Pay"),
            "https://svcs.sandbox.paypal.com/AdaptivePayments/Pay"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let settings = Settings::sandbox()
            .with_endpoint("http://127.0.0.1:1234/")
            .unwrap();
        assert_eq!(settings.operation_url("Preapproval"), "http://127.0.0.1:1234/Preapproval");

        let err = Settings::sandbox().with_endpoint("not a url").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_timeout_and_auth_overrides() {
        let settings = Settings::production()
            .with_timeout(Duration::from_secs(5))
            .without_auth_url();

        assert_eq!(settings.timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.auth_url, None);
    }
}
