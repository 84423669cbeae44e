//! API credentials and the security headers derived from them

use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::path::Path;

/// Header names sent with every request. HTTP header names are
/// case-insensitive; they are stored lowercase as `http` requires.
pub mod headers {
    pub const SECURITY_USERID: &str = "x-paypal-security-userid";
    pub const SECURITY_PASSWORD: &str = "x-paypal-security-password";
    pub const SECURITY_SIGNATURE: &str = "x-paypal-security-signature";
    pub const APPLICATION_ID: &str = "x-paypal-application-id";
    pub const REQUEST_DATA_FORMAT: &str = "x-paypal-request-data-format";
    pub const RESPONSE_DATA_FORMAT: &str = "x-paypal-response-data-format";
}

/// Environment variable names read by [`Credentials::from_env`]
pub const ENV_USER_ID: &str = "PAYPAL_USER_ID";
pub const ENV_PASSWORD: &str = "PAYPAL_PASSWORD";
pub const ENV_SIGNATURE: &str = "PAYPAL_SIGNATURE";
pub const ENV_APP_ID: &str = "PAYPAL_APP_ID";

const DATA_FORMAT: &str = "JSON";

/// The four API secrets PayPal issues for classic API access
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "PAYPAL_USER_ID")]
    user_id: String,
    #[serde(rename = "PAYPAL_PASSWORD")]
    password: String,
    #[serde(rename = "PAYPAL_SIGNATURE")]
    signature: String,
    #[serde(rename = "PAYPAL_APP_ID")]
    app_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .field("signature", &"<redacted>")
            .field("app_id", &self.app_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            signature: signature.into(),
            app_id: app_id.into(),
        }
    }

    /// Read credentials from `PAYPAL_USER_ID`, `PAYPAL_PASSWORD`,
    /// `PAYPAL_SIGNATURE` and `PAYPAL_APP_ID`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name).ok_or_else(|| Error::MissingCredential {
                name: name.to_string(),
            })
        };

        Ok(Self {
            user_id: get(ENV_USER_ID)?,
            password: get(ENV_PASSWORD)?,
            signature: get(ENV_SIGNATURE)?,
            app_id: get(ENV_APP_ID)?,
        })
    }

    /// Load credentials from a JSON file keyed like the environment variables
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Build the six headers every Adaptive Payments request carries
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(6);

        for (name, value) in [
            (headers::SECURITY_USERID, self.user_id.as_str()),
            (headers::SECURITY_PASSWORD, self.password.as_str()),
            (headers::SECURITY_SIGNATURE, self.signature.as_str()),
            (headers::APPLICATION_ID, self.app_id.as_str()),
            (headers::REQUEST_DATA_FORMAT, DATA_FORMAT),
            (headers::RESPONSE_DATA_FORMAT, DATA_FORMAT),
        ] {
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_header(name, e.to_string()))?;
            map.insert(HeaderName::from_static(name), header_value);
        }

        Ok(map)
    }
}
