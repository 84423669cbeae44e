//! Adaptive Payments operations
//!
//! Every operation is built on [`AdaptiveBase`], which owns the endpoint,
//! credentials and transport, and implements [`AdaptiveOperation`], which
//! turns a typed request into a payload and a raw response into a typed
//! result. `request` never mutates the operation: payload and headers are
//! rebuilt for every call.

mod pay;
mod preapproval;
mod preapproval_details;

pub use pay::{Pay, PayRequest, ACTION_TYPE_PAY};
pub use preapproval::{PreApproval, PreApprovalRequest, PREAPPROVAL_URL_TEMPLATE};
pub use preapproval_details::{PreApprovalDetails, PreApprovalDetailsRequest};

use crate::credentials::Credentials;
use crate::settings::Settings;
use crate::transport::{HttpTransport, Transport};
use crate::types::{response_ack, Ack, ApiFailure, ApiOutcome, ERROR_LANGUAGE};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Endpoint, credentials and transport shared by every operation
#[derive(Clone)]
pub struct AdaptiveBase<'a> {
    credentials: &'a Credentials,
    settings: Settings,
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AdaptiveBase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveBase")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .field("auth_url", &self.settings.auth_url)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl<'a> AdaptiveBase<'a> {
    /// Create a base for `operation` talking HTTP through reqwest
    pub fn new(credentials: &'a Credentials, settings: Settings, operation: &str) -> Result<Self> {
        let transport = HttpTransport::new(&settings)?;
        Ok(Self::with_transport(
            credentials,
            settings,
            operation,
            Arc::new(transport),
        ))
    }

    /// Create a base for `operation` with a caller-supplied transport
    pub fn with_transport(
        credentials: &'a Credentials,
        settings: Settings,
        operation: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let endpoint = settings.operation_url(operation);

        Self {
            credentials,
            settings,
            endpoint,
            transport,
        }
    }

    /// Fully qualified operation URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authorization redirect base, if configured
    pub fn auth_url(&self) -> Option<&str> {
        self.settings.auth_url.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn credentials(&self) -> &Credentials {
        self.credentials
    }

    /// Merge operation fields over the fixed request envelope
    pub fn envelope(&self, payload: Map<String, Value>) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert(
            "requestEnvelope".to_string(),
            json!({ "errorLanguage": ERROR_LANGUAGE }),
        );
        body.extend(payload);
        body
    }

    /// POST a complete payload and return the parsed response body
    pub fn send(&self, payload: &Map<String, Value>) -> Result<Value> {
        let headers = self.credentials.headers()?;
        let body = serde_json::to_vec(payload)?;

        debug!(endpoint = %self.endpoint, bytes = body.len(), "sending adaptive payments request");
        self.transport.post_json(&self.endpoint, headers, body)
    }
}

/// A single Adaptive Payments API operation
pub trait AdaptiveOperation {
    /// Operation name appended to the endpoint, e.g. `Pay`
    const OPERATION: &'static str;

    type Request;
    type Response;

    fn base(&self) -> &AdaptiveBase<'_>;

    /// Operation-specific payload fields
    fn build_payload(&self, request: &Self::Request) -> Result<Map<String, Value>>;

    /// Success result for a `Success` or `SuccessWithWarning` response
    fn build_response(&self, ack: Ack, response: Value) -> Result<Self::Response>;

    /// Full request body: operation fields plus the request envelope
    fn prepare(&self, request: &Self::Request) -> Result<Map<String, Value>> {
        let payload = self.build_payload(request)?;
        Ok(self.base().envelope(payload))
    }

    /// Map a raw response to the success or shared failure result
    fn dispatch(&self, response: Value) -> Result<ApiOutcome<Self::Response>> {
        let ack = response_ack(&response)?;
        debug!(operation = Self::OPERATION, %ack, "adaptive payments response");

        if ack.is_success() {
            return Ok(Ok(self.build_response(ack, response)?));
        }

        let failure = ApiFailure::from_response(response)?;
        warn!(
            operation = Self::OPERATION,
            ack = %failure.ack,
            error_id = failure.error_id.as_deref().unwrap_or_default(),
            message = failure.message.as_deref().unwrap_or_default(),
            "adaptive payments request failed"
        );
        Ok(Err(failure))
    }

    /// Build, send and map one request
    fn request(&self, request: &Self::Request) -> Result<ApiOutcome<Self::Response>> {
        let payload = self.prepare(request)?;
        let response = self.base().send(&payload)?;
        self.dispatch(response)
    }
}

/// Serialize a request struct into a JSON object
pub(crate) fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::serialization(format!(
            "payload must be a JSON object, got {}",
            other
        ))),
    }
}
