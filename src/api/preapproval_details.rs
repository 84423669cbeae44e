use super::{to_object, AdaptiveBase, AdaptiveOperation};
use crate::credentials::Credentials;
use crate::settings::Settings;
use crate::transport::Transport;
use crate::types::{Ack, PreApprovalDetailsResponse};
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreApprovalDetailsRequest {
    pub preapproval_key: String,
}

impl PreApprovalDetailsRequest {
    pub fn new(preapproval_key: impl Into<String>) -> Self {
        Self {
            preapproval_key: preapproval_key.into(),
        }
    }
}

/// `PreapprovalDetails`: look up the state of an existing pre-approval
#[derive(Debug, Clone)]
pub struct PreApprovalDetails<'a> {
    base: AdaptiveBase<'a>,
}

impl<'a> PreApprovalDetails<'a> {
    pub fn new(credentials: &'a Credentials, sandbox: bool) -> Result<Self> {
        Self::with_settings(credentials, Settings::new(sandbox))
    }

    pub fn with_settings(credentials: &'a Credentials, settings: Settings) -> Result<Self> {
        Ok(Self {
            base: AdaptiveBase::new(credentials, settings, Self::OPERATION)?,
        })
    }

    pub fn with_transport(
        credentials: &'a Credentials,
        settings: Settings,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base: AdaptiveBase::with_transport(credentials, settings, Self::OPERATION, transport),
        }
    }
}

impl AdaptiveOperation for PreApprovalDetails<'_> {
    const OPERATION: &'static str = "PreapprovalDetails";

    type Request = PreApprovalDetailsRequest;
    type Response = PreApprovalDetailsResponse;

    fn base(&self) -> &AdaptiveBase<'_> {
        &self.base
    }

    fn build_payload(&self, request: &PreApprovalDetailsRequest) -> Result<Map<String, Value>> {
        to_object(request)
    }

    fn build_response(&self, ack: Ack, response: Value) -> Result<PreApprovalDetailsResponse> {
        let mut details: PreApprovalDetailsResponse = serde_json::from_value(response)?;
        details.ack = ack;
        Ok(details)
    }
}
