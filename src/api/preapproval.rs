use super::{to_object, AdaptiveBase, AdaptiveOperation};
use crate::credentials::Credentials;
use crate::settings::Settings;
use crate::transport::Transport;
use crate::types::{Ack, PreApprovalResponse};
use crate::utils::decimal_number;
use crate::Result;
use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::sync::Arc;

/// Query string appended to the auth URL, followed by the pre-approval key
pub const PREAPPROVAL_URL_TEMPLATE: &str = "?cmd=_ap-preapproval&preapprovalkey=";

/// Fields of a `Preapproval` request. Unset fields are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreApprovalRequest {
    pub starting_date: Option<String>,
    pub ending_date: Option<String>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub currency_code: Option<String>,
    #[serde(serialize_with = "decimal_number::option::serialize")]
    pub max_amount_per_payment: Option<Decimal>,
    pub max_number_of_payments: Option<u32>,
    #[serde(serialize_with = "decimal_number::option::serialize")]
    pub max_total_amount_of_all_payments: Option<Decimal>,
}

impl PreApprovalRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_starting_date(mut self, date: impl Into<String>) -> Self {
        self.starting_date = Some(date.into());
        self
    }

    /// Set the starting date from a zoned timestamp, e.g. from
    /// [`current_local_time`](crate::utils::current_local_time)
    pub fn with_starting_time<Tz: TimeZone>(self, time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        self.with_starting_date(time.to_rfc3339())
    }

    pub fn with_ending_date(mut self, date: impl Into<String>) -> Self {
        self.ending_date = Some(date.into());
        self
    }

    pub fn with_ending_time<Tz: TimeZone>(self, time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        self.with_ending_date(time.to_rfc3339())
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_currency_code(mut self, currency: impl Into<String>) -> Self {
        self.currency_code = Some(currency.into());
        self
    }

    pub fn with_max_amount_per_payment(mut self, amount: Decimal) -> Self {
        self.max_amount_per_payment = Some(amount);
        self
    }

    pub fn with_max_number_of_payments(mut self, count: u32) -> Self {
        self.max_number_of_payments = Some(count);
        self
    }

    pub fn with_max_total_amount_of_all_payments(mut self, amount: Decimal) -> Self {
        self.max_total_amount_of_all_payments = Some(amount);
        self
    }
}

/// `Preapproval`: set up a standing authorization for future payments
#[derive(Debug, Clone)]
pub struct PreApproval<'a> {
    base: AdaptiveBase<'a>,
}

impl<'a> PreApproval<'a> {
    /// Create the operation for the sandbox (`true`) or production environment
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

    /// Approval URL for a pre-approval key, if an auth URL is configured
    pub fn next_url(&self, preapproval_key: Option<&str>) -> String {
        match (self.base.auth_url(), preapproval_key) {
            (Some(auth_url), Some(key)) if !auth_url.is_empty() && !key.is_empty() => {
                format!("{}{}{}", auth_url, PREAPPROVAL_URL_TEMPLATE, key)
            }
            _ => String::new(),
        }
    }
}

impl AdaptiveOperation for PreApproval<'_> {
    const OPERATION: &'static str = "Preapproval";

    type Request = PreApprovalRequest;
    type Response = PreApprovalResponse;

    fn base(&self) -> &AdaptiveBase<'_> {
        &self.base
    }

    fn build_payload(&self, request: &PreApprovalRequest) -> Result<Map<String, Value>> {
        to_object(request)
    }

    fn build_response(&self, ack: Ack, response: Value) -> Result<PreApprovalResponse> {
        let preapproval_key = response
            .get("preapprovalKey")
            .and_then(Value::as_str)
            .map(str::to_string);
        let next_url = self.next_url(preapproval_key.as_deref());

        Ok(PreApprovalResponse {
            ack,
            preapproval_key,
            next_url,
        })
    }
}
