//! Response types shared by the Adaptive Payments operations

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Error language declared in every request envelope
pub const ERROR_LANGUAGE: &str = "en_US";

/// Acknowledgement status reported in `responseEnvelope.ack`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ack {
    Success,
    SuccessWithWarning,
    Failure,
    FailureWithWarning,
    /// Any value PayPal may add later; treated as a failure
    Other(String),
}

impl Ack {
    pub fn as_str(&self) -> &str {
        match self {
            Ack::Success => "Success",
            Ack::SuccessWithWarning => "SuccessWithWarning",
            Ack::Failure => "Failure",
            Ack::FailureWithWarning => "FailureWithWarning",
            Ack::Other(other) => other,
        }
    }

    /// Only `Success` and `SuccessWithWarning` produce a success result
    pub fn is_success(&self) -> bool {
        matches!(self, Ack::Success | Ack::SuccessWithWarning)
    }
}

impl From<&str> for Ack {
    fn from(value: &str) -> Self {
        match value {
            "Success" => Ack::Success,
            "SuccessWithWarning" => Ack::SuccessWithWarning,
            "Failure" => Ack::Failure,
            "FailureWithWarning" => Ack::FailureWithWarning,
            other => Ack::Other(other.to_string()),
        }
    }
}

impl From<String> for Ack {
    fn from(value: String) -> Self {
        Ack::from(value.as_str())
    }
}

impl From<Ack> for String {
    fn from(ack: Ack) -> Self {
        ack.as_str().to_string()
    }
}

impl FromStr for Ack {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Ack::from(s))
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata wrapper PayPal puts on every response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub ack: Ack,
    #[serde(default, deserialize_with = "opt_string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub correlation_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub build: Option<String>,
}

/// Outcome of a request that reached PayPal
pub type ApiOutcome<T> = std::result::Result<T, ApiFailure>;

/// Shared result for `Failure` and `FailureWithWarning` acknowledgements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub ack: Ack,
    /// `errorId` of the first reported error
    pub error_id: Option<String>,
    /// `message` of the first reported error
    pub message: Option<String>,
    /// `responseEnvelope.timestamp`
    pub timestamp: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData {
    #[serde(default, deserialize_with = "opt_string")]
    error_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FailureBody {
    response_envelope: ResponseEnvelope,
    #[serde(default, deserialize_with = "null_as_empty")]
    error: Vec<ErrorData>,
}

impl ApiFailure {
    /// Build the failure result from a raw response body
    pub fn from_response(response: Value) -> Result<Self> {
        let body: FailureBody = serde_json::from_value(response)?;
        let first = body.error.into_iter().next();
        let (error_id, message) = match first {
            Some(error) => (error.error_id, error.message),
            None => (None, None),
        };

        Ok(Self {
            ack: body.response_envelope.ack,
            error_id,
            message,
            timestamp: body.response_envelope.timestamp,
        })
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.ack,
            self.error_id.as_deref().unwrap_or("no error id"),
            self.message.as_deref().unwrap_or("no message")
        )
    }
}

impl std::error::Error for ApiFailure {}

/// Read `responseEnvelope.ack` without interpreting the rest of the body
pub fn response_ack(response: &Value) -> Result<Ack> {
    response
        .pointer("/responseEnvelope/ack")
        .and_then(Value::as_str)
        .map(Ack::from)
        .ok_or_else(|| Error::malformed_response("missing responseEnvelope.ack"))
}

/// Success result of `Preapproval`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreApprovalResponse {
    pub ack: Ack,
    pub preapproval_key: Option<String>,
    /// Where to send the payer to approve; empty when no key or auth URL
    pub next_url: String,
}

/// Sender identification returned by PayPal
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderInfo {
    #[serde(default, deserialize_with = "opt_string")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub use_credentials: Option<String>,
    #[serde(default)]
    pub tax_id_details: Option<TaxIdDetails>,
}

/// Tax identification attached to a sender
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxIdDetails {
    #[serde(default, deserialize_with = "opt_string")]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub tax_id_type: Option<String>,
}

/// Phone number identifying a receiver
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    #[serde(default, deserialize_with = "opt_string")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub extension: Option<String>,
}

/// Success result of `PreapprovalDetails`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreApprovalDetailsResponse {
    #[serde(rename = "responseEnvelope", deserialize_with = "envelope_ack")]
    pub ack: Ack,
    #[serde(default, deserialize_with = "opt_string")]
    pub approved: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub cancel_url: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub cur_payments: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub cur_payments_amount: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub cur_period_attempts: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub date_of_month: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub day_of_week: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub display_max_total_amount: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub ending_date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub max_total_amount_of_all_payments: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub payment_period: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub pin_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub return_url: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub starting_date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub sender: Option<SenderInfo>,
    #[serde(default, deserialize_with = "opt_string")]
    pub sender_email: Option<String>,
}

/// Receiver as echoed back inside a payment info record
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceiver {
    #[serde(default, deserialize_with = "opt_string")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub invoice_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub payment_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub payment_sub_type: Option<String>,
    #[serde(default)]
    pub phone: Option<PhoneNumber>,
}

/// One transaction of an executed payment
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default, deserialize_with = "opt_string")]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub receiver: Option<PaymentReceiver>,
    #[serde(default, deserialize_with = "opt_string")]
    pub refunded_amount: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub pending_refund: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub pending_reason: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub sender_transaction_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub sender_transaction_status: Option<String>,
}

/// Success result of `Pay`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayResponse {
    pub ack: Ack,
    pub pay_key: Option<String>,
    pub payment_exec_status: Option<String>,
    /// `paymentInfoList.paymentInfo`, unwrapped
    pub payment_info_list: Option<Vec<PaymentInfo>>,
    pub sender: Option<SenderInfo>,
}

fn envelope_ack<'de, D>(deserializer: D) -> std::result::Result<Ack, D::Error>
where
    D: Deserializer<'de>,
{
    ResponseEnvelope::deserialize(deserializer).map(|envelope| envelope.ack)
}

/// Deserialize a JSON array, reading `null` as empty
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// PayPal's JSON binding renders almost everything as strings, but not
// reliably; scalars are accepted and kept in their textual form.
fn opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, got {}",
            other
        ))),
    }
}
