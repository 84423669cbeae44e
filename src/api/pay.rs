use super::{to_object, AdaptiveBase, AdaptiveOperation};
use crate::credentials::Credentials;
use crate::models::{FeesPayer, ReceiverList};
use crate::settings::Settings;
use crate::transport::Transport;
use crate::types::{null_as_empty, Ack, PayResponse, PaymentInfo, SenderInfo};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// `actionType` sent with every `Pay` request
pub const ACTION_TYPE_PAY: &str = "PAY";

/// Fields of a `Pay` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayRequest {
    pub fees_payer: FeesPayer,
    pub currency_code: Option<String>,
    pub sender_email: Option<String>,
    /// Required; a request without receivers is rejected before sending
    pub receiver_list: Option<ReceiverList>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub memo: String,
    /// Omitted from the payload entirely when unset
    pub preapproval_key: Option<String>,
}

impl PayRequest {
    pub fn new(receiver_list: ReceiverList) -> Self {
        Self {
            receiver_list: Some(receiver_list),
            ..Self::default()
        }
    }

    pub fn with_fees_payer(mut self, fees_payer: FeesPayer) -> Self {
        self.fees_payer = fees_payer;
        self
    }

    pub fn with_currency_code(mut self, currency: impl Into<String>) -> Self {
        self.currency_code = Some(currency.into());
        self
    }

    pub fn with_sender_email(mut self, email: impl Into<String>) -> Self {
        self.sender_email = Some(email.into());
        self
    }

    pub fn with_receiver_list(mut self, receiver_list: ReceiverList) -> Self {
        self.receiver_list = Some(receiver_list);
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_preapproval_key(mut self, key: impl Into<String>) -> Self {
        self.preapproval_key = Some(key.into());
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayPayload<'r> {
    action_type: &'static str,
    fees_payer: FeesPayer,
    currency_code: Option<&'r str>,
    sender_email: Option<&'r str>,
    receiver_list: ReceiverListPayload<'r>,
    return_url: Option<&'r str>,
    cancel_url: Option<&'r str>,
    memo: &'r str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preapproval_key: Option<&'r str>,
}

#[derive(Serialize)]
struct ReceiverListPayload<'r> {
    receiver: &'r ReceiverList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentInfoList {
    #[serde(default, deserialize_with = "null_as_empty")]
    payment_info: Vec<PaymentInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayBody {
    #[serde(default)]
    pay_key: Option<String>,
    #[serde(default)]
    payment_exec_status: Option<String>,
    #[serde(default)]
    payment_info_list: Option<PaymentInfoList>,
    #[serde(default)]
    sender: Option<SenderInfo>,
}

/// `Pay`: send money to up to six receivers, optionally against a pre-approval
#[derive(Debug, Clone)]
pub struct Pay<'a> {
    base: AdaptiveBase<'a>,
}

impl<'a> Pay<'a> {
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

impl AdaptiveOperation for Pay<'_> {
    const OPERATION: &'static str = "Pay";

    type Request = PayRequest;
    type Response = PayResponse;

    fn base(&self) -> &AdaptiveBase<'_> {
        &self.base
    }

    fn build_payload(&self, request: &PayRequest) -> Result<Map<String, Value>> {
        let receiver_list = request
            .receiver_list
            .as_ref()
            .ok_or_else(|| Error::invalid_receiver("receiverList needs to be a ReceiverList"))?;

        to_object(&PayPayload {
            action_type: ACTION_TYPE_PAY,
            fees_payer: request.fees_payer,
            currency_code: request.currency_code.as_deref(),
            sender_email: request.sender_email.as_deref(),
            receiver_list: ReceiverListPayload {
                receiver: receiver_list,
            },
            return_url: request.return_url.as_deref(),
            cancel_url: request.cancel_url.as_deref(),
            memo: &request.memo,
            preapproval_key: request.preapproval_key.as_deref(),
        })
    }

    fn build_response(&self, ack: Ack, response: Value) -> Result<PayResponse> {
        let body: PayBody = serde_json::from_value(response)?;

        Ok(PayResponse {
            ack,
            pay_key: body.pay_key,
            payment_exec_status: body.payment_exec_status,
            payment_info_list: body.payment_info_list.map(|list| list.payment_info),
            sender: body.sender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::models::Receiver;
    use crate::types::PaymentReceiver;
    use rust_decimal::Decimal;
    use serde_json::json;

    const PAY_KEY: &str = "AP-2125055755555555";

    fn receiver_list() -> ReceiverList {
        let receivers = (0..3)
            .map(|i| {
                Receiver::new(
                    format!("receiver{}@gmail.com", i + 1),
                    Decimal::from(10 + i * 5),
                )
            })
            .collect();
        ReceiverList::new(receivers).unwrap()
    }

    fn pay_request() -> PayRequest {
        PayRequest::new(receiver_list())
            .with_currency_code("USD")
            .with_return_url("http://return.url")
            .with_cancel_url("http://cancel.url")
            .with_sender_email("fakesender@gmail.com")
            .with_memo("Example memo")
    }

    #[test]
    fn test_request_capturing_payment() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({"responseEnvelope": success_envelope()}));
        let pay = Pay::with_transport(&credentials, Settings::new(true), transport.clone());

        pay.request(&pay_request()).unwrap().unwrap();

        let call = transport.last_call();
        assert_eq!(call.url, "https://svcs.sandbox.paypal.com/AdaptivePayments/Pay");
        assert_paypal_headers(&call.headers);
        assert_eq!(
            call.body,
            json!({
                "actionType": "PAY",
                "returnUrl": "http://return.url",
                "cancelUrl": "http://cancel.url",
                "currencyCode": "USD",
                "feesPayer": "EACHRECEIVER",
                "senderEmail": "fakesender@gmail.com",
                "memo": "Example memo",
                "receiverList": {
                    "receiver": [
                        {"email": "receiver1@gmail.com", "amount": "10"},
                        {"email": "receiver2@gmail.com", "amount": "15"},
                        {"email": "receiver3@gmail.com", "amount": "20"}
                    ]
                },
                "requestEnvelope": {"errorLanguage": "en_US"}
            })
        );
    }

    #[test]
    fn test_preapproval_key_included_when_set() {
        let credentials = fake_credentials();
        let pay = Pay::with_transport(
            &credentials,
            Settings::sandbox(),
            RecordingTransport::new(json!({})),
        );

        let without = pay.prepare(&pay_request()).unwrap();
        assert!(!without.contains_key("preapprovalKey"));

        let keyed = pay
            .prepare(
                &pay_request()
                    .with_preapproval_key("PA-11111111111111111")
                    .with_fees_payer(FeesPayer::Sender),
            )
            .unwrap();
        assert_eq!(keyed["preapprovalKey"], "PA-11111111111111111");
        assert_eq!(keyed["feesPayer"], "SENDER");
    }

    #[test]
    fn test_memo_defaults_to_empty() {
        let credentials = fake_credentials();
        let pay = Pay::with_transport(
            &credentials,
            Settings::sandbox(),
            RecordingTransport::new(json!({})),
        );

        let payload = pay.prepare(&PayRequest::new(ReceiverList::default())).unwrap();
        assert_eq!(payload["memo"], "");
        assert_eq!(payload["feesPayer"], "EACHRECEIVER");
        assert_eq!(payload["receiverList"], json!({"receiver": []}));
    }

    #[test]
    fn test_missing_receiver_list_fails_before_sending() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({"responseEnvelope": success_envelope()}));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport.clone());

        let err = pay.request(&PayRequest::default()).unwrap_err();

        assert!(matches!(err, Error::InvalidReceiver { .. }));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_capture_payment_successfully() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "payKey": PAY_KEY,
            "paymentExecStatus": "COMPLETED",
            "paymentInfoList": {
                "paymentInfo": [
                    {
                        "pendingRefund": "false",
                        "receiver": {
                            "accountId": "RUCGXXXXXXXX",
                            "amount": "6.00",
                            "email": "receiver1@gmail.com",
                            "primary": "false"
                        },
                        "senderTransactionId": "07V41747777777777",
                        "senderTransactionStatus": "COMPLETED",
                        "transactionId": "111111111111",
                        "transactionStatus": "COMPLETED"
                    },
                    {
                        "pendingRefund": "false",
                        "receiver": {
                            "accountId": "WRFQXXXXXXXX",
                            "amount": "12.00",
                            "email": "receiver2@gmail.com",
                            "primary": "false"
                        },
                        "senderTransactionId": "98692817999999999",
                        "senderTransactionStatus": "COMPLETED",
                        "transactionId": "2222222222222",
                        "transactionStatus": "COMPLETED"
                    }
                ]
            },
            "responseEnvelope": success_envelope(),
            "sender": {"accountId": "SD97PL53N4N2Y"}
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let response = pay.request(&PayRequest::new(ReceiverList::default())).unwrap().unwrap();

        assert_eq!(response.ack, Ack::Success);
        assert_eq!(response.pay_key.as_deref(), Some(PAY_KEY));
        assert_eq!(response.payment_exec_status.as_deref(), Some("COMPLETED"));
        assert_eq!(
            response.sender,
            Some(SenderInfo {
                account_id: Some("SD97PL53N4N2Y".to_string()),
                ..SenderInfo::default()
            })
        );

        let infos = response.payment_info_list.unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(
            infos[0],
            PaymentInfo {
                transaction_id: Some("111111111111".to_string()),
                transaction_status: Some("COMPLETED".to_string()),
                receiver: Some(PaymentReceiver {
                    account_id: Some("RUCGXXXXXXXX".to_string()),
                    amount: Some("6.00".to_string()),
                    email: Some("receiver1@gmail.com".to_string()),
                    primary: Some("false".to_string()),
                    ..PaymentReceiver::default()
                }),
                refunded_amount: None,
                pending_refund: Some("false".to_string()),
                pending_reason: None,
                sender_transaction_id: Some("07V41747777777777".to_string()),
                sender_transaction_status: Some("COMPLETED".to_string()),
            }
        );
        assert_eq!(infos[1].transaction_id.as_deref(), Some("2222222222222"));
        assert_eq!(
            infos[1].receiver.as_ref().and_then(|r| r.amount.as_deref()),
            Some("12.00")
        );
    }

    #[test]
    fn test_success_without_payment_info() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "payKey": PAY_KEY,
            "paymentExecStatus": "CREATED",
            "responseEnvelope": success_envelope()
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let response = pay.request(&pay_request()).unwrap().unwrap();

        assert_eq!(response.payment_exec_status.as_deref(), Some("CREATED"));
        assert_eq!(response.payment_info_list, None);
        assert_eq!(response.sender, None);
    }

    #[test]
    fn test_null_payment_info_is_empty() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "payKey": PAY_KEY,
            "paymentInfoList": {"paymentInfo": null},
            "responseEnvelope": {"ack": "Success"}
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let response = pay.request(&pay_request()).unwrap().unwrap();

        assert_eq!(response.payment_info_list, Some(Vec::new()));
    }

    #[test]
    fn test_payment_records_keep_sender_and_receiver_details() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "payKey": PAY_KEY,
            "paymentInfoList": {
                "paymentInfo": [{
                    "receiver": {"amount": "1.00", "email": "a", "paymentType": "SERVICE"},
                    "transactionId": "111111111111"
                }]
            },
            "responseEnvelope": success_envelope(),
            "sender": {
                "accountId": "X",
                "useCredentials": "true",
                "taxIdDetails": {"taxId": "12345678", "taxIdType": "CNPJ"}
            }
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let response = pay.request(&pay_request()).unwrap().unwrap();

        let infos = response.payment_info_list.unwrap();
        let receiver = infos[0].receiver.as_ref().unwrap();
        assert_eq!(receiver.payment_type.as_deref(), Some("SERVICE"));

        let sender = response.sender.unwrap();
        assert_eq!(sender.use_credentials.as_deref(), Some("true"));
        assert_eq!(
            sender.tax_id_details.and_then(|details| details.tax_id_type).as_deref(),
            Some("CNPJ")
        );
    }

    #[test]
    fn test_unknown_ack_is_a_failure() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "payKey": PAY_KEY,
            "responseEnvelope": {"ack": "Partial", "timestamp": "T"}
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let failure = pay.request(&pay_request()).unwrap().unwrap_err();

        assert_eq!(failure.ack, Ack::Other("Partial".to_string()));
        assert_eq!(failure.error_id, None);
        assert_eq!(failure.timestamp.as_deref(), Some("T"));
    }

    #[test]
    fn test_capture_payment_with_invalid_preapproval_key() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "error": [{
                "category": "Application",
                "domain": "PLATFORM",
                "errorId": "580022",
                "message": "Invalid request parameter: preapprovalKey with value NON_EXISTENT_KEY",
                "parameter": ["preapprovalKey", "NON_EXISTENT_KEY"],
                "severity": "Error",
                "subdomain": "Application"
            }],
            "responseEnvelope": {
                "ack": "Failure",
                "build": "20420247",
                "correlationId": "e0c1fa3692d17",
                "timestamp": "2016-05-30T10:21:25.631-07:00"
            }
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let failure = pay
            .request(&pay_request().with_preapproval_key("NON_EXISTENT_KEY"))
            .unwrap()
            .unwrap_err();

        assert_eq!(failure.ack, Ack::Failure);
        assert_eq!(failure.error_id.as_deref(), Some("580022"));
        assert_eq!(
            failure.message.as_deref(),
            Some("Invalid request parameter: preapprovalKey with value NON_EXISTENT_KEY")
        );
        assert_eq!(
            failure.timestamp.as_deref(),
            Some("2016-05-30T10:21:25.631-07:00")
        );
    }

    #[test]
    fn test_capture_payment_with_duplicate_receiver() {
        let credentials = fake_credentials();
        let transport = RecordingTransport::new(json!({
            "error": [{
                "errorId": "579040",
                "message": "Receiver PayPal accounts must be unique.",
                "parameter": ["receiver"]
            }],
            "responseEnvelope": {
                "ack": "FailureWithWarning",
                "timestamp": "2016-05-30T10:27:03.931-07:00"
            }
        }));
        let pay = Pay::with_transport(&credentials, Settings::sandbox(), transport);

        let failure = pay.request(&pay_request()).unwrap().unwrap_err();

        assert_eq!(failure.ack, Ack::FailureWithWarning);
        assert_eq!(failure.error_id.as_deref(), Some("579040"));
        assert_eq!(
            failure.message.as_deref(),
            Some("Receiver PayPal accounts must be unique.")
        );
    }
}
