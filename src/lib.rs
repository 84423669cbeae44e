//! # adaptive-payments
//!
//! A client for the PayPal Adaptive Payments API. It builds the JSON
//! payloads for `Preapproval`, `PreapprovalDetails` and `Pay`, sends them
//! with the PayPal security headers, and maps each response to either the
//! operation's success type or the shared [`ApiFailure`].
//!
//! ```no_run
//! use adaptive_payments::{AdaptiveOperation, Credentials, Pay, PayRequest, Receiver, ReceiverList};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> adaptive_payments::Result<()> {
//! let credentials = Credentials::from_env()?;
//! let pay = Pay::new(&credentials, true)?;
//!
//! let receivers = ReceiverList::new(vec![Receiver::new("receiver@example.com", Decimal::new(1000, 2))])?;
//! let request = PayRequest::new(receivers)
//!     .with_currency_code("USD")
//!     .with_return_url("https://example.com/return")
//!     .with_cancel_url("https://example.com/cancel");
//!
//! match pay.request(&request)? {
//!     Ok(payment) => println!("pay key: {:?}", payment.pay_key),
//!     Err(failure) => println!("payment failed: {}", failure),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod credentials;
pub mod error;
pub mod models;
pub mod settings;
pub mod transport;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use api::{
    AdaptiveBase, AdaptiveOperation, Pay, PayRequest, PreApproval, PreApprovalDetails,
    PreApprovalDetailsRequest, PreApprovalRequest,
};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use models::{FeesPayer, Receiver, ReceiverList, MAX_RECEIVERS};
pub use settings::{Environment, Settings};
pub use transport::{HttpTransport, Transport};
pub use types::*;

/// Current version of the adaptive-payments library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
