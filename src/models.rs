//! Payment recipient value objects

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Largest receiver list PayPal accepts for a single payment
pub const MAX_RECEIVERS: usize = 6;

/// Who pays the PayPal fees of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeesPayer {
    Sender,
    PrimaryReceiver,
    #[default]
    EachReceiver,
    SecondaryOnly,
}

/// A recipient of funds in a payment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Receiver {
    email: String,
    amount: Decimal,
    primary: Option<bool>,
}

impl Receiver {
    pub fn new(email: impl Into<String>, amount: Decimal) -> Self {
        Self {
            email: email.into(),
            amount,
            primary: None,
        }
    }

    /// Mark the receiver as primary (or explicitly secondary) in a chained payment
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn primary(&self) -> Option<bool> {
        self.primary
    }

    /// Wire form: every value is a string, `primary` only when set
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("email".to_string(), self.email.clone());
        map.insert("amount".to_string(), self.amount.to_string());

        if let Some(primary) = self.primary {
            map.insert("primary".to_string(), primary.to_string());
        }

        map
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

impl Serialize for Receiver {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}

/// Build a receiver from loosely typed input such as a parsed config file.
///
/// `amount` must be an exact decimal: a string like `"22.20"` or an integer.
/// Floating point JSON numbers are rejected. `primary` must be a JSON bool.
impl TryFrom<&Value> for Receiver {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let email = value
            .get("email")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_receiver("email is required"))?;

        let amount = match value.get("amount") {
            Some(Value::String(amount)) => Decimal::from_str(amount).map_err(|_| {
                Error::invalid_receiver(format!("amount '{}' is not a valid decimal", amount))
            })?,
            Some(Value::Number(number)) if number.is_i64() || number.is_u64() => {
                Decimal::from_str(&number.to_string())
                    .map_err(|_| Error::invalid_receiver("amount is out of range"))?
            }
            Some(_) => return Err(Error::invalid_receiver("amount needs to be an exact decimal")),
            None => return Err(Error::invalid_receiver("amount is required")),
        };

        let primary = match value.get("primary") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(primary)) => Some(*primary),
            Some(_) => {
                return Err(Error::invalid_receiver(
                    "primary argument needs to be Boolean type",
                ))
            }
        };

        Ok(Self {
            email: email.to_string(),
            amount,
            primary,
        })
    }
}

impl TryFrom<Value> for Receiver {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Receiver::try_from(&value)
    }
}

/// Ordered list of at most [`MAX_RECEIVERS`] receivers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Receiver>")]
pub struct ReceiverList {
    receivers: Vec<Receiver>,
}

impl ReceiverList {
    pub fn new(receivers: Vec<Receiver>) -> Result<Self> {
        if receivers.len() > MAX_RECEIVERS {
            return Err(Error::MaxReceiversExceeded {
                max: MAX_RECEIVERS,
                got: receivers.len(),
            });
        }

        Ok(Self { receivers })
    }

    /// Append a receiver; the list is left untouched when it is already full
    pub fn push(&mut self, receiver: Receiver) -> Result<()> {
        if self.receivers.len() >= MAX_RECEIVERS {
            return Err(Error::MaxReceiversExceeded {
                max: MAX_RECEIVERS,
                got: self.receivers.len() + 1,
            });
        }

        self.receivers.push(receiver);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Receiver> {
        self.receivers.iter()
    }

    /// Wire form of every receiver, in insertion order
    pub fn to_json(&self) -> Vec<BTreeMap<String, String>> {
        self.receivers.iter().map(Receiver::to_map).collect()
    }
}

impl TryFrom<Vec<Receiver>> for ReceiverList {
    type Error = Error;

    fn try_from(receivers: Vec<Receiver>) -> Result<Self> {
        ReceiverList::new(receivers)
    }
}

impl Serialize for ReceiverList {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.receivers.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ReceiverList {
    type Item = &'a Receiver;
    type IntoIter = std::slice::Iter<'a, Receiver>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
