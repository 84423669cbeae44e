//! Time zone and decimal helpers

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::Number;
use std::str::FromStr;

/// Zone used when callers have no preference
pub const DEFAULT_TIME_ZONE: &str = "Asia/Taipei";

/// Current time in the named IANA zone
pub fn current_local_time(zone: &str) -> Result<DateTime<Tz>> {
    local_time_at(Utc::now(), zone)
}

/// Convert a UTC instant into the named IANA zone
pub fn local_time_at(instant: DateTime<Utc>, zone: &str) -> Result<DateTime<Tz>> {
    let tz = Tz::from_str(zone).map_err(|_| Error::UnknownTimeZone {
        zone: zone.to_string(),
    })?;

    Ok(instant.with_timezone(&tz))
}

/// Coerce an exact decimal into a JSON number without going through `f64`
pub fn decimal_default(value: &Decimal) -> Result<Number> {
    Number::from_str(&value.to_string())
        .map_err(|e| Error::serialization(format!("{} is not a JSON number: {}", value, e)))
}

/// Serde adapters writing decimals as bare JSON numbers
pub mod decimal_number {
    use rust_decimal::Decimal;
    use serde::{Serialize, Serializer};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::decimal_default(value)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::Serializer;

        pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
