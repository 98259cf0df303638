//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod orders;
pub mod payments;

/// Amounts are sent as fixed two-decimal strings.
pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_amount<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount {s:?}"))),
        }
    }
}

// The backend serialises decimals either as JSON numbers or as strings.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_amount()
}

pub(crate) fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_amount)
        .transpose()
}
