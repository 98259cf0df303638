use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            restaurant_id: None,
            restaurant_name: None,
        }
    }

    pub fn from_restaurant(mut self, restaurant: &Restaurant) -> Self {
        self.restaurant_id = Some(restaurant.id.clone());
        self.restaurant_name = Some(restaurant.name.clone());
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<Location>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub estimated_delivery_time: Option<u32>,
}

impl Restaurant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: None,
            cuisine_type: None,
            description: None,
            rating: None,
            estimated_delivery_time: None,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Location::new(lat, lng));
        self
    }
}

/// Currency code attached to a cart. Used as a display label only; no
/// conversion is ever applied to amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> &'static str {
        if self.0 == "USD" { "$" } else { "Z$" }
    }

    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfilmentMethod {
    Delivery,
    #[default]
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileProvider {
    EcoCash,
    OneMoney,
    TeleCash,
}

impl MobileProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobileProvider::EcoCash => "ecocash",
            MobileProvider::OneMoney => "onemoney",
            MobileProvider::TeleCash => "telecash",
        }
    }
}

impl FromStr for MobileProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecocash" => Ok(MobileProvider::EcoCash),
            "onemoney" => Ok(MobileProvider::OneMoney),
            "telecash" => Ok(MobileProvider::TeleCash),
            other => Err(format!("unknown mobile provider: {other}")),
        }
    }
}

/// How the customer chose to pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// PayNow web checkout, completed in an embedded browser.
    Web,
    /// PayNow mobile money. Both fields are checked before dispatch.
    Mobile {
        phone: String,
        provider: Option<MobileProvider>,
    },
    /// Spend from the stored voucher balance.
    Voucher,
}

impl PaymentMethod {
    pub fn mobile(phone: impl Into<String>, provider: MobileProvider) -> Self {
        PaymentMethod::Mobile {
            phone: phone.into(),
            provider: Some(provider),
        }
    }
}
