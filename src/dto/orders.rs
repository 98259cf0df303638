use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CartItem, Currency, FulfilmentMethod, Location};

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub restaurant_id: String,
    pub items: Vec<OrderLine>,
    pub subtotal: String,
    pub delivery_coordinates: Option<Location>,
    pub delivery_address: Option<String>,
    pub currency: Currency,
    pub method: FulfilmentMethod,
    pub tip: String,
    pub delivery_fee: String,
    pub total_fee: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OrderRef {
    id: Uuid,
}

/// Response of `POST /orders`. Some backends nest the record under `order`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedOrder {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    order: Option<OrderRef>,
}

impl CreatedOrder {
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            order: None,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id.or_else(|| self.order.as_ref().map(|o| o.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailItem {
    pub name: String,
    pub quantity: u32,
    #[serde(deserialize_with = "super::amount")]
    pub price: f64,
}

/// Response of `GET /orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: Uuid,
    #[serde(default)]
    pub items: Vec<OrderDetailItem>,
    #[serde(deserialize_with = "super::amount")]
    pub total_fee: f64,
    #[serde(deserialize_with = "super::amount")]
    pub delivery_fee: f64,
    #[serde(default, deserialize_with = "super::optional_amount")]
    pub tip: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub restaurant_names: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderDetail {
    /// Last eight characters of the id, as shown on receipts.
    pub fn short_id(&self) -> String {
        let id = self.id.simple().to_string();
        id[id.len() - 8..].to_string()
    }
}
