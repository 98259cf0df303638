use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MobileProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentChannel {
    Paynow,
    Voucher,
}

/// Body of `POST /payments/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub method: PaymentChannel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<MobileProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paynow_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoucherBalance {
    #[serde(deserialize_with = "super::amount")]
    pub balance: f64,
}

/// Body of `POST /payments/deposit-voucher`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositRequest {
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DepositResponse {
    #[serde(default)]
    pub paynow_url: Option<String>,
}
