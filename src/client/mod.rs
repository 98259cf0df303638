//! The remote backend, one method per endpoint.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{CreatedOrder, NewOrder, OrderDetail},
        payments::{DepositRequest, DepositResponse, PaymentRequest, PaymentResponse, VoucherBalance},
    },
    error::AppResult,
    models::Restaurant,
};

mod http;

pub use http::HttpFeastApi;

#[automock]
#[async_trait]
pub trait FeastApi: Send + Sync {
    /// `POST /accounts/login`. Unauthenticated.
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;

    /// `GET /restaurants`. Unauthenticated.
    async fn list_restaurants(&self) -> AppResult<Vec<Restaurant>>;

    /// `POST /orders`
    async fn create_order(&self, order: &NewOrder) -> AppResult<CreatedOrder>;

    /// `GET /orders/{id}`
    async fn get_order(&self, id: Uuid) -> AppResult<OrderDetail>;

    /// `POST /payments/create`
    async fn create_payment(&self, request: &PaymentRequest) -> AppResult<PaymentResponse>;

    /// `GET /payments/voucher/balance`
    async fn voucher_balance(&self) -> AppResult<VoucherBalance>;

    /// `POST /payments/deposit-voucher`
    async fn deposit_voucher(&self, request: &DepositRequest) -> AppResult<DepositResponse>;
}
