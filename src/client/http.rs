use std::{fmt, sync::Arc};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    auth::TokenStore,
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{CreatedOrder, NewOrder, OrderDetail},
        payments::{DepositRequest, DepositResponse, PaymentRequest, PaymentResponse, VoucherBalance},
    },
    error::{AppError, AppResult},
    models::Restaurant,
};

use super::FeastApi;

/// JSON-over-HTTP client for the backend. The bearer token is read from the
/// token store on every authenticated call.
#[derive(Clone)]
pub struct HttpFeastApi {
    base_url: String,
    http: Client,
    tokens: Arc<dyn TokenStore>,
}

impl HttpFeastApi {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let session = self.tokens.load().ok_or(AppError::Unauthenticated)?;
        Ok(request.header(header::AUTHORIZATION, session.bearer()))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            let message = rejection_message(status, body);
            tracing::debug!(status = %status, "backend rejected request");
            return Err(AppError::OrderSubmission {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// The raw body when there is one, otherwise the status line.
fn rejection_message(status: StatusCode, body: Option<String>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => status.to_string(),
    }
}

impl fmt::Debug for HttpFeastApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFeastApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FeastApi for HttpFeastApi {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let response = self
            .http
            .post(self.url("/accounts/login"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_restaurants(&self) -> AppResult<Vec<Restaurant>> {
        let response = self.http.get(self.url("/restaurants")).send().await?;
        Self::read_json(response).await
    }

    async fn create_order(&self, order: &NewOrder) -> AppResult<CreatedOrder> {
        let response = self
            .authorized(self.http.post(self.url("/orders")))?
            .json(order)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<OrderDetail> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/orders/{id}"))))?
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create_payment(&self, request: &PaymentRequest) -> AppResult<PaymentResponse> {
        let response = self
            .authorized(self.http.post(self.url("/payments/create")))?
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn voucher_balance(&self) -> AppResult<VoucherBalance> {
        let response = self
            .authorized(self.http.get(self.url("/payments/voucher/balance")))?
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn deposit_voucher(&self, request: &DepositRequest) -> AppResult<DepositResponse> {
        let response = self
            .authorized(self.http.post(self.url("/payments/deposit-voucher")))?
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
