//! In-process stand-in for the backend, bound to an ephemeral port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use uuid::Uuid;

use feast_client::{
    auth::{MemoryTokenStore, TokenStore},
    client::HttpFeastApi,
    config::ClientConfig,
    models::Currency,
    state::AppState,
};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "customer@example.com";
pub const PASSWORD: &str = "secret";

type Reply = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct Backend {
    pub order_id: Uuid,
    pub orders: Arc<Mutex<Vec<Value>>>,
    pub payments: Arc<Mutex<Vec<Value>>>,
    pub deposits: Arc<Mutex<Vec<Value>>>,
    pub payment_reply: Arc<Mutex<Option<Reply>>>,
}

impl Backend {
    fn new() -> Self {
        Self {
            order_id: Uuid::new_v4(),
            orders: Arc::default(),
            payments: Arc::default(),
            deposits: Arc::default(),
            payment_reply: Arc::default(),
        }
    }

    pub fn reply_to_payments_with(&self, status: StatusCode, body: Value) {
        *self.payment_reply.lock().unwrap() = Some((status, Json(body)));
    }

    pub fn recorded_orders(&self) -> Vec<Value> {
        self.orders.lock().unwrap().clone()
    }

    pub fn recorded_payments(&self) -> Vec<Value> {
        self.payments.lock().unwrap().clone()
    }

    pub fn recorded_deposits(&self) -> Vec<Value> {
        self.deposits.lock().unwrap().clone()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub backend: Backend,
}

pub async fn spawn_app() -> TestApp {
    let backend = Backend::new();
    let app = Router::new()
        .route("/api/accounts/login", post(login))
        .route("/api/restaurants", get(restaurants))
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/payments/create", post(create_payment))
        .route("/api/payments/voucher/balance", get(voucher_balance))
        .route("/api/payments/deposit-voucher", post(deposit_voucher))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = format!("http://{addr}/api");
    let config = ClientConfig::new(base_url.clone(), "263", Currency::default(), None).unwrap();
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let api = Arc::new(HttpFeastApi::new(base_url, tokens.clone()));

    TestApp {
        state: AppState::new(config, api, tokens),
        backend,
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Authentication credentials were not provided." })),
    )
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "accessToken": TOKEN, "refreshToken": "refresh", "role": "customer" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )
    }
}

async fn restaurants() -> Json<Value> {
    Json(json!([
        {
            "id": "r1",
            "name": "Mama's Kitchen",
            "cuisineType": "traditional",
            "coordinates": { "lat": -17.8292, "lng": 31.0522 }
        },
        {
            "id": "r2",
            "name": "Pizza Inn",
            "cuisineType": "pizza",
            "coordinates": { "lat": -17.8292, "lng": 33.0522 }
        },
        { "id": "r3", "name": "Roadside Grill", "cuisineType": "fast_food" }
    ]))
}

async fn create_order(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.orders.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({ "id": backend.order_id, "status": "pending" })),
    )
}

async fn get_order(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id != backend.order_id {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": id,
            "items": [{ "name": "Sadza with Beef Stew", "quantity": 2, "price": "4.50" }],
            "total_fee": "10.50",
            "delivery_fee": 1.5,
            "status": "pending",
            "restaurant_names": ["Mama's Kitchen"]
        })),
    )
}

async fn create_payment(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let method = body["method"].as_str().unwrap_or_default().to_string();
    backend.payments.lock().unwrap().push(body);

    if let Some(reply) = backend.payment_reply.lock().unwrap().clone() {
        return reply;
    }
    if method == "voucher" {
        return (StatusCode::OK, Json(json!({ "status": "paid_with_voucher" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "Ok",
            "paynow_url": format!("https://pay.example/{}", backend.order_id)
        })),
    )
}

async fn voucher_balance(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "balance": "12.50" })))
}

async fn deposit_voucher(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.deposits.lock().unwrap().push(body);
    (
        StatusCode::OK,
        Json(json!({ "paynow_url": "https://pay.example/topup" })),
    )
}
