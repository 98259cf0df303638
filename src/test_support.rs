//! Shared fixtures for unit tests.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    auth::{MemoryTokenStore, Role, Session},
    client::MockFeastApi,
    config::ClientConfig,
    dto::orders::{OrderDetail, OrderDetailItem},
    state::AppState,
};

pub(crate) fn state_with(api: MockFeastApi) -> AppState {
    let tokens = Arc::new(MemoryTokenStore::with_session(Session::new(
        "test-token",
        Role::Customer,
    )));
    AppState::new(ClientConfig::default(), Arc::new(api), tokens)
}

pub(crate) fn anonymous_state_with(api: MockFeastApi) -> AppState {
    AppState::new(
        ClientConfig::default(),
        Arc::new(api),
        Arc::new(MemoryTokenStore::new()),
    )
}

pub(crate) fn order_detail(id: Uuid, status: &str) -> OrderDetail {
    OrderDetail {
        id,
        items: vec![OrderDetailItem {
            name: "Sadza with Beef Stew".into(),
            quantity: 2,
            price: 4.5,
        }],
        total_fee: 10.5,
        delivery_fee: 1.5,
        tip: None,
        status: status.to_string(),
        restaurant_names: vec!["Mama's Kitchen".into()],
        created_at: None,
    }
}
