use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{MemoryTokenStore, Role, Session, TokenStore},
    client::{FeastApi, HttpFeastApi},
    config::ClientConfig,
    dto::orders::OrderDetail,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub api: Arc<dyn FeastApi>,
    pub tokens: Arc<dyn TokenStore>,
    pub orders: OrderCache,
    pub checkout_guard: SubmissionGuard,
    pub deposit_guard: SubmissionGuard,
}

impl AppState {
    pub fn new(config: ClientConfig, api: Arc<dyn FeastApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            api,
            tokens,
            orders: OrderCache::default(),
            checkout_guard: SubmissionGuard::default(),
            deposit_guard: SubmissionGuard::default(),
        }
    }

    /// Wires the HTTP client to an in-memory token store, seeded from
    /// `FEAST_TOKEN` when present. A pre-issued token is assumed to belong to
    /// a customer.
    pub fn from_config(config: ClientConfig) -> Self {
        let tokens: Arc<dyn TokenStore> = match &config.token {
            Some(token) => Arc::new(MemoryTokenStore::with_session(Session::new(
                token.clone(),
                Role::Customer,
            ))),
            None => Arc::new(MemoryTokenStore::new()),
        };
        let api = Arc::new(HttpFeastApi::new(config.api_url.clone(), tokens.clone()));
        Self::new(config, api, tokens)
    }
}

/// Order details fetched during this session, keyed by order id.
#[derive(Debug, Clone, Default)]
pub struct OrderCache {
    inner: Arc<RwLock<HashMap<Uuid, OrderDetail>>>,
}

impl OrderCache {
    pub async fn get(&self, id: Uuid) -> Option<OrderDetail> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn insert(&self, detail: OrderDetail) {
        self.inner.write().await.insert(detail.id, detail);
    }

    pub async fn invalidate(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

/// Allows one submission at a time for a given action. The UI reads
/// [`SubmissionGuard::is_in_flight`] to disable the control.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn try_acquire(&self) -> AppResult<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::SubmissionInFlight)?;
        Ok(InFlight {
            flag: self.in_flight.clone(),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of a submission; releases the guard on drop.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
