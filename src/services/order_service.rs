use uuid::Uuid;

use crate::{dto::orders::OrderDetail, error::AppResult, state::AppState};

/// Returns the order, served from the session cache when possible.
pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<OrderDetail> {
    if let Some(cached) = state.orders.get(id).await {
        return Ok(cached);
    }

    let detail = state.api.get_order(id).await?;
    tracing::debug!(order_id = %id, status = %detail.status, "order fetched");
    state.orders.insert(detail.clone()).await;
    Ok(detail)
}

pub async fn refresh_order(state: &AppState, id: Uuid) -> AppResult<OrderDetail> {
    state.orders.invalidate(id).await;
    get_order(state, id).await
}

/// Customer-facing label for an order status. Unknown statuses are shown
/// as they are.
pub fn status_label(status: &str) -> &str {
    match status {
        "pending" => "Awaiting Payment",
        "paid" => "Paid",
        "confirmed" => "Order Confirmed",
        "preparing" => "Restaurant Preparing",
        "out_for_delivery" => "Out for Delivery",
        "delivered" => "Delivered",
        other => other,
    }
}
