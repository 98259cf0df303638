//! Stored-value voucher: balance lookup and top-up.

use crate::{
    dto::{format_amount, payments::DepositRequest},
    error::{AppError, AppResult},
    state::AppState,
};

/// A payment that continues on the provider's page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHandOff {
    pub url: String,
}

pub async fn voucher_balance(state: &AppState) -> AppResult<f64> {
    let balance = state.api.voucher_balance().await?;
    Ok(balance.balance)
}

/// Starts a top-up. Funds only arrive once the customer completes the
/// provider's page, so this never reports success on its own.
pub async fn deposit_to_voucher(state: &AppState, amount: f64) -> AppResult<PaymentHandOff> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::InvalidDepositAmount);
    }

    let _in_flight = state.deposit_guard.try_acquire()?;

    let request = DepositRequest {
        amount: format_amount(amount),
    };
    let response = state.api.deposit_voucher(&request).await?;

    let url = response
        .paynow_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::UnexpectedResponse("deposit response has no paynow_url".into()))?;

    tracing::info!(amount = %request.amount, "voucher deposit handed off");
    Ok(PaymentHandOff { url })
}
