use uuid::Uuid;

use crate::{
    dto::payments::{PaymentChannel, PaymentRequest, PaymentResponse},
    error::{AppError, AppResult},
    models::PaymentMethod,
    state::AppState,
};

const PAID_WITH_VOUCHER: &str = "paid_with_voucher";
const PAID_STATUSES: [&str; 2] = ["paid", "Payment Successful"];

/// Where the client goes after a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment completed without leaving the app.
    Paid { order_id: Uuid, with_voucher: bool },
    /// Continue in an embedded browser at `url`; completion is reported by
    /// the payment provider, not by this client.
    HandOff { order_id: Uuid, url: String },
    /// The backend answered with a status we do not recognise.
    Failed {
        order_id: Uuid,
        status: Option<String>,
    },
}

impl CheckoutOutcome {
    pub fn order_id(&self) -> Uuid {
        match self {
            CheckoutOutcome::Paid { order_id, .. }
            | CheckoutOutcome::HandOff { order_id, .. }
            | CheckoutOutcome::Failed { order_id, .. } => *order_id,
        }
    }

    /// Paid or handed off to the payment page.
    pub fn is_placed(&self) -> bool {
        !matches!(self, CheckoutOutcome::Failed { .. })
    }

    pub fn message(&self) -> String {
        match self {
            CheckoutOutcome::Paid {
                with_voucher: true, ..
            } => "Paid with Voucher".to_string(),
            CheckoutOutcome::Paid { .. } => "Payment Successful".to_string(),
            CheckoutOutcome::HandOff { .. } => "Redirecting to PayNow...".to_string(),
            CheckoutOutcome::Failed {
                status: Some(status),
                ..
            } => format!("Payment Failed: {status}"),
            CheckoutOutcome::Failed { status: None, .. } => "Payment Failed".to_string(),
        }
    }
}

/// Canonical international form of a mobile number.
///
/// Non-digits are stripped first, so `+263 77 123 4567` and `263771234567`
/// end up identical.
pub fn normalize_phone(phone: &str, country_code: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if let Some(national) = digits.strip_prefix('0') {
        format!("+{country_code}{national}")
    } else if digits.starts_with(country_code) {
        format!("+{digits}")
    } else {
        format!("+{country_code}{digits}")
    }
}

pub fn validate_payment_method(method: &PaymentMethod) -> AppResult<()> {
    if let PaymentMethod::Mobile { phone, provider } = method {
        let has_digits = phone.chars().any(|c| c.is_ascii_digit());
        if !has_digits || provider.is_none() {
            return Err(AppError::MissingMobileDetails);
        }
    }
    Ok(())
}

pub fn build_payment_request(
    order_id: Uuid,
    method: &PaymentMethod,
    country_code: &str,
) -> AppResult<PaymentRequest> {
    validate_payment_method(method)?;

    let request = match method {
        PaymentMethod::Web => PaymentRequest {
            order_id,
            method: PaymentChannel::Paynow,
            phone: None,
            provider: None,
        },
        PaymentMethod::Mobile { phone, provider } => PaymentRequest {
            order_id,
            method: PaymentChannel::Paynow,
            phone: Some(normalize_phone(phone, country_code)),
            provider: *provider,
        },
        PaymentMethod::Voucher => PaymentRequest {
            order_id,
            method: PaymentChannel::Voucher,
            phone: None,
            provider: None,
        },
    };
    Ok(request)
}

/// First match wins: voucher confirmation, then a redirect URL, then a plain
/// paid status.
pub fn interpret_payment(order_id: Uuid, response: PaymentResponse) -> CheckoutOutcome {
    let PaymentResponse { status, paynow_url } = response;

    if status.as_deref() == Some(PAID_WITH_VOUCHER) {
        return CheckoutOutcome::Paid {
            order_id,
            with_voucher: true,
        };
    }

    if let Some(url) = paynow_url.filter(|u| !u.is_empty()) {
        return CheckoutOutcome::HandOff { order_id, url };
    }

    match status {
        Some(s) if PAID_STATUSES.contains(&s.as_str()) => CheckoutOutcome::Paid {
            order_id,
            with_voucher: false,
        },
        status => CheckoutOutcome::Failed { order_id, status },
    }
}

/// Pays an order that already exists on the backend.
pub async fn pay_order(
    state: &AppState,
    order_id: Uuid,
    method: &PaymentMethod,
) -> AppResult<CheckoutOutcome> {
    validate_payment_method(method)?;
    let _in_flight = state.checkout_guard.try_acquire()?;
    dispatch_payment(state, order_id, method).await
}

/// Sends the payment request without taking the submission guard; callers
/// must already hold it.
pub(crate) async fn dispatch_payment(
    state: &AppState,
    order_id: Uuid,
    method: &PaymentMethod,
) -> AppResult<CheckoutOutcome> {
    let request = build_payment_request(order_id, method, &state.config.country_code)?;
    let response = state.api.create_payment(&request).await?;
    let outcome = interpret_payment(order_id, response);

    // Any answer may have moved the order on from `pending`.
    state.orders.invalidate(order_id).await;

    match &outcome {
        CheckoutOutcome::Paid {
            with_voucher: true, ..
        } => tracing::info!(order_id = %order_id, "order paid with voucher"),
        CheckoutOutcome::Paid { .. } => tracing::info!(order_id = %order_id, "order paid"),
        CheckoutOutcome::HandOff { url, .. } => {
            tracing::info!(order_id = %order_id, url = %url, "handing off to payment page")
        }
        CheckoutOutcome::Failed { status, .. } => {
            tracing::warn!(order_id = %order_id, status = ?status, "payment not completed")
        }
    }

    Ok(outcome)
}
