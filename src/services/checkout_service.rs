use crate::{
    auth::ensure_customer,
    dto::{
        format_amount,
        orders::{NewOrder, OrderLine},
    },
    error::{AppError, AppResult},
    models::{FulfilmentMethod, Location, PaymentMethod},
    services::{
        auth_service,
        cart_service::{Cart, CartQuote},
        payment_service::{self, CheckoutOutcome},
    },
    state::AppState,
};

const CURRENT_LOCATION_ADDRESS: &str = "Current Location";

/// Everything the customer chose on the checkout screen besides the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub fulfilment: FulfilmentMethod,
    /// Device position or the picked delivery address, whichever is known.
    pub location: Option<Location>,
    pub delivery_address: Option<String>,
    pub payment: PaymentMethod,
    pub tip: f64,
}

impl CheckoutRequest {
    pub fn delivery(location: Option<Location>, payment: PaymentMethod) -> Self {
        Self {
            fulfilment: FulfilmentMethod::Delivery,
            location,
            delivery_address: None,
            payment,
            tip: 0.0,
        }
    }

    pub fn collection(payment: PaymentMethod) -> Self {
        Self {
            fulfilment: FulfilmentMethod::Collection,
            location: None,
            delivery_address: None,
            payment,
            tip: 0.0,
        }
    }
}

/// Local checks, in the order the customer should see them. Returns the
/// restaurant the order goes to.
pub fn validate_checkout<'a>(cart: &'a Cart, request: &CheckoutRequest) -> AppResult<&'a str> {
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let restaurant_id = cart
        .validate_single_restaurant()?
        .ok_or(AppError::NoRestaurant)?;

    if request.fulfilment == FulfilmentMethod::Delivery && request.location.is_none() {
        return Err(AppError::MissingLocation);
    }

    payment_service::validate_payment_method(&request.payment)?;

    Ok(restaurant_id)
}

pub fn build_order(
    cart: &Cart,
    restaurant_id: &str,
    request: &CheckoutRequest,
    quote: &CartQuote,
) -> NewOrder {
    let delivering = request.fulfilment == FulfilmentMethod::Delivery;
    let tip = if request.tip.is_finite() {
        request.tip.max(0.0)
    } else {
        0.0
    };

    NewOrder {
        restaurant_id: restaurant_id.to_string(),
        items: cart.items_for(restaurant_id).map(OrderLine::from).collect(),
        subtotal: format_amount(quote.subtotal),
        delivery_coordinates: request.location.filter(|_| delivering),
        delivery_address: delivering.then(|| {
            request
                .delivery_address
                .clone()
                .unwrap_or_else(|| CURRENT_LOCATION_ADDRESS.to_string())
        }),
        currency: quote.currency.clone(),
        method: request.fulfilment,
        tip: format_amount(tip),
        delivery_fee: format_amount(quote.delivery_fee),
        total_fee: format_amount(quote.total + tip),
        status: "pending".to_string(),
    }
}

/// Creates the order and starts payment for it.
///
/// The cart is emptied once the order is paid or handed off to the payment
/// page. If payment initiation fails the order stays pending on the backend
/// and the cart is left untouched.
pub async fn submit_checkout(
    state: &AppState,
    cart: &mut Cart,
    request: CheckoutRequest,
) -> AppResult<CheckoutOutcome> {
    let restaurant_id = validate_checkout(cart, &request)?.to_string();
    let session = auth_service::current_session(state)?;
    ensure_customer(&session)?;

    let _in_flight = state.checkout_guard.try_acquire()?;

    let restaurants = match state.api.list_restaurants().await {
        Ok(restaurants) => restaurants,
        Err(err) => {
            tracing::warn!(error = %err, "restaurant lookup failed, using default delivery fee");
            Vec::new()
        }
    };

    let quote = cart.quote_for(&restaurant_id, &restaurants, request.location);
    let order = build_order(cart, &restaurant_id, &request, &quote);

    let created = state.api.create_order(&order).await?;
    let order_id = created
        .id()
        .ok_or_else(|| AppError::UnexpectedResponse("order response has no id".into()))?;
    tracing::info!(
        order_id = %order_id,
        restaurant_id = %restaurant_id,
        total = %order.total_fee,
        "order created"
    );

    let outcome = match payment_service::dispatch_payment(state, order_id, &request.payment).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(order_id = %order_id, error = %err, "payment initiation failed, order left pending");
            return Err(err);
        }
    };

    if outcome.is_placed() {
        cart.clear();
    }

    Ok(outcome)
}
