use crate::{
    error::{AppError, AppResult},
    models::{CartItem, Currency, Location, Restaurant},
    services::fee_service,
};

/// Items the customer intends to order, in the order they were added.
///
/// Every mutation goes through the methods below so that ids stay unique and
/// quantities stay positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

/// Price breakdown shown before checkout. `total` is derived, never stored
/// independently of its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct CartQuote {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub currency: Currency,
}

impl CartQuote {
    pub fn new(subtotal: f64, delivery_fee: f64, currency: Currency) -> Self {
        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            currency,
        }
    }
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Builds a cart from saved lines. Duplicate ids are merged and
    /// zero-quantity lines dropped.
    pub fn from_items(currency: Currency, items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new(currency);
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds one unit of `item`. Returns the resulting quantity.
    pub fn add_item(&mut self, item: CartItem) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            tracing::debug!(item_id = %existing.id, quantity = existing.quantity, "cart quantity bumped");
            return existing.quantity;
        }

        tracing::debug!(item_id = %item.id, "cart item added");
        self.items.push(CartItem { quantity: 1, ..item });
        1
    }

    /// Sets the quantity of `id`; zero or less removes the line. Returns
    /// `false` if no such item exists.
    pub fn update_quantity(&mut self, id: &str, new_quantity: i64) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };

        if new_quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Distinct, non-empty restaurant ids in first-seen order.
    pub fn restaurant_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self
            .items
            .iter()
            .filter_map(|i| i.restaurant_id.as_deref())
            .filter(|id| !id.is_empty())
        {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Returns the single restaurant the cart belongs to, `None` when no item
    /// names one.
    pub fn validate_single_restaurant(&self) -> AppResult<Option<&str>> {
        match self.restaurant_ids().as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            ids => Err(AppError::MultiRestaurant(
                ids.iter().map(|id| id.to_string()).collect(),
            )),
        }
    }

    pub fn items_for<'a>(&'a self, restaurant_id: &'a str) -> impl Iterator<Item = &'a CartItem> {
        self.items
            .iter()
            .filter(move |i| i.restaurant_id.as_deref() == Some(restaurant_id))
    }

    pub fn quote(&self, restaurants: &[Restaurant], location: Option<Location>) -> CartQuote {
        let delivery_fee =
            fee_service::aggregate_delivery_fee(location, restaurants, self.restaurant_ids());
        CartQuote::new(self.subtotal(), delivery_fee, self.currency.clone())
    }

    /// Quote for the lines of one restaurant only. Items with no restaurant
    /// are left out.
    pub fn quote_for(
        &self,
        restaurant_id: &str,
        restaurants: &[Restaurant],
        location: Option<Location>,
    ) -> CartQuote {
        let subtotal = self.items_for(restaurant_id).map(CartItem::line_total).sum();
        let delivery_fee =
            fee_service::aggregate_delivery_fee(location, restaurants, [restaurant_id]);
        CartQuote::new(subtotal, delivery_fee, self.currency.clone())
    }
}
