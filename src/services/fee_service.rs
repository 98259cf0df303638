//! Delivery fee estimation.
//!
//! Distance is measured in raw latitude/longitude degrees on a plane, not
//! along the earth's surface. Every fee the backend and the receipts have
//! ever shown was computed this way, so the formula must stay as is.

use crate::models::{Location, Restaurant};

/// Minimum fee charged for any order.
pub const DEFAULT_DELIVERY_FEE: f64 = 1.5;

/// Fee per degree of planar distance.
pub const SCALE_FACTOR: f64 = 2.0;

pub fn estimate_delivery_fee(user_lat: f64, user_lng: f64, rest_lat: f64, rest_lng: f64) -> f64 {
    let distance = ((user_lat - rest_lat).powi(2) + (user_lng - rest_lng).powi(2)).sqrt();
    // f64::max ignores NaN, so the floor also holds for non-finite input.
    DEFAULT_DELIVERY_FEE.max(distance * SCALE_FACTOR)
}

/// Fee for a single restaurant, or the floor when either side has no usable
/// coordinates.
pub fn fee_for_restaurant(user: Option<Location>, restaurant: &Restaurant) -> f64 {
    match (user, restaurant.coordinates) {
        (Some(user), Some(rest)) if user.is_finite() && rest.is_finite() => {
            estimate_delivery_fee(user.lat, user.lng, rest.lat, rest.lng)
        }
        _ => DEFAULT_DELIVERY_FEE,
    }
}

/// Fee for a cart spanning `restaurant_ids`: the largest per-restaurant fee,
/// never a sum. Unknown restaurants contribute the floor.
pub fn aggregate_delivery_fee<'a, I>(
    user: Option<Location>,
    restaurants: &[Restaurant],
    restaurant_ids: I,
) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    if user.is_none() || restaurants.is_empty() {
        return DEFAULT_DELIVERY_FEE;
    }

    restaurant_ids
        .into_iter()
        .filter_map(|id| restaurants.iter().find(|r| r.id == id))
        .map(|r| fee_for_restaurant(user, r))
        .fold(DEFAULT_DELIVERY_FEE, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_coordinates_charge_the_floor() {
        assert_eq!(estimate_delivery_fee(0.0, 0.0, 0.0, 0.0), 1.5);
        assert_eq!(
            estimate_delivery_fee(-17.8292, 31.0522, -17.8292, 31.0522),
            DEFAULT_DELIVERY_FEE
        );
    }

    #[test]
    fn one_degree_costs_two() {
        assert_eq!(estimate_delivery_fee(0.0, 0.0, 1.0, 0.0), 2.0);
        assert_eq!(estimate_delivery_fee(0.0, 0.0, 3.0, 4.0), 10.0);
    }

    #[test]
    fn fee_never_drops_below_floor() {
        let samples = [
            (0.1, 0.1, 0.2, 0.2),
            (-90.0, -180.0, 90.0, 180.0),
            (f64::NAN, 0.0, 0.0, 0.0),
            (-17.83, 31.05, -17.80, 31.02),
        ];
        for (a, b, c, d) in samples {
            assert!(estimate_delivery_fee(a, b, c, d) >= DEFAULT_DELIVERY_FEE);
        }
    }

    #[test]
    fn missing_coordinates_fall_back_to_floor() {
        let user = Some(Location::new(10.0, 10.0));
        let without = Restaurant::new("r1", "No Pin");
        let with = Restaurant::new("r2", "Far Away").at(0.0, 0.0);

        assert_eq!(fee_for_restaurant(user, &without), DEFAULT_DELIVERY_FEE);
        assert_eq!(fee_for_restaurant(None, &with), DEFAULT_DELIVERY_FEE);
        assert!(fee_for_restaurant(user, &with) > DEFAULT_DELIVERY_FEE);
    }

    #[test]
    fn non_finite_coordinates_count_as_missing() {
        let user = Some(Location::new(0.0, 0.0));
        let nan = Restaurant::new("nan", "NaN").at(f64::NAN, 3.0);
        let inf = Restaurant::new("inf", "Inf").at(0.0, f64::INFINITY);
        let pinned = Restaurant::new("ok", "Pinned").at(0.0, 3.0);

        assert_eq!(fee_for_restaurant(user, &nan), DEFAULT_DELIVERY_FEE);
        assert_eq!(fee_for_restaurant(user, &inf), DEFAULT_DELIVERY_FEE);
        assert_eq!(
            fee_for_restaurant(Some(Location::new(f64::NEG_INFINITY, 0.0)), &pinned),
            DEFAULT_DELIVERY_FEE
        );
        assert_eq!(fee_for_restaurant(user, &pinned), 6.0);
    }

    #[test]
    fn aggregate_takes_the_maximum() {
        let restaurants = vec![
            Restaurant::new("near", "Near").at(0.0, 1.0),
            Restaurant::new("far", "Far").at(0.0, 3.0),
        ];
        let user = Some(Location::new(0.0, 0.0));

        let fee = aggregate_delivery_fee(user, &restaurants, ["near", "far"]);
        assert_eq!(fee, 6.0);

        assert_eq!(aggregate_delivery_fee(None, &restaurants, ["far"]), 1.5);
        assert_eq!(aggregate_delivery_fee(user, &[], ["far"]), 1.5);
        assert_eq!(aggregate_delivery_fee(user, &restaurants, ["unknown"]), 1.5);
    }
}
