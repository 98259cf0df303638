use crate::{
    error::AppResult,
    models::{Location, Restaurant},
    services::fee_service,
    state::AppState,
};

/// A restaurant together with the delivery fee shown on its card.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantListing {
    pub restaurant: Restaurant,
    pub delivery_fee: f64,
}

/// An empty or missing cuisine selects everything.
pub fn filter_by_cuisine(restaurants: Vec<Restaurant>, cuisine: Option<&str>) -> Vec<Restaurant> {
    match cuisine.map(str::trim).filter(|c| !c.is_empty()) {
        Some(cuisine) => restaurants
            .into_iter()
            .filter(|r| {
                r.cuisine_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(cuisine))
            })
            .collect(),
        None => restaurants,
    }
}

pub async fn list_restaurants(
    state: &AppState,
    cuisine: Option<&str>,
    location: Option<Location>,
) -> AppResult<Vec<RestaurantListing>> {
    let restaurants = state.api.list_restaurants().await?;
    let listings: Vec<RestaurantListing> = filter_by_cuisine(restaurants, cuisine)
        .into_iter()
        .map(|restaurant| RestaurantListing {
            delivery_fee: fee_service::fee_for_restaurant(location, &restaurant),
            restaurant,
        })
        .collect();

    tracing::debug!(count = listings.len(), "restaurants listed");
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client::MockFeastApi, test_support::state_with};

    fn with_cuisine(id: &str, cuisine: &str) -> Restaurant {
        Restaurant {
            cuisine_type: Some(cuisine.to_string()),
            ..Restaurant::new(id, id)
        }
    }

    #[test]
    fn cuisine_filter_matches_case_insensitively() {
        let all = vec![
            with_cuisine("a", "traditional"),
            with_cuisine("b", "Indian"),
            Restaurant::new("c", "Unlabelled"),
        ];

        let indian = filter_by_cuisine(all.clone(), Some("indian"));
        assert_eq!(indian.len(), 1);
        assert_eq!(indian[0].id, "b");

        assert_eq!(filter_by_cuisine(all.clone(), Some("")).len(), 3);
        assert_eq!(filter_by_cuisine(all, None).len(), 3);
    }

    #[tokio::test]
    async fn listings_carry_per_restaurant_fee() {
        let mut api = MockFeastApi::new();
        api.expect_list_restaurants().returning(|| {
            Ok(vec![
                Restaurant::new("near", "Near").at(0.0, 0.5),
                Restaurant::new("far", "Far").at(0.0, 2.0),
                Restaurant::new("unpinned", "Unpinned"),
            ])
        });
        let state = state_with(api);

        let listings = list_restaurants(&state, None, Some(Location::new(0.0, 0.0)))
            .await
            .unwrap();
        let fees: Vec<f64> = listings.iter().map(|l| l.delivery_fee).collect();

        assert_eq!(fees, vec![1.5, 4.0, 1.5]);
    }
}
