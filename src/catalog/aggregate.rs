use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::normalize::normalize_boat_name;
use crate::types::{Cabin, Facilities};

/// Cabin-derived statistics for one normalized boat name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatCabinStats {
    pub cabin_count: usize,
    /// Lowest listed price, 0 when no cabin carries a real price
    pub lowest_price: i64,
    pub highest_price: i64,
    pub total_capacity: u32,
    pub facilities: Facilities,
    /// Contributing cabins in input order
    pub cabins: Vec<Cabin>,
}

/// A price counts toward the range only when it is positive and not the placeholder
pub fn is_listed_price(price: i64, placeholder_price: i64) -> bool {
    price > 0 && price != placeholder_price
}

impl BoatCabinStats {
    fn seed(cabin: &Cabin, placeholder_price: i64) -> Self {
        let price = if is_listed_price(cabin.price, placeholder_price) {
            cabin.price
        } else {
            0
        };
        Self {
            cabin_count: 1,
            lowest_price: price,
            highest_price: price,
            total_capacity: cabin.total_capacity,
            facilities: cabin.facilities,
            cabins: vec![cabin.clone()],
        }
    }

    fn absorb(&mut self, cabin: &Cabin, placeholder_price: i64) {
        self.cabin_count += 1;
        self.total_capacity = self.total_capacity.saturating_add(cabin.total_capacity);
        self.cabins.push(cabin.clone());

        if is_listed_price(cabin.price, placeholder_price) {
            // A zero lowest price means nothing has been listed yet
            if self.lowest_price == 0 || cabin.price < self.lowest_price {
                self.lowest_price = cabin.price;
            }
            if cabin.price > self.highest_price {
                self.highest_price = cabin.price;
            }
        }

        self.facilities.merge(&cabin.facilities);
    }
}

/// Group cabins by normalized boat name in a single pass
pub fn aggregate_cabins(
    cabins: &[Cabin],
    placeholder_price: i64,
) -> HashMap<String, BoatCabinStats> {
    let mut stats: HashMap<String, BoatCabinStats> = HashMap::new();

    for cabin in cabins {
        let key = normalize_boat_name(&cabin.boat_name);
        match stats.get_mut(&key) {
            Some(entry) => entry.absorb(cabin, placeholder_price),
            None => {
                stats.insert(key, BoatCabinStats::seed(cabin, placeholder_price));
            }
        }
    }

    stats
}
