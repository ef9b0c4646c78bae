use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::aggregate::BoatCabinStats;
use crate::catalog::images::rewrite_drive_url;
use crate::catalog::normalize::{normalize_boat_name, slugify};
use crate::types::{Cabin, Ship};

/// A ship joined with the statistics of its cabins, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedShip {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub trip: u32,
    pub trip_name: String,
    pub destinations: String,
    pub image_main: String,
    pub images: Vec<String>,
    pub cabin_count: usize,
    pub lowest_price: i64,
    pub highest_price: i64,
    pub total_capacity: u32,
    pub has_balcony: bool,
    pub has_bathtub: bool,
    pub has_seaview: bool,
    pub has_private_jacuzzi: bool,
    pub cabins: Vec<Cabin>,
}

impl ParsedShip {
    /// Merge a raw ship with its cabin stats; no stats means every cabin field is zero/false
    pub fn from_parts(ship: Ship, stats: Option<&BoatCabinStats>) -> Self {
        let slug = slugify(&ship.name);
        let default_stats = BoatCabinStats::default();
        let stats = stats.unwrap_or(&default_stats);

        Self {
            id: slug.clone(),
            slug,
            image_main: rewrite_drive_url(&ship.image_main),
            images: ship.images.iter().map(|url| rewrite_drive_url(url)).collect(),
            name: ship.name,
            description: ship.description,
            trip: ship.trip,
            trip_name: ship.trip_name,
            destinations: ship.destinations,
            cabin_count: stats.cabin_count,
            lowest_price: stats.lowest_price,
            highest_price: stats.highest_price,
            total_capacity: stats.total_capacity,
            has_balcony: stats.facilities.balcony,
            has_bathtub: stats.facilities.bathtub,
            has_seaview: stats.facilities.seaview,
            has_private_jacuzzi: stats.facilities.private_jacuzzi,
            cabins: stats.cabins.clone(),
        }
    }

    /// Itinerary stops in order, splitting on commas and arrows
    pub fn destination_stops(&self) -> Vec<String> {
        self.destinations
            .replace("->", ",")
            .replace('→', ",")
            .split(',')
            .map(str::trim)
            .filter(|stop| !stop.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Join ships to cabin stats by normalized name, keeping source order
pub fn enrich_ships(ships: Vec<Ship>, stats: &HashMap<String, BoatCabinStats>) -> Vec<ParsedShip> {
    ships
        .into_iter()
        .map(|ship| {
            let key = normalize_boat_name(&ship.name);
            let matched = stats.get(&key);
            if matched.is_none() {
                debug!(ship = %ship.name, key = %key, "No cabins matched ship");
            }
            ParsedShip::from_parts(ship, matched)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::aggregate::aggregate_cabins;
    use crate::constants::PLACEHOLDER_PRICE;
    use crate::types::Facilities;

    fn ship(name: &str, destinations: &str) -> Ship {
        Ship {
            name: name.to_string(),
            description: format!("{name} description"),
            trip: 3,
            trip_name: "3D2N".to_string(),
            destinations: destinations.to_string(),
            image_main: "https://drive.google.com/open?id=MAIN1".to_string(),
            images: vec![
                "https://drive.google.com/file/d/EXTRA2/view".to_string(),
                "https://cdn.example.com/deck.jpg".to_string(),
            ],
        }
    }

    #[test]
    fn test_unmatched_ship_gets_zeroed_stats() {
        let parsed = enrich_ships(vec![ship("Lamima", "Komodo")], &HashMap::new());

        assert_eq!(parsed.len(), 1);
        let lamima = &parsed[0];
        assert_eq!(lamima.cabin_count, 0);
        assert_eq!(lamima.lowest_price, 0);
        assert_eq!(lamima.highest_price, 0);
        assert_eq!(lamima.total_capacity, 0);
        assert!(!lamima.has_balcony && !lamima.has_bathtub);
        assert!(!lamima.has_seaview && !lamima.has_private_jacuzzi);
        assert!(lamima.cabins.is_empty());
    }

    #[test]
    fn test_matched_ship_carries_stats_and_rewritten_images() {
        let cabins = vec![Cabin {
            boat_name: "DERYA LIVEBOARD (Deluxe)".to_string(),
            cabin_name: "Ocean".to_string(),
            price: 750_000,
            total_capacity: 4,
            facilities: Facilities {
                seaview: true,
                ..Default::default()
            },
        }];
        let stats = aggregate_cabins(&cabins, PLACEHOLDER_PRICE);
        let parsed = enrich_ships(vec![ship("Derya Liveaboard", "Komodo")], &stats);
        let derya = &parsed[0];

        assert_eq!(derya.id, "derya-liveaboard");
        assert_eq!(derya.slug, "derya-liveaboard");
        assert_eq!(derya.cabin_count, 1);
        assert_eq!(derya.lowest_price, 750_000);
        assert_eq!(derya.total_capacity, 4);
        assert!(derya.has_seaview);
        assert_eq!(derya.image_main, "https://drive.google.com/thumbnail?id=MAIN1&sz=w1000");
        assert_eq!(derya.images[0], "https://drive.google.com/thumbnail?id=EXTRA2&sz=w1000");
        assert_eq!(derya.images[1], "https://cdn.example.com/deck.jpg");
    }

    #[test]
    fn test_source_order_is_preserved() {
        let ships = vec![ship("Zephyr", ""), ship("Alpha", ""), ship("Mola", "")];
        let names: Vec<_> = enrich_ships(ships, &HashMap::new())
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["Zephyr", "Alpha", "Mola"]);
    }

    #[test]
    fn test_destination_stops_split_on_arrows_and_commas() {
        let parsed = ParsedShip::from_parts(
            ship("Derya", "Labuan Bajo → Rinca -> Padar, Komodo"),
            None,
        );

        assert_eq!(
            parsed.destination_stops(),
            vec!["Labuan Bajo", "Rinca", "Padar", "Komodo"]
        );
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let parsed = ParsedShip::from_parts(ship("Derya", "Komodo"), None);
        let value = serde_json::to_value(&parsed).unwrap();

        assert_eq!(value["tripName"], "3D2N");
        assert_eq!(value["lowestPrice"], 0);
        assert_eq!(value["hasPrivateJacuzzi"], false);
    }
}
