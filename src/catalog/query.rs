use std::collections::{BTreeSet, HashMap};

use crate::catalog::enrich::ParsedShip;

/// Ships whose destinations or name contain `query`, case-insensitively.
/// A blank query matches every ship.
pub fn search_ships<'a>(ships: &'a [ParsedShip], query: &str) -> Vec<&'a ParsedShip> {
    let needle = query.trim().to_lowercase();
    ships
        .iter()
        .filter(|ship| {
            needle.is_empty()
                || ship.destinations.to_lowercase().contains(&needle)
                || ship.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Unique destination names across all ships, sorted
pub fn get_destinations(ships: &[ParsedShip]) -> Vec<String> {
    ships
        .iter()
        .flat_map(|ship| ship.destinations.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Ships keyed by slug. Colliding slugs overwrite, so the last ship wins.
pub fn index_by_slug(ships: &[ParsedShip]) -> HashMap<&str, &ParsedShip> {
    ships.iter().map(|ship| (ship.slug.as_str(), ship)).collect()
}

pub fn find_ship_by_slug<'a>(ships: &'a [ParsedShip], slug: &str) -> Option<&'a ParsedShip> {
    ships.iter().rev().find(|ship| ship.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ship;

    fn parsed(name: &str, destinations: &str) -> ParsedShip {
        let ship = Ship {
            name: name.to_string(),
            destinations: destinations.to_string(),
            ..Default::default()
        };
        ParsedShip::from_parts(ship, None)
    }

    #[test]
    fn test_destinations_are_trimmed_deduplicated_and_sorted() {
        let ships = vec![
            parsed("Derya", "Komodo, Labuan Bajo"),
            parsed("Lamima", "Labuan Bajo, Flores"),
        ];

        assert_eq!(get_destinations(&ships), vec!["Flores", "Komodo", "Labuan Bajo"]);
    }

    #[test]
    fn test_empty_destination_entries_are_skipped() {
        let ships = vec![parsed("Derya", ""), parsed("Lamima", "Raja Ampat, ,")];

        assert_eq!(get_destinations(&ships), vec!["Raja Ampat"]);
    }

    #[test]
    fn test_search_matches_destinations_or_name() {
        let ships = vec![
            parsed("Derya", "Komodo, Labuan Bajo"),
            parsed("Raja Explorer", "Misool"),
            parsed("Lamima", "Raja Ampat"),
        ];

        let names = |hits: Vec<&ParsedShip>| hits.iter().map(|s| s.name.clone()).collect::<Vec<_>>();

        assert_eq!(names(search_ships(&ships, "KOMODO")), vec!["Derya"]);
        assert_eq!(names(search_ships(&ships, "raja")), vec!["Raja Explorer", "Lamima"]);
        assert!(search_ships(&ships, "Bali").is_empty());
        assert_eq!(search_ships(&ships, "  ").len(), 3);
    }

    #[test]
    fn test_slug_collision_last_seen_wins() {
        let mut first = parsed("Sea Safari", "Komodo");
        first.description = "first".to_string();
        let mut second = parsed("Sea-Safari", "Flores");
        second.description = "second".to_string();
        let ships = vec![first, second];

        assert_eq!(index_by_slug(&ships)["sea-safari"].description, "second");
        assert_eq!(find_ship_by_slug(&ships, "sea-safari").unwrap().description, "second");
        assert!(find_ship_by_slug(&ships, "missing").is_none());
    }
}
