use crate::error::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Treats an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Field decoders below never fail on a wrong JSON type. Upstream records are
// hand-edited, so anything unusable falls back to the field default.

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Integer from a JSON number or numeric string; floats are rounded
fn coerce_i64(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(n) => match n.as_i64() {
            Some(int) => return Some(int),
            None => n.as_f64()?,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Some(int);
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    // `as` saturates at the bounds of i64
    float.is_finite().then(|| float.round() as i64)
}

fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_i64(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Non-negative count; negative values become 0 and oversized ones saturate
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let int = coerce_i64(&Value::deserialize(deserializer)?).unwrap_or_default();
    Ok(u32::try_from(int.max(0)).unwrap_or(u32::MAX))
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    })
}

fn lenient_facilities<'de, D>(deserializer: D) -> std::result::Result<Facilities, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => Facilities::default(),
    })
}

/// Ship record as returned by the upstream ships collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Ship {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Trip length in days
    #[serde(default, deserialize_with = "lenient_u32")]
    pub trip: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trip_name: String,
    /// Comma- or arrow-delimited list of place names
    #[serde(default, deserialize_with = "lenient_string")]
    pub destinations: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_main: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub images: Vec<String>,
}

/// Cabin record as returned by the upstream cabins collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Cabin {
    /// Free-text name of the boat this cabin belongs to; the only link to a ship
    #[serde(default, deserialize_with = "lenient_string")]
    pub boat_name: String,
    #[serde(default, alias = "name", deserialize_with = "lenient_string")]
    pub cabin_name: String,
    /// Price in IDR. Zero or the placeholder sentinel means "not set".
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price: i64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_capacity: u32,
    #[serde(default, deserialize_with = "lenient_facilities")]
    pub facilities: Facilities,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Facilities {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub balcony: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub bathtub: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub seaview: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub private_jacuzzi: bool,
}

impl Facilities {
    /// Logical OR of every flag. Once a flag is set it stays set.
    pub fn merge(&mut self, other: &Facilities) {
        self.balcony |= other.balcony;
        self.bathtub |= other.bathtub;
        self.seaview |= other.seaview;
        self.private_jacuzzi |= other.private_jacuzzi;
    }
}

/// `{ success, data, message? }` wrapper shared by both upstream collections.
/// Records stay as raw JSON so that one bad record cannot sink its siblings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Decodes every record, skipping the ones that are not JSON objects of the right shape.
    /// `success: false` is an error.
    pub fn into_records<T: DeserializeOwned>(self, endpoint: &str) -> Result<Vec<T>> {
        if !self.success {
            return Err(CatalogError::Rejected {
                endpoint: endpoint.to_string(),
                message: self
                    .message
                    .unwrap_or_else(|| "success: false".to_string()),
            });
        }

        let mut records = Vec::with_capacity(self.data.len());
        for (index, raw) in self.data.into_iter().enumerate() {
            match serde_json::from_value::<T>(raw) {
                Ok(record) => records.push(record),
                Err(e) => warn!(endpoint, index, error = %e, "Skipping unusable record"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ship_tolerates_missing_and_null_fields() {
        let ship: Ship = serde_json::from_value(json!({
            "name": "Derya",
            "trip": null,
            "images": null
        }))
        .unwrap();

        assert_eq!(ship.name, "Derya");
        assert_eq!(ship.trip, 0);
        assert!(ship.images.is_empty());
        assert!(ship.destinations.is_empty());
    }

    #[test]
    fn test_cabin_reads_facilities_and_name_alias() {
        let cabin: Cabin = serde_json::from_value(json!({
            "boat_name": "Derya",
            "name": "Master Suite",
            "price": 500000,
            "total_capacity": 2,
            "facilities": { "balcony": true, "seaview": true }
        }))
        .unwrap();

        assert_eq!(cabin.cabin_name, "Master Suite");
        assert!(cabin.facilities.balcony);
        assert!(cabin.facilities.seaview);
        assert!(!cabin.facilities.bathtub);
        assert!(!cabin.facilities.private_jacuzzi);
    }

    #[test]
    fn test_envelope_rejects_success_false() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({
            "success": false,
            "message": "maintenance"
        }))
        .unwrap();

        match envelope.into_records::<Ship>("/ships") {
            Err(CatalogError::Rejected { endpoint, message }) => {
                assert_eq!(endpoint, "/ships");
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_facilities_merge_is_sticky() {
        let mut flags = Facilities {
            balcony: true,
            ..Default::default()
        };
        flags.merge(&Facilities::default());
        assert!(flags.balcony);

        flags.merge(&Facilities {
            bathtub: true,
            ..Default::default()
        });
        assert!(flags.balcony && flags.bathtub);
    }

    #[test]
    fn test_ship_coerces_mistyped_fields() {
        let ship: Ship = serde_json::from_value(json!({
            "name": 42,
            "trip": "4",
            "destinations": ["not", "a", "string"],
            "images": "https://cdn.example.com/one.jpg"
        }))
        .unwrap();

        assert_eq!(ship.name, "42");
        assert_eq!(ship.trip, 4);
        assert!(ship.destinations.is_empty());
        assert_eq!(ship.images, vec!["https://cdn.example.com/one.jpg"]);

        let rounded: Ship = serde_json::from_value(json!({ "trip": 3.5 })).unwrap();
        assert_eq!(rounded.trip, 4);
        let negative: Ship = serde_json::from_value(json!({ "trip": -1 })).unwrap();
        assert_eq!(negative.trip, 0);
        let garbage: Ship = serde_json::from_value(json!({ "trip": "three" })).unwrap();
        assert_eq!(garbage.trip, 0);
    }

    #[test]
    fn test_cabin_coerces_mistyped_fields() {
        let cabin: Cabin = serde_json::from_value(json!({
            "boat_name": "Lamima",
            "price": 450000.5,
            "total_capacity": -2,
            "facilities": { "balcony": "true", "bathtub": 1, "seaview": "no" }
        }))
        .unwrap();

        assert_eq!(cabin.price, 450_001);
        assert_eq!(cabin.total_capacity, 0);
        assert!(cabin.facilities.balcony);
        assert!(cabin.facilities.bathtub);
        assert!(!cabin.facilities.seaview);

        let flat: Cabin = serde_json::from_value(json!({
            "boat_name": "Lamima",
            "price": "300000",
            "facilities": "balcony"
        }))
        .unwrap();
        assert_eq!(flat.price, 300_000);
        assert_eq!(flat.facilities, Facilities::default());
    }

    #[test]
    fn test_envelope_skips_records_that_are_not_objects() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [
                { "name": "Derya", "trip": "4" },
                "just a string",
                null,
                { "name": "Lamima", "trip": 3 }
            ]
        }))
        .unwrap();

        let ships = envelope.into_records::<Ship>("/ships").unwrap();
        let names: Vec<_> = ships.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Derya", "Lamima"]);
        assert_eq!(ships[0].trip, 4);
    }

    #[test]
    fn test_cabin_serializes_in_camel_case() {
        let value = serde_json::to_value(Cabin {
            boat_name: "Derya".to_string(),
            total_capacity: 2,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(value["boatName"], "Derya");
        assert_eq!(value["totalCapacity"], 2);
        assert_eq!(value["facilities"]["privateJacuzzi"], false);
        assert!(value.get("boat_name").is_none());
    }
}
