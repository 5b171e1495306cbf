use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::ArtistId;

/// The `{"index": [...]}` envelope the catalog source wraps its location,
/// date, and relation collections in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index<T> {
    pub index: Vec<T>,
}

impl<T> Index<T> {
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.index
    }
}

/// Tour locations of one artist, as raw tokens like
/// `"auckland-new_zealand"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: ArtistId,

    #[serde(default)]
    pub locations: Vec<String>,

    /// URL of the matching dates resource.
    #[serde(default)]
    pub dates: String,
}

/// Tour dates of one artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    pub id: ArtistId,

    #[serde(default)]
    pub dates: Vec<String>,
}

/// Which dates were played at which location for one artist.
///
/// The upstream keys this map by raw location token; each value lists the
/// dates played there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRecord {
    pub id: ArtistId,

    #[serde(default)]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

impl RelationRecord {
    /// Location tokens in this relation, in sorted order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.dates_locations.keys().map(String::as_str)
    }

    /// Dates played at `location`, or an empty slice.
    #[must_use]
    pub fn dates_at(&self, location: &str) -> &[String] {
        self.dates_locations
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_index_deserialize() {
        let json = r#"{
            "index": [
                {
                    "id": 1,
                    "locations": ["north_carolina-usa", "georgia-usa"],
                    "dates": "https://example.org/api/dates/1"
                },
                {
                    "id": 2,
                    "locations": ["playa_del_carmen-mexico"],
                    "dates": "https://example.org/api/dates/2"
                }
            ]
        }"#;

        let index: Index<LocationRecord> = serde_json::from_str(json).unwrap();
        let records = index.into_inner();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, ArtistId::new(1));
        assert_eq!(records[0].locations[1], "georgia-usa");
        assert_eq!(records[1].dates, "https://example.org/api/dates/2");
    }

    #[test]
    fn test_dates_index_deserialize() {
        let json = r#"{"index": [{"id": 1, "dates": ["*23-08-2019", "22-08-2019"]}]}"#;
        let index: Index<DateRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(index.index[0].dates, vec!["*23-08-2019", "22-08-2019"]);
    }

    #[test]
    fn test_relation_deserialize_and_lookup() {
        let json = r#"{
            "id": 1,
            "datesLocations": {
                "dunedin-new_zealand": ["10-02-2020"],
                "auckland-new_zealand": ["07-02-2020", "08-02-2020"]
            }
        }"#;

        let relation: RelationRecord = serde_json::from_str(json).unwrap();
        let locations: Vec<&str> = relation.locations().collect();
        assert_eq!(locations, vec!["auckland-new_zealand", "dunedin-new_zealand"]);
        assert_eq!(relation.dates_at("auckland-new_zealand").len(), 2);
        assert!(relation.dates_at("lima-peru").is_empty());
    }

    #[test]
    fn test_relation_without_map() {
        let relation: RelationRecord = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(relation.locations().count(), 0);
    }
}
