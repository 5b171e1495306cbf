use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Artist, DateRecord, LocationRecord, RelationRecord};

/// Upstream date format, e.g. `"07-02-2020"`.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Everything known about one artist, assembled from the four catalog
/// collections. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub artist: Artist,
    pub locations: LocationRecord,
    pub dates: DateRecord,
    pub relations: RelationRecord,
}

/// One concert: a date and the raw location token it was played at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: String,
    pub location: String,
    /// Parsed form of `date`, if it matched the upstream format.
    pub parsed: Option<NaiveDate>,
}

impl DetailRecord {
    /// Raw location tokens for this artist, in upstream order.
    #[must_use]
    pub fn location_tokens(&self) -> &[String] {
        &self.locations.locations
    }

    /// The concert schedule in chronological order.
    ///
    /// Unparseable dates sort after every parseable one, then lexically.
    #[must_use]
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = self
            .relations
            .locations()
            .flat_map(|location| {
                self.relations
                    .dates_at(location)
                    .iter()
                    .map(move |date| ScheduleEntry {
                        date: date.clone(),
                        location: location.to_string(),
                        parsed: parse_concert_date(date),
                    })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.parsed
                .is_none()
                .cmp(&b.parsed.is_none())
                .then(a.parsed.cmp(&b.parsed))
                .then_with(|| a.date.cmp(&b.date))
                .then_with(|| a.location.cmp(&b.location))
        });
        entries
    }
}

/// Parses an upstream concert date. A leading `*` marker is ignored.
pub fn parse_concert_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_start_matches('*');
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::ArtistId;

    fn record_with(relations: &[(&str, &[&str])]) -> DetailRecord {
        let id = ArtistId::new(1);
        let dates_locations: BTreeMap<String, Vec<String>> = relations
            .iter()
            .map(|(loc, dates)| {
                (
                    (*loc).to_string(),
                    dates.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect();

        DetailRecord {
            artist: Artist::new(id, "Queen", 1970),
            locations: LocationRecord {
                id,
                locations: dates_locations.keys().cloned().collect(),
                dates: String::new(),
            },
            dates: DateRecord {
                id,
                dates: Vec::new(),
            },
            relations: RelationRecord {
                id,
                dates_locations,
            },
        }
    }

    #[test]
    fn test_parse_concert_date() {
        assert_eq!(
            parse_concert_date("07-02-2020"),
            NaiveDate::from_ymd_opt(2020, 2, 7)
        );
        assert_eq!(
            parse_concert_date("*23-08-2019"),
            NaiveDate::from_ymd_opt(2019, 8, 23)
        );
        assert_eq!(parse_concert_date("sometime"), None);
    }

    #[test]
    fn test_schedule_is_chronological() {
        let record = record_with(&[
            ("dunedin-new_zealand", &["10-02-2020"]),
            ("auckland-new_zealand", &["08-02-2020", "07-02-2020"]),
            ("lima-peru", &["01-01-2019"]),
        ]);

        let schedule = record.schedule();
        let order: Vec<(&str, &str)> = schedule
            .iter()
            .map(|e| (e.date.as_str(), e.location.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("01-01-2019", "lima-peru"),
                ("07-02-2020", "auckland-new_zealand"),
                ("08-02-2020", "auckland-new_zealand"),
                ("10-02-2020", "dunedin-new_zealand"),
            ]
        );
    }

    #[test]
    fn test_schedule_puts_unparseable_dates_last() {
        let record = record_with(&[("a-b", &["tbd", "02-03-2021"])]);
        let schedule = record.schedule();
        assert_eq!(schedule[0].date, "02-03-2021");
        assert_eq!(schedule[1].date, "tbd");
        assert!(schedule[1].parsed.is_none());
    }

    #[test]
    fn test_schedule_covers_every_relation_date() {
        let record = record_with(&[
            ("auckland-new_zealand", &["08-02-2020", "07-02-2020"]),
            ("lima-peru", &["01-01-2019"]),
        ]);

        let schedule = record.schedule();
        assert_eq!(schedule.len(), 3);
        for entry in &schedule {
            assert!(record
                .relations
                .dates_at(&entry.location)
                .contains(&entry.date));
        }
    }
}
