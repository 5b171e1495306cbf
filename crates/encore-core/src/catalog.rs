//! The fetched catalog snapshot and its positional join.
//!
//! The catalog source publishes four independent collections that share
//! an ordinal sequence: the record at position *k* in each describes the
//! same artist. [`Catalog::join`] relies on that alignment but verifies
//! it on every lookup, so a misaligned upstream surfaces as
//! [`Error::JoinIntegrity`] instead of a silently wrong record.

use crate::error::{Error, Result};
use crate::model::{Artist, ArtistId, DateRecord, DetailRecord, LocationRecord, RelationRecord};

/// Immutable snapshot of the four catalog collections.
///
/// Built once after fetching and shared by reference with every reader.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artists: Vec<Artist>,
    locations: Vec<LocationRecord>,
    dates: Vec<DateRecord>,
    relations: Vec<RelationRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        artists: Vec<Artist>,
        locations: Vec<LocationRecord>,
        dates: Vec<DateRecord>,
        relations: Vec<RelationRecord>,
    ) -> Self {
        Self {
            artists,
            locations,
            dates,
            relations,
        }
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn dates(&self) -> &[DateRecord] {
        &self.dates
    }

    pub fn relations(&self) -> &[RelationRecord] {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Assemble the detail record for the artist with the given 1-based
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the identifier maps outside the
    /// artist collection, and [`Error::JoinIntegrity`] when any collection
    /// is too short or carries a different id at that position.
    pub fn join(&self, id: ArtistId) -> Result<DetailRecord> {
        let position = id
            .position()
            .filter(|p| *p < self.artists.len())
            .ok_or_else(|| Error::NotFound {
                entity: "artist",
                id: id.to_string(),
            })?;

        let artist = &self.artists[position];
        if artist.id != id {
            return Err(integrity("artists", position, id, Some(artist.id)));
        }

        let locations = aligned("locations", &self.locations, position, id, |r| r.id)?;
        let dates = aligned("dates", &self.dates, position, id, |r| r.id)?;
        let relations = aligned("relations", &self.relations, position, id, |r| r.id)?;

        Ok(DetailRecord {
            artist: artist.clone(),
            locations: locations.clone(),
            dates: dates.clone(),
            relations: relations.clone(),
        })
    }

    /// Check the whole snapshot for alignment.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::JoinIntegrity`] found, scanning
    /// positions in order.
    pub fn validate(&self) -> Result<()> {
        for position in 0..self.artists.len() {
            let expected = ArtistId::new(position as i64 + 1);
            self.join(expected)?;
        }

        let longest = self
            .locations
            .len()
            .max(self.dates.len())
            .max(self.relations.len());
        if longest > self.artists.len() {
            return Err(Error::JoinIntegrity {
                collection: "artists",
                position: self.artists.len(),
                expected: format!("{longest} records"),
                found: format!("{} records", self.artists.len()),
            });
        }

        Ok(())
    }
}

fn aligned<'a, T>(
    collection: &'static str,
    records: &'a [T],
    position: usize,
    expected: ArtistId,
    id_of: impl Fn(&T) -> ArtistId,
) -> Result<&'a T> {
    let record = records
        .get(position)
        .ok_or_else(|| integrity(collection, position, expected, None))?;

    let found = id_of(record);
    if found == expected {
        Ok(record)
    } else {
        Err(integrity(collection, position, expected, Some(found)))
    }
}

fn integrity(
    collection: &'static str,
    position: usize,
    expected: ArtistId,
    found: Option<ArtistId>,
) -> Error {
    Error::JoinIntegrity {
        collection,
        position,
        expected: expected.to_string(),
        found: found.map_or_else(|| String::from("<missing>"), |id| id.to_string()),
    }
}
