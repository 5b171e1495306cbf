use std::collections::HashMap;

use serde::Serialize;

use encore_core::{Artist, ArtistId, RelationRecord};

/// Which field of an artist produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Name,
    Member,
    FirstAlbum,
    CreationDate,
    Location,
}

/// One search result row.
///
/// Serializes as `{"name": <label>, "id": <artist id>}`, the shape the
/// catalog browser's search endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "id")]
    pub artist_id: ArtistId,
    #[serde(skip)]
    pub kind: MatchKind,
}

impl SearchHit {
    fn new(label: String, artist_id: ArtistId, kind: MatchKind) -> Self {
        Self {
            label,
            artist_id,
            kind,
        }
    }
}

/// Search artists and their concert locations for `query`.
///
/// Matching is case-insensitive substring containment. Per artist the
/// fields are checked in order: name, each member, first album, creation
/// year, then each location of the artist's relation record. Every
/// matching field yields its own hit. The query is used as given, without
/// trimming; only the empty query matches nothing.
///
/// Relation records are attached to artists by id.
pub fn search(query: &str, artists: &[Artist], relations: &[RelationRecord]) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let by_artist: HashMap<ArtistId, &RelationRecord> =
        relations.iter().map(|r| (r.id, r)).collect();

    let mut hits = Vec::new();
    for artist in artists {
        match_artist(&needle, artist, &mut hits);
        if let Some(relation) = by_artist.get(&artist.id) {
            match_locations(&needle, artist, relation, &mut hits);
        }
    }
    hits
}

/// Labels only, in the same order as [`search`].
pub fn suggestions(query: &str, artists: &[Artist], relations: &[RelationRecord]) -> Vec<String> {
    search(query, artists, relations)
        .into_iter()
        .map(|hit| hit.label)
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn match_artist(needle: &str, artist: &Artist, hits: &mut Vec<SearchHit>) {
    let name = &artist.name;

    if contains(name, needle) {
        hits.push(SearchHit::new(
            format!("{name} - artist/band"),
            artist.id,
            MatchKind::Name,
        ));
    }

    for member in &artist.members {
        if contains(member, needle) {
            hits.push(SearchHit::new(
                format!("{member} - member of {name}"),
                artist.id,
                MatchKind::Member,
            ));
        }
    }

    if contains(&artist.first_album, needle) {
        hits.push(SearchHit::new(
            format!("{} - first album date of {name}", artist.first_album),
            artist.id,
            MatchKind::FirstAlbum,
        ));
    }

    let year = artist.creation_date.to_string();
    if year.contains(needle) {
        hits.push(SearchHit::new(
            format!("{year} - creation date of {name}"),
            artist.id,
            MatchKind::CreationDate,
        ));
    }
}

fn match_locations(
    needle: &str,
    artist: &Artist,
    relation: &RelationRecord,
    hits: &mut Vec<SearchHit>,
) {
    for location in relation.locations() {
        if contains(location, needle) {
            hits.push(SearchHit::new(
                format!("{} - {location}", artist.name),
                artist.id,
                MatchKind::Location,
            ));
        }
    }
}
