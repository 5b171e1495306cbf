use serde::{Deserialize, Serialize};

use crate::model::ids::ArtistId;

/// A performer (solo artist or band) as published by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,

    /// Artwork URL.
    #[serde(default)]
    pub image: String,

    pub name: String,

    #[serde(default)]
    pub members: Vec<String>,

    /// Year the artist or band was formed.
    pub creation_date: i32,

    /// Release date of the first album, as the upstream formats it
    /// (e.g. `"14-12-1973"`).
    #[serde(default)]
    pub first_album: String,
}

impl Artist {
    #[must_use]
    pub fn new(id: impl Into<ArtistId>, name: impl Into<String>, creation_date: i32) -> Self {
        Self {
            id: id.into(),
            image: String::new(),
            name: name.into(),
            members: Vec::new(),
            creation_date,
            first_album: String::new(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.members.push(member.into());
        self
    }

    #[must_use]
    pub fn with_first_album(mut self, first_album: impl Into<String>) -> Self {
        self.first_album = first_album.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_builder() {
        let artist = Artist::new(1, "Queen", 1970)
            .with_member("Freddie Mercury")
            .with_member("Brian May")
            .with_first_album("14-12-1973");

        assert_eq!(artist.id, ArtistId::new(1));
        assert_eq!(artist.members, vec!["Freddie Mercury", "Brian May"]);
        assert_eq!(artist.first_album, "14-12-1973");
        assert!(artist.image.is_empty());
    }

    #[test]
    fn test_artist_deserialize_upstream_shape() {
        let json = r#"{
            "id": 1,
            "image": "https://example.org/queen.jpeg",
            "name": "Queen",
            "members": ["Freddie Mercury", "Brian May", "John Daecon", "Roger Meddows-Taylor"],
            "creationDate": 1970,
            "firstAlbum": "14-12-1973",
            "locations": "https://example.org/api/locations/1",
            "concertDates": "https://example.org/api/dates/1",
            "relations": "https://example.org/api/relation/1"
        }"#;

        let artist: Artist = serde_json::from_str(json).unwrap();
        assert_eq!(artist.name, "Queen");
        assert_eq!(artist.creation_date, 1970);
        assert_eq!(artist.members.len(), 4);
        assert_eq!(artist.image, "https://example.org/queen.jpeg");
    }

    #[test]
    fn test_artist_missing_optional_fields() {
        let json = r#"{"id": 2, "name": "Solo", "creationDate": 2001}"#;
        let artist: Artist = serde_json::from_str(json).unwrap();
        assert!(artist.members.is_empty());
        assert!(artist.first_album.is_empty());
    }
}
