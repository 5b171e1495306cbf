use serde::{Deserialize, Serialize};

/// A geographic point in the provider's `[longitude, latitude]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Builds a coordinate from a provider `center` array. Returns `None`
    /// when fewer than two values are present.
    #[must_use]
    pub fn from_center(center: &[f64]) -> Option<Self> {
        match center {
            [longitude, latitude, ..] => Some(Self::new(*longitude, *latitude)),
            _ => None,
        }
    }
}

/// A raw location token paired with the coordinate it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// The location exactly as it appeared in the artist's record.
    pub location: String,
    pub coordinate: Coordinate,
}
