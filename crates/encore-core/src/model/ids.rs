use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream identifier of an artist.
///
/// Identifiers are 1-based and shared by the artist and its location,
/// date, and relation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(i64);

impl ArtistId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The zero-based position this identifier maps to in the positional
    /// join, or `None` for identifiers below 1.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        self.0
            .checked_sub(1)
            .and_then(|p| usize::try_from(p).ok())
    }
}

impl From<i64> for ArtistId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
