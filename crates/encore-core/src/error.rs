use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// The four collections disagree at a position. Upstream is expected
    /// to return them in the same ordinal sequence.
    #[error(
        "join integrity failure in {collection} at position {position}: expected id {expected}, found {found}"
    )]
    JoinIntegrity {
        collection: &'static str,
        position: usize,
        expected: String,
        found: String,
    },
}

impl Error {
    /// Returns `true` for a lookup that simply missed, as opposed to a
    /// data integrity problem.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::JoinIntegrity { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
