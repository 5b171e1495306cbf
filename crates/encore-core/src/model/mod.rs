pub mod artist;
pub mod detail;
pub mod geo;
pub mod ids;
pub mod records;

pub use artist::Artist;
pub use detail::{DetailRecord, ScheduleEntry};
pub use geo::{Coordinate, ResolvedLocation};
pub use ids::ArtistId;
pub use records::{DateRecord, Index, LocationRecord, RelationRecord};
