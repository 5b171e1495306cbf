//! Core catalog model for encore.
//!
//! This crate defines the upstream record types (artists, locations,
//! dates, relations), the immutable [`Catalog`] snapshot they are loaded
//! into, and the positional join that assembles a [`DetailRecord`] for a
//! single artist.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use model::{
    Artist, ArtistId, Coordinate, DateRecord, DetailRecord, LocationRecord, RelationRecord,
    ResolvedLocation,
};
