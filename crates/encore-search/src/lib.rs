//! Substring search for encore.
//!
//! Scans the artist collection (and, through relation records, each
//! artist's concert locations) for case-insensitive substring matches and
//! reports one labelled hit per matching field.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;

pub use engine::{search, suggestions, MatchKind, SearchHit};
