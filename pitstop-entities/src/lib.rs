#![deny(missing_debug_implementations)]

//! # pitstop-entities
//!
//! Reusable, agnostic domain entities for the pitstop map client.
//!
//! The entities only contain generic functionality that does not reveal
//! anything about how the client presents or mutates them.

pub mod comment;
pub mod entry;
pub mod geo;
pub mod id;
pub mod rating;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
