//! # pitstop-core
//!
//! The view-state and derived-data engine of the pitstop map client.
//!
//! Nothing in here performs any I/O. All outbound communication happens
//! through the traits in [`gateways`] and is requested by
//! [`app::update`] in form of [`app::Cmd`]s.

pub mod app;
pub mod error;
pub mod form;
pub mod gateways;
pub mod mutation;
pub mod rating;
pub mod store;
pub mod util;
pub mod view;
pub mod viewport;

pub use self::error::Error;
