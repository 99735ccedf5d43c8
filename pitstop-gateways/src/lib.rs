//! Outbound adapters of the pitstop client.

pub mod api;
pub mod fixed;
pub mod ip_api;
pub mod nominatim;
