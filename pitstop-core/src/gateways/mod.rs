use thiserror::Error;

pub mod backend;
pub mod geocode;
pub mod geolocation;

/// Failure of an outbound request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Unexpected response ({code}): {message}")]
    Status { code: u16, message: String },
    #[error("Unable to decode the response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
