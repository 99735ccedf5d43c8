use pitstop_entities::geo::MapPoint;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Permission to locate the user was denied")]
    PermissionDenied,
    #[error("The current position is unavailable: {0}")]
    Unavailable(String),
}

/// Source of the user's current position.
pub trait GeoLocationGateway {
    fn current_position(&self) -> Result<MapPoint, Error>;
}
