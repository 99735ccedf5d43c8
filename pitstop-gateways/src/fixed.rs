use pitstop_core::gateways::{
    geocode::GeoCodingGateway,
    geolocation::{Error, GeoLocationGateway},
};
use pitstop_entities::geo::MapPoint;

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub MapPoint);

impl GeoLocationGateway for FixedLocation {
    fn current_position(&self) -> Result<MapPoint, Error> {
        Ok(self.0)
    }
}

/// Stands in for a disabled service.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disabled;

impl GeoLocationGateway for Disabled {
    fn current_position(&self) -> Result<MapPoint, Error> {
        log::debug!("Geolocation is disabled");
        Err(Error::PermissionDenied)
    }
}

impl GeoCodingGateway for Disabled {
    fn resolve_address(&self, _: MapPoint) -> Option<String> {
        None
    }
}
