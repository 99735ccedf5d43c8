use crate::config::{Config, GeocodingGateway, GeolocationGateway};
use pitstop_core::{
    app::Gateways,
    gateways::{geocode::GeoCodingGateway, geolocation::GeoLocationGateway},
};
use pitstop_gateways::{
    api::EntryApi,
    fixed::{Disabled, FixedLocation},
    ip_api::IpApi,
    nominatim::Nominatim,
};

pub fn gateways(cfg: &Config) -> Gateways {
    log::info!("Use backend at {}", cfg.api.url);
    Gateways {
        backend: Box::new(EntryApi::new(
            cfg.api.url.clone(),
            cfg.api.collection.clone(),
        )),
        geocoding: geocoding_gateway(cfg),
        geolocation: geolocation_gateway(cfg),
    }
}

fn geocoding_gateway(cfg: &Config) -> Box<dyn GeoCodingGateway + Send + Sync> {
    match &cfg.geocoding.gateway {
        Some(GeocodingGateway::Nominatim { endpoint }) => {
            log::info!("Use Nominatim geocoding gateway ({endpoint})");
            Box::new(Nominatim::new(endpoint))
        }
        None => {
            log::warn!("No geocoding gateway configured: addresses stay empty");
            Box::new(Disabled)
        }
    }
}

fn geolocation_gateway(cfg: &Config) -> Box<dyn GeoLocationGateway + Send + Sync> {
    match &cfg.geolocation.gateway {
        Some(GeolocationGateway::IpApi { url }) => {
            log::info!("Use ip-api geolocation gateway");
            Box::new(IpApi::new(url.clone()))
        }
        Some(GeolocationGateway::Fixed { position }) => {
            log::info!("Use fixed geolocation at {position}");
            Box::new(FixedLocation(*position))
        }
        None => {
            log::warn!("No geolocation gateway configured");
            Box::new(Disabled)
        }
    }
}
