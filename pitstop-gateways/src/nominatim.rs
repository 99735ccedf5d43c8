use geocoding::{Openstreetmap, Point, Reverse};
use pitstop_core::gateways::geocode::GeoCodingGateway;
use pitstop_entities::geo::MapPoint;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/";

/// Reverse geocoding with OpenStreetMap Nominatim.
pub struct Nominatim {
    endpoint: String,
    osm: Openstreetmap,
}

impl Nominatim {
    pub fn new(endpoint: &str) -> Self {
        let endpoint = normalize_endpoint(endpoint);
        let osm = Openstreetmap::new_with_endpoint(endpoint.clone());
        Self { endpoint, osm }
    }
}

impl Default for Nominatim {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl std::fmt::Debug for Nominatim {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Nominatim")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

// The endpoint is used as a prefix of the request path.
fn normalize_endpoint(endpoint: &str) -> String {
    format!("{}/", endpoint.trim().trim_end_matches('/'))
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address(&self, pos: MapPoint) -> Option<String> {
        let (lat, lng) = pos.to_lat_lng_deg();
        match self.osm.reverse(&Point::new(lng, lat)) {
            Ok(Some(address)) => {
                log::debug!("Resolved address of {pos}: {address}");
                Some(address)
            }
            Ok(None) => {
                log::debug!("No address found for {pos}");
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve address of {pos}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ends_with_a_slash() {
        assert_eq!(
            normalize_endpoint("https://nominatim.openstreetmap.org"),
            DEFAULT_ENDPOINT
        );
        assert_eq!(normalize_endpoint(DEFAULT_ENDPOINT), DEFAULT_ENDPOINT);
        assert_eq!(
            normalize_endpoint(" http://localhost:8080/nominatim// "),
            "http://localhost:8080/nominatim/"
        );
    }
}
