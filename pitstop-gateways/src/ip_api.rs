use pitstop_core::gateways::geolocation::{Error, GeoLocationGateway};
use pitstop_entities::geo::MapPoint;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Approximates the position of the user by the public IP address.
#[derive(Debug, Clone)]
pub struct IpApi {
    url: String,
    client: Client,
}

impl IpApi {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

impl Default for IpApi {
    fn default() -> Self {
        Self::new(DEFAULT_URL.to_owned())
    }
}

#[derive(Debug, Deserialize)]
struct Location {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl TryFrom<Location> for MapPoint {
    type Error = Error;
    fn try_from(from: Location) -> Result<Self, Self::Error> {
        let Location {
            status,
            message,
            lat,
            lon,
        } = from;
        if status != "success" {
            return Err(Error::Unavailable(
                message.unwrap_or_else(|| format!("status '{status}'")),
            ));
        }
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(Error::Unavailable("Missing coordinates".into()));
        };
        MapPoint::try_from_lat_lng_deg(lat, lon).map_err(|err| Error::Unavailable(err.to_string()))
    }
}

impl GeoLocationGateway for IpApi {
    fn current_position(&self) -> Result<MapPoint, Error> {
        let location: Location = self
            .client
            .get(&self.url)
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json())
            .map_err(|err| Error::Unavailable(err.to_string()))?;
        let pos = MapPoint::try_from(location)?;
        log::info!("Located by IP address at {pos}");
        Ok(pos)
    }
}
