use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("pitstop.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub api: Option<Api>,
    pub map: Option<Map>,
    pub geolocation: Option<Geolocation>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub ui: Option<Ui>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Api {
    pub url: String,
    pub collection: String,
}

impl Default for Api {
    fn default() -> Self {
        Config::default().api.expect("API configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub startup: StartupPolicy,
    pub default_center: [f64; 2],
    pub zoom: u8,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartupPolicy {
    FallbackCenter,
    Defer,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geolocation {
    pub gateway: Option<GeolocationGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeolocationGateway {
    IpApi,
    Fixed,
}

impl GeolocationGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::IpApi => "ip-api",
            Self::Fixed => "fixed",
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Nominatim,
}

impl GeocodingGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub ip_api: Option<IpApi>,
    pub fixed: Option<Fixed>,
    pub nominatim: Option<Nominatim>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IpApi {
    pub url: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fixed {
    pub position: [f64; 2],
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub endpoint: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ui {
    pub mobile_breakpoint: u32,
    pub display_width: u32,
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

impl Default for Ui {
    fn default() -> Self {
        Config::default().ui.expect("UI configuration")
    }
}
