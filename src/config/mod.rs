use anyhow::{anyhow, Context as _, Result};
use pitstop_core::{
    app::{MarkerIcons, Settings},
    viewport::StartupPolicy,
};
use pitstop_entities::geo::MapPoint;
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "pitstop.toml";

const ENV_NAME_API_URL: &str = "PITSTOP_API_URL";

#[derive(Debug)]
pub struct Config {
    pub api: Api,
    pub map: Map,
    pub geolocation: Geolocation,
    pub geocoding: Geocoding,
    pub ui: Ui,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(api_url) = env::var(ENV_NAME_API_URL) {
            cfg.api.url = api_url;
        }
        Ok(cfg)
    }

    /// The process-wide settings of the application model.
    pub fn settings(&self) -> Settings {
        let Ui {
            mobile_breakpoint,
            display_width,
            marker_icons,
        } = &self.ui;
        Settings {
            startup: self.map.startup,
            mobile_breakpoint: *mobile_breakpoint,
            display_width: *display_width,
            marker_icons: marker_icons.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Api {
    /// Base URL of the backend
    pub url: String,
    /// Path segment of the entry collection
    pub collection: String,
}

#[derive(Debug)]
pub struct Map {
    pub startup: StartupPolicy,
    pub zoom: u8,
}

#[derive(Debug)]
pub struct Geolocation {
    pub gateway: Option<GeolocationGateway>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationGateway {
    IpApi { url: String },
    /// For local testing purposes
    Fixed { position: MapPoint },
}

#[derive(Debug)]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    Nominatim { endpoint: String },
}

#[derive(Debug)]
pub struct Ui {
    pub mobile_breakpoint: u32,
    pub display_width: u32,
    pub marker_icons: MarkerIcons,
}

fn map_point([lat, lng]: [f64; 2]) -> Result<MapPoint> {
    Ok(MapPoint::try_from_lat_lng_deg(lat, lng)?)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            api,
            map,
            geolocation,
            geocoding,
            gateway,
            ui,
        } = from;

        let raw::Api { url, collection } = api.unwrap_or_default();
        let url = url.trim().to_owned();
        if url.is_empty() {
            return Err(anyhow!("No API URL defined"));
        }
        let collection = collection.trim_matches('/').to_owned();
        if collection.is_empty() {
            return Err(anyhow!("No entry collection defined"));
        }
        let api = Api { url, collection };

        let raw::Map {
            startup,
            default_center,
            zoom,
        } = map.unwrap_or_default();
        let startup = match startup {
            raw::StartupPolicy::FallbackCenter => {
                let center = map_point(default_center).context("Invalid default map center")?;
                StartupPolicy::FallbackCenter(center)
            }
            raw::StartupPolicy::Defer => StartupPolicy::Defer,
        };
        let map = Map { startup, zoom };

        let geolocation_gateway = match geolocation.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gateway = gateway.clone().unwrap_or_default();
                let gw = match gw_name {
                    raw::GeolocationGateway::IpApi => {
                        let raw::IpApi { url } = gateway.ip_api.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        GeolocationGateway::IpApi { url }
                    }
                    raw::GeolocationGateway::Fixed => {
                        let raw::Fixed { position } = gateway.fixed.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let position =
                            map_point(position).context("Invalid fixed geolocation")?;
                        GeolocationGateway::Fixed { position }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geolocation = Geolocation {
            gateway: geolocation_gateway,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::Nominatim => {
                        let raw::Nominatim { endpoint } = gateway.nominatim.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        GeocodingGateway::Nominatim { endpoint }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Ui {
            mobile_breakpoint,
            display_width,
            icon_url,
            icon_retina_url,
            shadow_url,
        } = ui.unwrap_or_default();

        let ui = Ui {
            mobile_breakpoint,
            display_width,
            marker_icons: MarkerIcons {
                icon_url,
                icon_retina_url,
                shadow_url,
            },
        };

        Ok(Self {
            api,
            map,
            geolocation,
            geocoding,
            ui,
        })
    }
}
