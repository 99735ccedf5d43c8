use crate::gateways::geolocation;
use pitstop_entities::geo::MapPoint;

/// What to show until the position of the user is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartupPolicy {
    /// Center the map on the given point right away.
    FallbackCenter(MapPoint),
    /// Render no map and no distances at all.
    Defer,
}

impl Default for StartupPolicy {
    fn default() -> Self {
        Self::FallbackCenter(MapPoint::from_lat_lng_deg(35.6895, 139.6917))
    }
}

/// Owns the coordinate the map is centered on.
#[derive(Debug, Clone)]
pub struct ViewportController {
    center: Option<MapPoint>,
}

impl ViewportController {
    pub fn new(policy: StartupPolicy) -> Self {
        let center = match policy {
            StartupPolicy::FallbackCenter(pos) => Some(pos).filter(|p| p.is_valid()),
            StartupPolicy::Defer => None,
        };
        Self { center }
    }

    pub const fn center(&self) -> Option<MapPoint> {
        self.center
    }

    pub const fn is_known(&self) -> bool {
        self.center.is_some()
    }

    pub fn on_located(&mut self, pos: MapPoint) -> bool {
        self.adopt(pos)
    }

    /// The current center stays as it is.
    pub fn on_locate_failed(&mut self, err: &geolocation::Error) {
        match self.center {
            Some(center) => log::warn!("Geolocation failed ({err}), staying at {center}"),
            None => log::warn!("Geolocation failed ({err}), the map center is still unknown"),
        }
    }

    /// Adopt the center reported by the map after it has been dragged.
    pub fn on_map_moved(&mut self, pos: MapPoint) -> bool {
        self.adopt(pos)
    }

    fn adopt(&mut self, pos: MapPoint) -> bool {
        if !pos.is_valid() {
            log::warn!("Ignoring invalid map center {pos}");
            return false;
        }
        self.center = Some(pos);
        true
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(StartupPolicy::default())
    }
}
