use itertools::Itertools;
use thiserror::Error;

/// Latitude in decimal degrees (WGS84).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid(self) -> bool {
        self.0 >= Self::DEG_MIN && self.0 <= Self::DEG_MAX
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        Some(Self(deg.into())).filter(|lat| lat.is_valid())
    }
}

impl Default for LatCoord {
    fn default() -> Self {
        let res = Self(f64::NAN);
        debug_assert!(!res.is_valid());
        res
    }
}

impl std::fmt::Display for LatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Longitude in decimal degrees (WGS84).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid(self) -> bool {
        self.0 >= Self::DEG_MIN && self.0 <= Self::DEG_MAX
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        Some(Self(deg.into())).filter(|lng| lng.is_valid())
    }
}

impl Default for LngCoord {
    fn default() -> Self {
        let res = Self(f64::NAN);
        debug_assert!(!res.is_valid());
        res
    }
}

impl std::fmt::Display for LngCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A geographical location on a (flat) map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapPointParseError {
    #[error("Invalid latitude degrees: {0}")]
    Lat(f64),
    #[error("Invalid longitude degrees: {0}")]
    Lng(f64),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error("Expected '<lat>,<lng>' but got '{0}'")]
    Format(String),
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Result<Self, MapPointParseError> {
        let (lat, lng) = (lat.into(), lng.into());
        let lat = LatCoord::try_from_deg(lat).ok_or(MapPointParseError::Lat(lat))?;
        let lng = LngCoord::try_from_deg(lng).ok_or(MapPointParseError::Lng(lng))?;
        Ok(Self::new(lat, lng))
    }

    fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, MapPointParseError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| MapPointParseError::Number(s.trim().to_owned()))
        };
        Self::try_from_lat_lng_deg(parse(lat_deg_str)?, parse(lng_deg_str)?)
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((lat_deg_str, lng_deg_str)) = s.split(',').collect_tuple() {
            MapPoint::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
        } else {
            Err(MapPointParseError::Format(s.to_owned()))
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_000.0);

impl MapPoint {
    /// Approximate the distance between two points with an
    /// equirectangular projection.
    ///
    /// Both points are projected onto a local tangent plane, using the
    /// cosine of the mean latitude to scale the longitude difference,
    /// and then combined with Pythagoras. The result is only accurate
    /// for short, intra-city ranges, which is all the browse list
    /// needs. It is considerably cheaper than a great-circle formula.
    ///
    /// Reference: <https://www.movable-type.co.uk/scripts/latlong.html>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }
        if p1 == p2 {
            return Some(Distance::from_meters(0.0));
        }

        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let x = (lng2_rad - lng1_rad) * ((lat1_rad + lat2_rad) / 2.0).cos();
        let y = lat2_rad - lat1_rad;

        Some(Distance::from_meters(
            MEAN_EARTH_RADIUS.to_meters() * x.hypot(y),
        ))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn latitude() {
        assert!(!LatCoord::default().is_valid());
        assert!(LatCoord::default().to_deg().is_nan());
        assert_eq!(LatCoord::min(), LatCoord::from_deg(-90));
        assert_eq!(LatCoord::max(), LatCoord::from_deg(90));
        assert_eq!(None, LatCoord::try_from_deg(-90.000001));
        assert_eq!(None, LatCoord::try_from_deg(90.000001));
        assert_eq!(None, LatCoord::try_from_deg(f64::NAN));
    }

    #[test]
    fn longitude() {
        assert!(!LngCoord::default().is_valid());
        assert!(LngCoord::default().to_deg().is_nan());
        assert_eq!(LngCoord::min(), LngCoord::from_deg(-180));
        assert_eq!(LngCoord::max(), LngCoord::from_deg(180));
        assert_eq!(None, LngCoord::try_from_deg(-180.000001));
        assert_eq!(None, LngCoord::try_from_deg(180.000001));
    }

    #[test]
    fn parse_map_point() {
        let p: MapPoint = "35.001, 139.001".parse().unwrap();
        assert_eq!(p.to_lat_lng_deg(), (35.001, 139.001));
        assert_eq!(
            "91.0,0".parse::<MapPoint>(),
            Err(MapPointParseError::Lat(91.0))
        );
        assert_eq!(
            "0,-181".parse::<MapPoint>(),
            Err(MapPointParseError::Lng(-181.0))
        );
        assert!(matches!(
            "abc,1".parse::<MapPoint>(),
            Err(MapPointParseError::Number(_))
        ));
        assert!(matches!(
            "1,2,3".parse::<MapPoint>(),
            Err(MapPointParseError::Format(_))
        ));
    }

    #[test]
    fn no_distance() {
        let p1 = MapPoint::from_lat_lng_deg(0.0, 0.0);
        assert_eq!(MapPoint::distance(p1, p1).unwrap().to_meters(), 0.0);

        let p2 = MapPoint::from_lat_lng_deg(-25.0, 55.0);
        assert_eq!(MapPoint::distance(p2, p2).unwrap().to_meters(), 0.0);

        let p3 = MapPoint::from_lat_lng_deg(35.6895, 139.6917);
        assert_eq!(MapPoint::distance(p3, p3).unwrap().to_meters(), 0.0);
    }

    #[test]
    fn short_distance() {
        let center = MapPoint::from_lat_lng_deg(35.0, 139.0);
        let clicked = MapPoint::from_lat_lng_deg(35.001, 139.001);
        let d = MapPoint::distance(center, clicked).unwrap().to_meters();
        assert!((d - 143.7).abs() < 0.5, "{d}");

        // one thousandth of a degree along a meridian
        let north = MapPoint::from_lat_lng_deg(35.001, 139.0);
        let d = MapPoint::distance(center, north).unwrap().to_meters();
        assert!((d - 111.19).abs() < 0.01, "{d}");
    }

    #[test]
    fn close_to_great_circle_within_a_city() {
        // Stuttgart main station -> Stuttgart TV tower, roughly 3.2 km
        let a = MapPoint::from_lat_lng_deg(48.7840, 9.1829);
        let b = MapPoint::from_lat_lng_deg(48.7559, 9.1901);
        let d = MapPoint::distance(a, b).unwrap().to_meters();
        assert!(d > 3_000.0 && d < 3_300.0, "{d}");
    }

    #[test]
    fn symmetric_distance() {
        let a = MapPoint::from_lat_lng_deg(48.0, 9.0);
        let b = MapPoint::from_lat_lng_deg(48.1, 9.2);
        assert_eq!(
            MapPoint::distance(a, b).unwrap(),
            MapPoint::distance(b, a).unwrap()
        );
    }

    #[test]
    fn distance_with_invalid_coordinates() {
        let a = MapPoint::new(LatCoord::from_deg(10.0), Default::default());
        let b = MapPoint::from_lat_lng_deg(20.0, 20.0);
        assert_eq!(None, MapPoint::distance(a, b));
    }

    #[test]
    fn positive_distance_regressions() {
        let p1 = MapPoint::from_lat_lng_deg(-81.2281041784343, 77.75747775927069);
        let p2 = MapPoint::from_lat_lng_deg(40.92116510538438, -93.33303223984923);
        assert!(MapPoint::distance(p1, p2).unwrap().is_valid());

        let p1 = MapPoint::from_lat_lng_deg(67.01568147028595, 122.10276824520099);
        let p2 = MapPoint::from_lat_lng_deg(-87.84709362678561, 132.71691422570353);
        assert!(MapPoint::distance(p1, p2).unwrap().is_valid());
    }
}
