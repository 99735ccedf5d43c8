use pitstop_entities::geo::MapPoint;

pub trait GeoCodingGateway {
    fn resolve_address(&self, pos: MapPoint) -> Option<String>;
}
