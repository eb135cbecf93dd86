use crate::services::geo::GeoPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub code: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&GeoPoint<'_>> for MapMarker {
    fn from(point: &GeoPoint<'_>) -> Self {
        Self {
            code: point.country.code.clone(),
            title: point.country.name.clone(),
            latitude: point.coordinates.latitude,
            longitude: point.coordinates.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Whole-world view the map opens on.
    pub const WORLD: MapRegion = MapRegion {
        latitude: 20.0,
        longitude: 0.0,
        latitude_delta: 100.0,
        longitude_delta: 100.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub region: MapRegion,
    pub markers: Vec<MapMarker>,
}
