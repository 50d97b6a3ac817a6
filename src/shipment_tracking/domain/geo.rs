use serde::Serialize;

/// A point on the map, stored as longitude/latitude like the basemap expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `[lon, lat]` pair in the order the layer library consumes.
    pub fn as_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Where a destination's coordinates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSource {
    Port,
    /// Port unknown, country centroid used instead
    Country,
}
