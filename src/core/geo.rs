use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate from a GeoJSON position (`[lng, lat, ...]`)
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Smallest bounds holding every point, `None` for an empty iterator
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bounds = Self::new(first, first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        // every u32 index fits the grid from z = 32 on
        let max_coord = 1_u64.checked_shl(self.z as u32).unwrap_or(u64::MAX);
        u64::from(self.x) < max_coord && u64::from(self.y) < max_coord
    }
}
