use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// GeoJSON position: `[longitude, latitude]` with an optional third value
/// (depth in the earthquake feed, elevation elsewhere)
pub type Position = Vec<f64>;

/// GeoJSON feature types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    /// Looks up a property, treating JSON `null` as absent
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties
            .as_ref()
            .and_then(|p| p.get(key))
            .filter(|v| !v.is_null())
    }
}

/// Root GeoJSON object: a collection, a single feature or a bare geometry
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

impl<'de> Deserialize<'de> for GeoJson {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawCollection {
            features: Vec<GeoJsonFeature>,
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| D::Error::custom("GeoJSON object without a \"type\""))?;

        let parsed = match kind.as_str() {
            "FeatureCollection" => serde_json::from_value::<RawCollection>(value)
                .map(|raw| GeoJson::FeatureCollection {
                    features: raw.features,
                }),
            "Feature" => serde_json::from_value(value).map(GeoJson::Feature),
            _ => serde_json::from_value(value).map(GeoJson::Geometry),
        };
        parsed.map_err(D::Error::custom)
    }
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| MapError::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    /// Unwraps a feature collection; a lone feature becomes a one-item collection
    pub fn into_collection(self) -> Option<FeatureCollection> {
        match self {
            GeoJson::FeatureCollection { features } => Some(FeatureCollection { features }),
            GeoJson::Feature(feature) => Some(FeatureCollection {
                features: vec![feature],
            }),
            GeoJson::Geometry(_) => None,
        }
    }
}

/// The list of features carried by one remote dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Earthquake records paired with their index in the feed. Features
    /// without a usable point geometry are skipped.
    pub fn earthquakes(&self) -> Vec<(usize, EarthquakeFeature)> {
        self.features
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let quake = EarthquakeFeature::from_feature(feature);
                if quake.is_none() {
                    log::debug!(
                        "skipping earthquake feature {} ({:?}) with unusable geometry",
                        index,
                        feature.id
                    );
                }
                quake.map(|quake| (index, quake))
            })
            .collect()
    }
}

/// One earthquake as read from the feed. Never mutated after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub position: LatLng,
    /// Third coordinate of the point, 0 when the feed omits it
    pub depth: f64,
    /// `properties.mag`, 0 when null or missing
    pub magnitude: f64,
    pub place: Option<String>,
}

impl EarthquakeFeature {
    /// Extracts an earthquake from a point feature, `None` for other
    /// geometries and for points with fewer than two coordinates
    pub fn from_feature(feature: &GeoJsonFeature) -> Option<Self> {
        let coordinates = match feature.geometry.as_ref()? {
            GeoJsonGeometry::Point { coordinates } => coordinates,
            _ => return None,
        };
        let position = LatLng::from_position(coordinates)?;

        let id = feature.id.as_ref().map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        Some(Self {
            id,
            position,
            depth: coordinates.get(2).copied().unwrap_or(0.0),
            magnitude: feature
                .property("mag")
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0),
            place: feature
                .property("place")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        })
    }
}

impl GeoJsonGeometry {
    /// Line paths of the geometry: line strings as-is, polygon rings as closed
    /// paths. Points contribute nothing.
    pub fn to_paths(&self) -> Vec<Vec<LatLng>> {
        fn path(positions: &[Position]) -> Vec<LatLng> {
            positions
                .iter()
                .filter_map(|p| LatLng::from_position(p))
                .collect()
        }

        match self {
            GeoJsonGeometry::Point { .. } | GeoJsonGeometry::MultiPoint { .. } => Vec::new(),
            GeoJsonGeometry::LineString { coordinates } => vec![path(coordinates)],
            GeoJsonGeometry::MultiLineString { coordinates }
            | GeoJsonGeometry::Polygon { coordinates } => {
                coordinates.iter().map(|line| path(line)).collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(|ring| path(ring)))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.to_paths()).collect()
            }
        }
    }
}
