//! # quakemap
//!
//! Composes an interactive earthquake map in the Leaflet style: two
//! switchable tile base layers, a "Tremors" overlay of circle markers styled
//! by depth and magnitude, a "Plate Boundaries" overlay of polylines, a
//! layer-selection control and a depth legend.
//!
//! Rendering is left to whoever consumes the [`session::MapSnapshot`]; this
//! crate owns classification, styling, layer composition and data loading.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod session;
pub mod style;
pub mod tiles;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::SessionConfig,
    geo::{LatLng, LatLngBounds, TileCoord},
    map::Map,
};

pub use layers::{
    base::LayerTrait, group::LayerGroup, marker::CircleMarker, tile::TileLayer, vector::Polyline,
};

pub use style::{
    classifier::{color_for_depth, radius_for_magnitude},
    feature::{popup_text_for, style_for, StyleDescriptor},
    palette::{Color, DepthBand, DepthThresholdTable},
};

pub use ui::{controls::LayerControl, legend::Legend, popup::Popup};

pub use data::{
    geojson::{EarthquakeFeature, FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry},
    loader::{DataLoader, FeatureSource, FetchError, HttpFeatureSource, LoadReport},
};

pub use session::{MapSession, MapSnapshot};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` with an `info` default that `RUST_LOG` overrides.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
