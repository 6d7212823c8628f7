//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::SessionConfig,
    geo::{LatLng, LatLngBounds, TileCoord},
    map::{Map, MapOptions},
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    group::LayerGroup,
    manager::LayerManager,
    marker::CircleMarker,
    tile::{TileLayer, TileLayerOptions},
    vector::{LineStyle, Polyline},
};

pub use crate::style::{
    classifier::{color_for_depth, radius_for_magnitude},
    feature::{popup_text_for, style_for, StyleDescriptor},
    palette::{Color, DepthBand, DepthThresholdTable},
};

pub use crate::ui::{
    controls::{ControlPosition, LayerControl},
    legend::{Legend, LegendEntry},
    popup::Popup,
};

pub use crate::data::{
    geojson::{EarthquakeFeature, FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry},
    loader::{DataLoader, Dataset, FeatureSource, FetchError, HttpFeatureSource, LoadReport},
};

pub use crate::session::{MapSession, MapSnapshot};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
