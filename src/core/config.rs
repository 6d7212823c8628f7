//! Session configuration
//!
//! Every field defaults to the values in [`crate::constants`], so an empty
//! JSON object (or no file at all) yields the stock earthquake map. A config
//! file only needs the keys it overrides.

use crate::{
    constants::{
        DEFAULT_CENTER, DEFAULT_ZOOM, EARTHQUAKE_FEED_URL, MAP_CONTAINER_ID, MAX_ZOOM, MIN_ZOOM,
        PLATE_BOUNDARIES_URL,
    },
    core::{geo::LatLng, map::MapOptions},
    layers::tile::TileLayerOptions,
    style::palette::DepthThresholdTable,
    ui::controls::ControlPosition,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Host element the map view mounts into
    pub container_id: String,
    pub center: LatLng,
    pub zoom: f64,
    /// Earthquake feed (GeoJSON point features)
    pub earthquake_url: String,
    /// Plate boundary dataset (GeoJSON line features)
    pub plate_boundaries_url: String,
    /// Tile source for the "Base Map" base layer
    pub base_map: TileLayerOptions,
    /// Tile source for the "Alt Map" base layer
    pub alt_map: TileLayerOptions,
    /// Depth bands shared by marker colors and the legend
    pub depth_bands: DepthThresholdTable,
    /// Per-request timeout in milliseconds; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
    pub legend_position: ControlPosition,
    /// Corner of the base layer / overlay selector
    pub control_position: ControlPosition,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            container_id: MAP_CONTAINER_ID.to_string(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            earthquake_url: EARTHQUAKE_FEED_URL.to_string(),
            plate_boundaries_url: PLATE_BOUNDARIES_URL.to_string(),
            base_map: TileLayerOptions::openstreetmap(),
            alt_map: TileLayerOptions::openstreetmap_hot(),
            depth_bands: DepthThresholdTable::default(),
            request_timeout_ms: None,
            legend_position: ControlPosition::BottomRight,
            control_position: ControlPosition::TopRight,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading session config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks the parts serde cannot: the view, the feed URLs and both tile
    /// sources. The threshold table validates itself on deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center ({}, {}) is out of range",
                self.center.lat, self.center.lng
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MapError::Config(format!(
                "zoom {} outside [{}, {}]",
                self.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        for (key, url) in [
            ("earthquake_url", &self.earthquake_url),
            ("plate_boundaries_url", &self.plate_boundaries_url),
        ] {
            if url.trim().is_empty() {
                return Err(MapError::Config(format!("{} must not be empty", key)));
            }
        }
        self.base_map.validate("base_map")?;
        self.alt_map.validate("alt_map")?;
        if self.request_timeout_ms == Some(0) {
            return Err(MapError::Config(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            container_id: self.container_id.clone(),
            center: self.center,
            zoom: self.zoom,
            ..MapOptions::default()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
