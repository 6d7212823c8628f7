//! Map builder for fluent session configuration
//!
//! [`MapBuilder`] composes the stock earthquake map: two tile base layers
//! behind a radio-style control, two empty overlay groups behind checkboxes,
//! and the depth legend built from the session's threshold table.

use crate::{
    constants::{
        ALT_MAP_ID, ALT_MAP_NAME, BASE_MAP_ID, BASE_MAP_NAME, PLATE_BOUNDARIES_ID,
        PLATE_BOUNDARIES_OVERLAY, TREMORS_ID, TREMORS_OVERLAY,
    },
    core::{config::SessionConfig, geo::LatLng, map::Map},
    layers::{group::LayerGroup, tile::TileLayer, tile::TileLayerOptions},
    session::MapSession,
    style::palette::DepthThresholdTable,
    ui::{
        controls::{ControlPosition, LayerControl},
        legend::Legend,
    },
    Result,
};
use std::time::Duration;

/// Builder for creating and configuring map sessions
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    config: SessionConfig,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.config.center = center;
        self.config.zoom = zoom;
        self
    }

    /// Set the host element the view mounts into
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.config.container_id = container_id.into();
        self
    }

    /// Set the tile source behind "Base Map"
    pub fn with_base_map(mut self, options: TileLayerOptions) -> Self {
        self.config.base_map = options;
        self
    }

    /// Set the tile source behind "Alt Map"
    pub fn with_alt_map(mut self, options: TileLayerOptions) -> Self {
        self.config.alt_map = options;
        self
    }

    /// Set the depth bands used for marker colors and the legend
    pub fn with_depth_bands(mut self, table: DepthThresholdTable) -> Self {
        self.config.depth_bands = table;
        self
    }

    pub fn with_legend_position(mut self, position: ControlPosition) -> Self {
        self.config.legend_position = position;
        self
    }

    pub fn with_control_position(mut self, position: ControlPosition) -> Self {
        self.config.control_position = position;
        self
    }

    pub fn with_feed_urls(
        mut self,
        earthquake_url: impl Into<String>,
        plate_boundaries_url: impl Into<String>,
    ) -> Self {
        self.config.earthquake_url = earthquake_url.into();
        self.config.plate_boundaries_url = plate_boundaries_url.into();
        self
    }

    /// Per-request timeout, kept to the millisecond; sub-millisecond
    /// timeouts round up to 1 ms
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.request_timeout_ms =
            timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX).max(1));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build the session. "Base Map" is the active base layer; both overlays
    /// start empty and detached; the legend starts detached.
    pub fn build(self) -> Result<MapSession> {
        let config = self.config;
        config.validate()?;

        let mut map = Map::new(config.map_options())?;
        let mut control = LayerControl::new().with_position(config.control_position);

        for (id, name, options) in [
            (ALT_MAP_ID, ALT_MAP_NAME, &config.alt_map),
            (BASE_MAP_ID, BASE_MAP_NAME, &config.base_map),
        ] {
            map.add_layer(Box::new(TileLayer::with_options(
                id.to_string(),
                name.to_string(),
                options.clone(),
            )))?;
            control.add_base_layer(name, id);
        }

        for (id, name) in [
            (TREMORS_ID, TREMORS_OVERLAY),
            (PLATE_BOUNDARIES_ID, PLATE_BOUNDARIES_OVERLAY),
        ] {
            map.add_layer(Box::new(LayerGroup::new(id.to_string(), name.to_string())))?;
            control.add_overlay(name, id);
        }

        control.select_base(&mut map, BASE_MAP_NAME)?;

        let legend = Legend::from_table(&config.depth_bands, config.legend_position);
        log::debug!(
            "composed map '{}' at ({}, {}) zoom {}",
            config.container_id,
            config.center.lat,
            config.center.lng,
            config.zoom
        );

        Ok(MapSession::from_parts(config, map, control, legend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    #[test]
    fn test_stock_composition() {
        let session = MapBuilder::new().build().unwrap();
        let control = session.control();

        let bases: Vec<&str> = control.base_layers().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(bases, [ALT_MAP_NAME, BASE_MAP_NAME]);
        let overlays: Vec<&str> = control.overlays().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(overlays, [TREMORS_OVERLAY, PLATE_BOUNDARIES_OVERLAY]);

        assert_eq!(session.map().active_base_layer(), Some(BASE_MAP_ID));
        assert!(!session.map().is_attached(ALT_MAP_ID));
        assert!(!session.map().is_attached(TREMORS_ID));
        assert!(!session.map().is_attached(PLATE_BOUNDARIES_ID));
        assert_eq!(session.map().layers().len(), 4);
        assert_eq!(control.position(), ControlPosition::TopRight);
    }

    #[test]
    fn test_builder_overrides() {
        let table = DepthThresholdTable::from_parts(
            &[0.0, 50.0],
            &["#00ff00".parse().unwrap(), "#ff0000".parse().unwrap()],
        )
        .unwrap();

        let session = MapBuilder::new()
            .with_container("quakes")
            .with_center_and_zoom(LatLng::new(35.0, 139.0), 5.0)
            .with_depth_bands(table.clone())
            .with_legend_position(ControlPosition::TopLeft)
            .with_control_position(ControlPosition::BottomLeft)
            .with_request_timeout(Some(Duration::from_millis(200)))
            .build()
            .unwrap();

        assert_eq!(session.map().container_id(), "quakes");
        assert_eq!(session.map().zoom(), 5.0);
        assert_eq!(session.thresholds(), &table);
        assert_eq!(session.legend().entries().len(), 2);
        assert_eq!(session.legend().position(), ControlPosition::TopLeft);
        assert_eq!(session.control().position(), ControlPosition::BottomLeft);
        assert_eq!(session.config().request_timeout_ms, Some(200));
        assert_eq!(
            session.config().request_timeout(),
            Some(Duration::from_millis(200))
        );
    }

    #[test]
    fn test_request_timeout_keeps_fractions() {
        let builder = MapBuilder::new().with_request_timeout(Some(Duration::from_millis(1900)));
        assert_eq!(
            builder.config().request_timeout(),
            Some(Duration::from_millis(1900))
        );

        let builder = builder.with_request_timeout(Some(Duration::from_micros(10)));
        assert_eq!(builder.config().request_timeout_ms, Some(1));

        let builder = builder.with_request_timeout(None);
        assert_eq!(builder.config().request_timeout(), None);
    }

    #[test]
    fn test_invalid_view_fails_build() {
        let result = MapBuilder::new()
            .with_center_and_zoom(LatLng::new(0.0, 0.0), 25.0)
            .build();
        assert!(matches!(result, Err(MapError::Config(_))));
    }
}
