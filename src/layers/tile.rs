use crate::{
    constants::{
        MAX_ZOOM, OSM_ATTRIBUTION, OSM_HOT_TILE_URL, OSM_SUBDOMAINS, OSM_TILE_URL, TILE_SIZE,
    },
    core::geo::TileCoord,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    tiles::source::{TileSource, UrlTemplateSource},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl TileLayerOptions {
    /// Standard OpenStreetMap tiles
    pub fn openstreetmap() -> Self {
        Self::default()
    }

    /// Humanitarian (HOT) style served by OpenStreetMap France
    pub fn openstreetmap_hot() -> Self {
        Self {
            url_template: OSM_HOT_TILE_URL.to_string(),
            max_zoom: 19,
            ..Self::default()
        }
    }

    /// Checks the template and the zoom range; `layer` names the layer in errors
    pub fn validate(&self, layer: &str) -> Result<()> {
        if self.url_template.trim().is_empty() {
            return Err(MapError::Config(format!(
                "{}: url_template must not be empty",
                layer
            )));
        }
        if self.min_zoom > self.max_zoom || f64::from(self.max_zoom) > MAX_ZOOM {
            return Err(MapError::Config(format!(
                "{}: zoom range {}..={} must lie within 0..={}",
                layer, self.min_zoom, self.max_zoom, MAX_ZOOM
            )));
        }
        Ok(())
    }
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            subdomains: OSM_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            attribution: OSM_ATTRIBUTION.to_string(),
            tile_size: TILE_SIZE,
            max_zoom: 19,
            min_zoom: 0,
        }
    }
}

/// A base layer backed by a tile server. Holds only the descriptor; fetching
/// and drawing tiles belongs to the renderer. Starts detached.
pub struct TileLayer {
    /// Base layer properties
    properties: LayerProperties,
    /// Tile layer specific options
    options: TileLayerOptions,
    /// Tile source used to expand the URL template
    tile_source: UrlTemplateSource,
}

impl TileLayer {
    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Tile);
        properties.visible = false;
        let tile_source =
            UrlTemplateSource::new(options.url_template.clone(), options.subdomains.clone());

        Self {
            properties,
            options,
            tile_source,
        }
    }

    /// Create a tile layer for OpenStreetMap
    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::openstreetmap())
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// URL of one tile, `None` outside the layer's zoom range or tile grid
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        if coord.z < self.options.min_zoom || coord.z > self.options.max_zoom || !coord.is_valid()
        {
            return None;
        }
        Some(self.tile_source.url(coord))
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url_template": self.options.url_template,
            "subdomains": self.options.subdomains,
            "attribution": self.options.attribution,
            "tile_size": self.options.tile_size,
            "min_zoom": self.options.min_zoom,
            "max_zoom": self.options.max_zoom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_url_respects_zoom_range() {
        let mut options = TileLayerOptions::openstreetmap();
        options.min_zoom = 2;
        options.max_zoom = 4;
        let layer = TileLayer::with_options("osm".to_string(), "OSM".to_string(), options);

        assert_eq!(
            layer.tile_url(TileCoord::new(1, 3, 3)).as_deref(),
            Some("https://b.tile.openstreetmap.org/3/1/3.png")
        );
        assert!(layer.tile_url(TileCoord::new(0, 0, 1)).is_none());
        assert!(layer.tile_url(TileCoord::new(0, 0, 5)).is_none());
        assert!(layer.tile_url(TileCoord::new(9, 0, 3)).is_none());
    }

    #[test]
    fn test_tile_layer_options_json() {
        let layer = TileLayer::with_options(
            "alt".to_string(),
            "Alt Map".to_string(),
            TileLayerOptions::openstreetmap_hot(),
        );

        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(layer.name(), "Alt Map");
        let options = layer.options();
        assert_eq!(options["url_template"], OSM_HOT_TILE_URL);
        assert_eq!(options["attribution"], OSM_ATTRIBUTION);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: TileLayerOptions =
            serde_json::from_str(r#"{"url_template": "https://tiles.example/{z}/{x}/{y}.png"}"#)
                .unwrap();
        assert_eq!(options.url_template, "https://tiles.example/{z}/{x}/{y}.png");
        assert_eq!(options.tile_size, TILE_SIZE);
        assert_eq!(options.subdomains.len(), 3);
    }

    #[test]
    fn test_options_validation() {
        assert!(TileLayerOptions::openstreetmap().validate("Base Map").is_ok());

        let deep: TileLayerOptions = serde_json::from_str(r#"{"max_zoom": 40}"#).unwrap();
        assert!(matches!(deep.validate("Base Map"), Err(MapError::Config(_))));

        let inverted = TileLayerOptions {
            min_zoom: 10,
            max_zoom: 5,
            ..TileLayerOptions::default()
        };
        assert!(inverted.validate("Alt Map").is_err());

        let blank = TileLayerOptions {
            url_template: "  ".to_string(),
            ..TileLayerOptions::default()
        };
        assert!(blank.validate("Alt Map").is_err());
    }

    #[test]
    fn test_tile_url_beyond_grid_depth() {
        let options = TileLayerOptions {
            max_zoom: 40,
            ..TileLayerOptions::default()
        };
        let layer = TileLayer::with_options("deep".to_string(), "Deep".to_string(), options);

        assert!(layer.tile_url(TileCoord::new(0, 0, 32)).is_some());
        assert!(layer.tile_url(TileCoord::new(0, 0, 41)).is_none());
    }
}
