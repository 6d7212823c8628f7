use crate::{
    constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAP_CONTAINER_ID, MAX_ZOOM, MIN_ZOOM},
    core::geo::LatLng,
    layers::{
        base::{LayerTrait, LayerType},
        group::LayerGroup,
        manager::LayerManager,
    },
    MapError, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Identifier of the host element the view mounts into
    pub container_id: String,
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container_id: MAP_CONTAINER_ID.to_string(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// The map view: its viewport and every layer registered with it.
///
/// A registered layer is drawn only while attached (`is_visible()`). At most
/// one tile layer is attached at any time.
pub struct Map {
    options: MapOptions,
    layers: LayerManager,
}

impl Map {
    pub fn new(options: MapOptions) -> Result<Self> {
        Self::validate_view(&options)?;
        Ok(Self {
            options,
            layers: LayerManager::new(),
        })
    }

    fn validate_view(options: &MapOptions) -> Result<()> {
        let (center, zoom) = (options.center, options.zoom);
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {}) is out of range",
                center.lat, center.lng
            )));
        }
        if !(options.min_zoom..=options.max_zoom).contains(&zoom) {
            return Err(MapError::Config(format!(
                "zoom {} outside [{}, {}]",
                zoom, options.min_zoom, options.max_zoom
            )));
        }
        Ok(())
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn container_id(&self) -> &str {
        &self.options.container_id
    }

    pub fn center(&self) -> LatLng {
        self.options.center
    }

    pub fn zoom(&self) -> f64 {
        self.options.zoom
    }

    /// Registers a layer; whether it starts attached is the layer's own
    /// visibility flag. An attached tile layer replaces the active base layer.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        log::debug!("registering {} layer '{}'", layer.layer_type(), layer.id());
        let layer_id = layer.id().to_string();
        let becomes_base = layer.layer_type() == LayerType::Tile && layer.is_visible();

        self.layers.add_layer(layer)?;
        if becomes_base {
            self.set_base_layer(&layer_id)?;
        }
        Ok(())
    }

    pub fn layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    fn set_attached(&mut self, layer_id: &str, attached: bool) -> Result<()> {
        self.layers
            .with_layer_mut(layer_id, |layer| layer.set_visible(attached))
            .ok_or_else(|| MapError::Layer(format!("unknown layer '{}'", layer_id)))
    }

    pub fn attach_layer(&mut self, layer_id: &str) -> Result<()> {
        if self.layer(layer_id).map(|l| l.layer_type()) == Some(LayerType::Tile) {
            return self.set_base_layer(layer_id);
        }
        self.set_attached(layer_id, true)
    }

    pub fn detach_layer(&mut self, layer_id: &str) -> Result<()> {
        self.set_attached(layer_id, false)
    }

    pub fn is_attached(&self, layer_id: &str) -> bool {
        self.layer(layer_id).is_some_and(|l| l.is_visible())
    }

    /// Makes `layer_id` the only attached tile layer
    pub fn set_base_layer(&mut self, layer_id: &str) -> Result<()> {
        match self.layer(layer_id).map(|l| l.layer_type()) {
            Some(LayerType::Tile) => {}
            Some(other) => {
                return Err(MapError::Layer(format!(
                    "'{}' is a {} layer, not a base layer",
                    layer_id, other
                )))
            }
            None => return Err(MapError::Layer(format!("unknown layer '{}'", layer_id))),
        }

        self.layers.for_each_layer_mut(|layer| {
            if layer.layer_type() == LayerType::Tile {
                layer.set_visible(layer.id() == layer_id);
            }
        });
        Ok(())
    }

    /// ID of the attached tile layer
    pub fn active_base_layer(&self) -> Option<&str> {
        self.layers
            .layers()
            .into_iter()
            .find(|l| l.layer_type() == LayerType::Tile && l.is_visible())
            .map(|l| l.id())
    }

    /// Runs `f` against a registered overlay group
    pub fn with_group_mut<F, R>(&mut self, group_id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut LayerGroup) -> R,
    {
        self.layers
            .with_layer_mut(group_id, |layer| {
                layer.as_any_mut().downcast_mut::<LayerGroup>().map(f)
            })
            .ok_or_else(|| MapError::Layer(format!("unknown layer '{}'", group_id)))?
            .ok_or_else(|| MapError::Layer(format!("'{}' is not a layer group", group_id)))
    }

    pub fn group(&self, group_id: &str) -> Option<&LayerGroup> {
        self.layer(group_id)
            .and_then(|l| l.as_any().downcast_ref::<LayerGroup>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::tile::{TileLayer, TileLayerOptions};

    fn map_with_bases() -> Map {
        let mut map = Map::new(MapOptions::default()).unwrap();
        map.add_layer(Box::new(TileLayer::openstreetmap(
            "base".to_string(),
            "Base Map".to_string(),
        )))
        .unwrap();
        map.add_layer(Box::new(TileLayer::with_options(
            "alt".to_string(),
            "Alt Map".to_string(),
            TileLayerOptions::openstreetmap_hot(),
        )))
        .unwrap();
        map.add_layer(Box::new(LayerGroup::new(
            "tremors".to_string(),
            "Tremors".to_string(),
        )))
        .unwrap();
        map
    }

    #[test]
    fn test_default_view() {
        let map = Map::new(MapOptions::default()).unwrap();
        assert_eq!(map.center(), LatLng::new(39.8283, -98.5795));
        assert_eq!(map.zoom(), 3.0);
        assert_eq!(map.container_id(), "map");
    }

    #[test]
    fn test_invalid_view_rejected() {
        let options = MapOptions {
            zoom: 42.0,
            ..MapOptions::default()
        };
        assert!(matches!(Map::new(options), Err(MapError::Config(_))));

        let options = MapOptions {
            center: LatLng::new(120.0, 0.0),
            ..MapOptions::default()
        };
        assert!(matches!(
            Map::new(options),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_single_base_layer() {
        let mut map = map_with_bases();
        assert_eq!(map.active_base_layer(), None);

        map.set_base_layer("base").unwrap();
        assert_eq!(map.active_base_layer(), Some("base"));
        assert!(!map.is_attached("alt"));

        map.attach_layer("alt").unwrap();
        assert_eq!(map.active_base_layer(), Some("alt"));
        assert!(!map.is_attached("base"));

        assert!(map.set_base_layer("tremors").is_err());
        assert!(map.set_base_layer("nope").is_err());
        assert_eq!(map.active_base_layer(), Some("alt"));
    }

    #[test]
    fn test_attached_tile_layer_replaces_base() {
        let mut map = map_with_bases();
        map.set_base_layer("base").unwrap();

        let mut extra = TileLayer::openstreetmap("extra".to_string(), "Extra".to_string());
        extra.set_visible(true);
        map.add_layer(Box::new(extra)).unwrap();

        assert_eq!(map.active_base_layer(), Some("extra"));
        assert!(!map.is_attached("base"));
    }

    #[test]
    fn test_group_access() {
        let mut map = map_with_bases();
        assert!(!map.is_attached("tremors"));

        let count = map.with_group_mut("tremors", |g| g.len()).unwrap();
        assert_eq!(count, 0);
        assert!(map.with_group_mut("base", |g| g.len()).is_err());
        assert!(map.with_group_mut("missing", |g| g.len()).is_err());

        map.attach_layer("tremors").unwrap();
        assert!(map.is_attached("tremors"));
        map.detach_layer("tremors").unwrap();
        assert!(!map.is_attached("tremors"));
        assert!(map.group("tremors").is_some());
    }
}
