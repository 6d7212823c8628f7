use crate::{core::map::Map, MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Corner of the map view a control is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl fmt::Display for ControlPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        };
        f.write_str(name)
    }
}

impl Default for ControlPosition {
    fn default() -> Self {
        Self::TopRight
    }
}

/// One row of the layer control: display name and the layer it drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlEntry {
    pub name: String,
    pub layer_id: String,
}

/// Layer-selection control.
///
/// Base layers behave like radio buttons: selecting one detaches every other
/// tile layer on the map. Overlays behave like checkboxes and toggle
/// independently. Rows keep their registration order.
#[derive(Debug, Clone, Default)]
pub struct LayerControl {
    base_layers: Vec<ControlEntry>,
    overlays: Vec<ControlEntry>,
    position: ControlPosition,
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    pub fn add_base_layer(&mut self, name: &str, layer_id: &str) {
        self.base_layers.push(ControlEntry {
            name: name.to_string(),
            layer_id: layer_id.to_string(),
        });
    }

    pub fn add_overlay(&mut self, name: &str, layer_id: &str) {
        self.overlays.push(ControlEntry {
            name: name.to_string(),
            layer_id: layer_id.to_string(),
        });
    }

    pub fn base_layers(&self) -> &[ControlEntry] {
        &self.base_layers
    }

    pub fn overlays(&self) -> &[ControlEntry] {
        &self.overlays
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }

    pub fn base_layer_id(&self, name: &str) -> Option<&str> {
        Self::find(&self.base_layers, name)
    }

    pub fn overlay_id(&self, name: &str) -> Option<&str> {
        Self::find(&self.overlays, name)
    }

    fn find<'a>(entries: &'a [ControlEntry], name: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.layer_id.as_str())
    }

    /// Activates the base layer named `name`; the previous one is detached
    pub fn select_base(&self, map: &mut Map, name: &str) -> Result<()> {
        let layer_id = self
            .base_layer_id(name)
            .ok_or_else(|| MapError::Layer(format!("no base layer named '{}'", name)))?;
        log::debug!("selecting base layer '{}'", name);
        map.set_base_layer(layer_id)
    }

    /// Name of the base layer currently drawn
    pub fn active_base(&self, map: &Map) -> Option<&str> {
        let active = map.active_base_layer()?;
        self.base_layers
            .iter()
            .find(|e| e.layer_id == active)
            .map(|e| e.name.as_str())
    }

    /// Flips an overlay's attachment and returns the new state
    pub fn toggle_overlay(&self, map: &mut Map, name: &str) -> Result<bool> {
        let attached = !self.is_overlay_attached(map, name)?;
        self.set_overlay(map, name, attached)?;
        Ok(attached)
    }

    pub fn set_overlay(&self, map: &mut Map, name: &str, attached: bool) -> Result<()> {
        let layer_id = self.require_overlay(name)?;
        if attached {
            map.attach_layer(layer_id)
        } else {
            map.detach_layer(layer_id)
        }
    }

    pub fn is_overlay_attached(&self, map: &Map, name: &str) -> Result<bool> {
        let layer_id = self.require_overlay(name)?;
        Ok(map.is_attached(layer_id))
    }

    fn require_overlay(&self, name: &str) -> Result<&str> {
        self.overlay_id(name)
            .ok_or_else(|| MapError::Layer(format!("no overlay named '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::MapOptions;
    use crate::layers::{group::LayerGroup, tile::TileLayer};

    fn setup() -> (Map, LayerControl) {
        let mut map = Map::new(MapOptions::default()).unwrap();
        map.add_layer(Box::new(TileLayer::openstreetmap(
            "alt".to_string(),
            "Alt Map".to_string(),
        )))
        .unwrap();
        map.add_layer(Box::new(TileLayer::openstreetmap(
            "base".to_string(),
            "Base Map".to_string(),
        )))
        .unwrap();
        map.add_layer(Box::new(LayerGroup::new(
            "tremors".to_string(),
            "Tremors".to_string(),
        )))
        .unwrap();
        map.add_layer(Box::new(LayerGroup::new(
            "plates".to_string(),
            "Plate Boundaries".to_string(),
        )))
        .unwrap();

        let mut control = LayerControl::new();
        control.add_base_layer("Alt Map", "alt");
        control.add_base_layer("Base Map", "base");
        control.add_overlay("Tremors", "tremors");
        control.add_overlay("Plate Boundaries", "plates");
        (map, control)
    }

    #[test]
    fn test_position_names() {
        assert_eq!(ControlPosition::BottomRight.to_string(), "bottomright");
        assert_eq!(
            serde_json::to_value(ControlPosition::TopLeft).unwrap(),
            "topleft"
        );
        assert_eq!(ControlPosition::default(), ControlPosition::TopRight);
    }

    #[test]
    fn test_select_base_is_exclusive() {
        let (mut map, control) = setup();

        for name in ["Alt Map", "Base Map", "Base Map", "Alt Map"] {
            control.select_base(&mut map, name).unwrap();
            assert_eq!(control.active_base(&map), Some(name));
            let attached_tiles = control
                .base_layers()
                .iter()
                .filter(|e| map.is_attached(&e.layer_id))
                .count();
            assert_eq!(attached_tiles, 1);
        }

        let err = control.select_base(&mut map, "Satellite").unwrap_err();
        assert!(matches!(err, MapError::Layer(_)));
        assert_eq!(control.active_base(&map), Some("Alt Map"));
    }

    #[test]
    fn test_overlays_toggle_independently() {
        let (mut map, control) = setup();

        assert!(control.toggle_overlay(&mut map, "Tremors").unwrap());
        assert!(!control.is_overlay_attached(&map, "Plate Boundaries").unwrap());

        assert!(control.toggle_overlay(&mut map, "Plate Boundaries").unwrap());
        assert!(control.is_overlay_attached(&map, "Tremors").unwrap());

        assert!(!control.toggle_overlay(&mut map, "Tremors").unwrap());
        assert!(control.is_overlay_attached(&map, "Plate Boundaries").unwrap());

        assert!(control.toggle_overlay(&mut map, "Faults").is_err());
    }

    #[test]
    fn test_entries_keep_order() {
        let (_, control) = setup();
        let names: Vec<&str> = control.overlays().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Tremors", "Plate Boundaries"]);
        assert_eq!(control.base_layer_id("Base Map"), Some("base"));
        assert_eq!(control.overlay_id("Base Map"), None);
    }
}
