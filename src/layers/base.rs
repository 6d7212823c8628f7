use crate::core::geo::LatLngBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Vector,
    Marker,
    Group,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Vector => write!(f, "vector"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    /// Whether the layer is currently attached to the map
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Anything that can live in a [`LayerManager`](crate::layers::manager::LayerManager)
/// or a [`LayerGroup`](crate::layers::group::LayerGroup)
pub trait LayerTrait: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    fn set_z_index(&mut self, z_index: i32);

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Renderer-facing description of the layer
    fn options(&self) -> serde_json::Value;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            "Test Layer".to_string(),
            LayerType::Vector,
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.layer_type, LayerType::Vector);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Vector.to_string(), "vector");
        assert_eq!(LayerType::Marker.to_string(), "marker");
        assert_eq!(LayerType::Group.to_string(), "group");
    }
}
