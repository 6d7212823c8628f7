use crate::{layers::base::LayerTrait, MapError, Result};

use crate::prelude::HashMap;

/// Registry of every layer the map knows about, attached or not
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Layer IDs sorted by z-index, ties in insertion order
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer; IDs must be unique
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id '{}'", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Applies a function to each layer mutably in render order
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get_mut(id) {
                f(layer.as_mut());
            }
        }
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::group::LayerGroup;

    fn group(id: &str, z_index: i32) -> Box<dyn LayerTrait> {
        let mut layer = LayerGroup::new(id.to_string(), id.to_uppercase());
        layer.set_z_index(z_index);
        Box::new(layer)
    }

    #[test]
    fn test_render_order_follows_z_index() {
        let mut manager = LayerManager::new();
        manager.add_layer(group("top", 10)).unwrap();
        manager.add_layer(group("bottom", 0)).unwrap();
        manager.add_layer(group("middle", 5)).unwrap();
        manager.add_layer(group("also-bottom", 0)).unwrap();

        let order: Vec<&str> = manager.layers().iter().map(|l| l.id()).collect();
        assert_eq!(order, vec!["bottom", "also-bottom", "middle", "top"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut manager = LayerManager::new();
        manager.add_layer(group("tremors", 0)).unwrap();

        let err = manager.add_layer(group("tremors", 1)).unwrap_err();
        assert!(matches!(err, MapError::Layer(_)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_mutate_in_place() {
        let mut manager = LayerManager::new();
        manager.add_layer(group("a", 0)).unwrap();
        manager.add_layer(group("b", 0)).unwrap();

        assert_eq!(manager.with_layer_mut("a", |l| l.set_visible(false)), Some(()));
        assert!(!manager.get_layer("a").unwrap().is_visible());
        assert!(manager.with_layer_mut("missing", |_| ()).is_none());
        assert_eq!(manager.layers().len(), 2);
        assert!(!manager.is_empty());
    }
}
