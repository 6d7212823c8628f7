use crate::{
    core::geo::LatLngBounds,
    layers::base::{LayerProperties, LayerTrait, LayerType},
};

/// Overlay container: a named, toggleable collection of map elements.
///
/// A group starts detached (`is_visible() == false`) and is attached once its
/// data has arrived.
pub struct LayerGroup {
    properties: LayerProperties,
    children: Vec<Box<dyn LayerTrait>>,
}

impl LayerGroup {
    pub fn new(id: String, name: String) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Group);
        properties.visible = false;
        Self {
            properties,
            children: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) {
        self.children.push(layer);
    }

    pub fn extend<I>(&mut self, layers: I)
    where
        I: IntoIterator<Item = Box<dyn LayerTrait>>,
    {
        self.children.extend(layers);
    }

    pub fn layers(&self) -> impl Iterator<Item = &dyn LayerTrait> {
        self.children.iter().map(|l| l.as_ref())
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl LayerTrait for LayerGroup {
    crate::impl_layer_trait!(LayerGroup, properties);

    fn options(&self) -> serde_json::Value {
        let layers: Vec<serde_json::Value> = self.layers().map(|l| l.options()).collect();
        serde_json::json!({
            "kind": "group",
            "id": self.properties.id,
            "name": self.properties.name,
            "layers": layers,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.layers()
            .filter_map(|l| l.bounds())
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::vector::{LineStyle, Polyline};

    fn line(id: &str, a: LatLng, b: LatLng) -> Box<dyn LayerTrait> {
        Box::new(Polyline::new(id.to_string(), vec![vec![a, b]], LineStyle::default()))
    }

    #[test]
    fn test_group_starts_detached_and_empty() {
        let group = LayerGroup::new("tremors".to_string(), "Tremors".to_string());

        assert!(!group.is_visible());
        assert!(group.is_empty());
        assert!(group.bounds().is_none());
        assert_eq!(group.options()["layers"], serde_json::json!([]));
    }

    #[test]
    fn test_group_collects_children() {
        let mut group = LayerGroup::new("plates".to_string(), "Plate Boundaries".to_string());
        group.add_layer(line("a", LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)));
        group.extend(vec![line("b", LatLng::new(-5.0, 3.0), LatLng::new(2.0, 4.0))]);

        assert_eq!(group.len(), 2);
        assert_eq!(
            group.bounds().unwrap(),
            LatLngBounds::from_coords(-5.0, 0.0, 2.0, 4.0)
        );
        assert_eq!(group.options()["layers"][1]["id"], "b");

        group.clear();
        assert!(group.is_empty());
    }
}
