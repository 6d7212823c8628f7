use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    style::feature::StyleDescriptor,
    ui::popup::Popup,
};

/// Fixed-pixel-radius circle at a geographic position
pub struct CircleMarker {
    properties: LayerProperties,
    position: LatLng,
    style: StyleDescriptor,
    popup: Option<Popup>,
}

impl CircleMarker {
    pub fn new(id: String, position: LatLng, style: StyleDescriptor) -> Self {
        let properties = LayerProperties::new(id, "CircleMarker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            style,
            popup: None,
        }
    }

    /// Attaches a popup shown when the marker is clicked
    pub fn bind_popup(mut self, content: String) -> Self {
        self.popup = Some(Popup::new(content));
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for CircleMarker {
    crate::impl_layer_trait!(CircleMarker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": "circle_marker",
            "id": self.properties.id,
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "style": self.style,
            "popup": self.popup.as_ref().map(Popup::content),
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}
