use crate::{
    constants::{BOUNDARY_COLOR, BOUNDARY_WEIGHT},
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    style::palette::Color,
};
use serde::{Deserialize, Serialize};

/// Style for line features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub weight: f64,
    /// Opacity (0.0 to 1.0)
    pub opacity: f64,
}

impl LineStyle {
    /// Uniform style for plate boundaries
    pub fn plate_boundary() -> Self {
        Self {
            color: BOUNDARY_COLOR,
            weight: BOUNDARY_WEIGHT,
            opacity: 1.0,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x33, 0x88, 0xff),
            weight: 3.0,
            opacity: 1.0,
        }
    }
}

/// One or more line paths drawn with a single style
pub struct Polyline {
    properties: LayerProperties,
    paths: Vec<Vec<LatLng>>,
    style: LineStyle,
}

impl Polyline {
    pub fn new(id: String, paths: Vec<Vec<LatLng>>, style: LineStyle) -> Self {
        let properties = LayerProperties::new(id, "Polyline".to_string(), LayerType::Vector);
        Self {
            properties,
            paths,
            style,
        }
    }

    pub fn paths(&self) -> &[Vec<LatLng>] {
        &self.paths
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Number of vertices across all paths
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }
}

impl LayerTrait for Polyline {
    crate::impl_layer_trait!(Polyline, properties);

    fn options(&self) -> serde_json::Value {
        let paths: Vec<Vec<[f64; 2]>> = self
            .paths
            .iter()
            .map(|path| path.iter().map(|p| [p.lat, p.lng]).collect())
            .collect();

        serde_json::json!({
            "kind": "polyline",
            "id": self.properties.id,
            "paths": paths,
            "style": self.style,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.paths.iter().flatten())
    }
}
