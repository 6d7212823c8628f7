//! The map session: one map view, its controls and its threshold table,
//! owned in one place and passed by reference to whatever populates it.

use crate::{
    core::{
        builder::MapBuilder,
        config::SessionConfig,
        geo::{LatLng, LatLngBounds},
        map::Map,
    },
    layers::{base::LayerTrait, group::LayerGroup, tile::TileLayer},
    style::palette::DepthThresholdTable,
    ui::{
        controls::{ControlPosition, LayerControl},
        legend::{Legend, LegendEntry},
    },
    MapError, Result,
};
use serde::Serialize;

pub struct MapSession {
    config: SessionConfig,
    map: Map,
    control: LayerControl,
    legend: Legend,
}

impl MapSession {
    /// Composes the stock map for `config`
    pub fn new(config: SessionConfig) -> Result<Self> {
        MapBuilder::from_config(config).build()
    }

    pub(crate) fn from_parts(
        config: SessionConfig,
        map: Map,
        control: LayerControl,
        legend: Legend,
    ) -> Self {
        Self {
            config,
            map,
            control,
            legend,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn control(&self) -> &LayerControl {
        &self.control
    }

    /// Table shared by marker coloring and the legend
    pub fn thresholds(&self) -> &DepthThresholdTable {
        &self.config.depth_bands
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn attach_legend(&mut self) {
        if !self.legend.is_attached() {
            log::debug!("legend attached at {}", self.legend.position());
        }
        self.legend.attach();
    }

    pub fn select_base(&mut self, name: &str) -> Result<()> {
        self.control.select_base(&mut self.map, name)
    }

    pub fn active_base(&self) -> Option<&str> {
        self.control.active_base(&self.map)
    }

    pub fn overlay(&self, name: &str) -> Result<&LayerGroup> {
        let layer_id = self.overlay_id(name)?;
        self.map
            .group(layer_id)
            .ok_or_else(|| MapError::Layer(format!("'{}' is not a layer group", name)))
    }

    /// Appends `layer` to the overlay group named `name`
    pub fn add_to_overlay(&mut self, name: &str, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.extend_overlay(name, std::iter::once(layer))
    }

    pub fn extend_overlay<I>(&mut self, name: &str, layers: I) -> Result<()>
    where
        I: IntoIterator<Item = Box<dyn LayerTrait>>,
    {
        let layer_id = self.overlay_id(name)?.to_string();
        self.map.with_group_mut(&layer_id, |group| group.extend(layers))
    }

    pub fn attach_overlay(&mut self, name: &str) -> Result<()> {
        self.control.set_overlay(&mut self.map, name, true)
    }

    pub fn toggle_overlay(&mut self, name: &str) -> Result<bool> {
        self.control.toggle_overlay(&mut self.map, name)
    }

    pub fn is_overlay_attached(&self, name: &str) -> Result<bool> {
        self.control.is_overlay_attached(&self.map, name)
    }

    fn overlay_id(&self, name: &str) -> Result<&str> {
        self.control
            .overlay_id(name)
            .ok_or_else(|| MapError::Layer(format!("no overlay named '{}'", name)))
    }

    /// Renderer-facing description of everything currently composed
    pub fn snapshot(&self) -> MapSnapshot {
        let base_layers = self
            .control
            .base_layers()
            .iter()
            .filter_map(|entry| {
                let layer = self.map.layer(&entry.layer_id)?;
                let tile = layer.as_any().downcast_ref::<TileLayer>()?;
                let options = tile.tile_options();
                Some(BaseLayerSnapshot {
                    name: entry.name.clone(),
                    url_template: options.url_template.clone(),
                    subdomains: options.subdomains.clone(),
                    attribution: options.attribution.clone(),
                    active: layer.is_visible(),
                })
            })
            .collect();

        let overlays = self
            .control
            .overlays()
            .iter()
            .filter_map(|entry| {
                let group = self.map.group(&entry.layer_id)?;
                Some(OverlaySnapshot {
                    name: entry.name.clone(),
                    attached: group.is_visible(),
                    bounds: group.bounds(),
                    layers: group.layers().map(|l| l.options()).collect(),
                })
            })
            .collect();

        MapSnapshot {
            container_id: self.map.container_id().to_string(),
            center: self.map.center(),
            zoom: self.map.zoom(),
            control_position: self.control.position(),
            base_layers,
            overlays,
            legend: LegendSnapshot {
                position: self.legend.position(),
                attached: self.legend.is_attached(),
                entries: self.legend.entries().to_vec(),
                html: self.legend.render_html(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseLayerSnapshot {
    pub name: String,
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    pub name: String,
    pub attached: bool,
    /// Extent of the overlay's elements, `None` while it is empty
    pub bounds: Option<LatLngBounds>,
    /// Options of every element, see [`LayerTrait::options`]
    pub layers: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSnapshot {
    pub position: ControlPosition,
    pub attached: bool,
    pub entries: Vec<LegendEntry>,
    pub html: String,
}

/// Point-in-time export of a session for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: f64,
    pub control_position: ControlPosition,
    pub base_layers: Vec<BaseLayerSnapshot>,
    pub overlays: Vec<OverlaySnapshot>,
    pub legend: LegendSnapshot,
}

impl MapSnapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlaySnapshot> {
        self.overlays.iter().find(|o| o.name == name)
    }

    pub fn active_base(&self) -> Option<&str> {
        self.base_layers
            .iter()
            .find(|b| b.active)
            .map(|b| b.name.as_str())
    }
}
