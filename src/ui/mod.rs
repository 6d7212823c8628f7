//! Map controls: the layer switcher, the depth legend and marker popups

pub mod controls;
pub mod legend;
pub mod popup;

pub use controls::{ControlEntry, ControlPosition, LayerControl};
pub use legend::{Legend, LegendEntry};
pub use popup::Popup;
