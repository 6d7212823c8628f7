//! Depth/magnitude classification and per-feature styling
//!
//! One [`palette::DepthThresholdTable`] feeds both the classifier and the
//! legend, so the marker colors and the legend bands cannot drift apart.

pub mod classifier;
pub mod feature;
pub mod palette;

pub use classifier::{color_for_depth, radius_for_magnitude};
pub use feature::{popup_text_for, style_for, StyleDescriptor};
pub use palette::{Color, DepthBand, DepthThresholdTable};
