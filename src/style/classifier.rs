//! Depth and magnitude classification for earthquake markers

use crate::constants::{MAGNITUDE_RADIUS_SCALE, ZERO_MAGNITUDE_RADIUS};
use crate::style::palette::{Color, DepthThresholdTable};

/// Fill color for an event at `depth`. Total: every depth maps to one band.
pub fn color_for_depth(table: &DepthThresholdTable, depth: f64) -> Color {
    table.bands()[table.band_index(depth)].color
}

/// Marker radius for an event of `magnitude`.
///
/// Negative magnitudes give a negative radius; callers decide what to do with it.
pub fn radius_for_magnitude(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        ZERO_MAGNITUDE_RADIUS
    } else {
        magnitude * MAGNITUDE_RADIUS_SCALE
    }
}
