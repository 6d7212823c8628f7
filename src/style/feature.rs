use crate::constants::{
    MARKER_FILL_OPACITY, MARKER_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT, UNKNOWN_PLACE,
};
use crate::data::geojson::EarthquakeFeature;
use crate::style::{
    classifier::{color_for_depth, radius_for_magnitude},
    palette::{Color, DepthThresholdTable},
};
use serde::{Deserialize, Serialize};

/// Visual style of one earthquake marker, recomputed on every styling pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Fill color, from depth
    pub color: Color,
    /// Circle radius in pixels, from magnitude
    pub radius: f64,
    pub stroke_color: Color,
    pub stroke_weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

/// Style for `feature`: depth picks the fill, magnitude picks the radius,
/// the stroke is fixed.
pub fn style_for(table: &DepthThresholdTable, feature: &EarthquakeFeature) -> StyleDescriptor {
    StyleDescriptor {
        color: color_for_depth(table, feature.depth),
        radius: radius_for_magnitude(feature.magnitude),
        stroke_color: MARKER_STROKE_COLOR,
        stroke_weight: MARKER_STROKE_WEIGHT,
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
    }
}

/// Popup body for `feature`. The place label is inserted verbatim.
pub fn popup_text_for(feature: &EarthquakeFeature) -> String {
    format!(
        "Intensity: {}<br>Depth: {}<br>Location: {}",
        feature.magnitude,
        feature.depth,
        feature.place.as_deref().unwrap_or(UNKNOWN_PLACE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn quake(depth: f64, magnitude: f64, place: Option<&str>) -> EarthquakeFeature {
        EarthquakeFeature {
            id: None,
            position: LatLng::new(38.8, -122.8),
            depth,
            magnitude,
            place: place.map(str::to_string),
        }
    }

    #[test]
    fn test_deep_strong_event() {
        let feature = quake(95.0, 5.0, Some("X"));
        let style = style_for(&DepthThresholdTable::default(), &feature);

        assert_eq!(style.color.to_hex(), "#ea2c2c");
        assert_eq!(style.radius, 20.0);
        assert_eq!(style.stroke_color, Color::BLACK);
        assert_eq!(style.stroke_weight, 1.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.fill_opacity, 0.8);

        let popup = popup_text_for(&feature);
        assert!(popup.contains("Intensity: 5"));
        assert!(popup.contains("Depth: 95"));
        assert!(popup.contains("Location: X"));
    }

    #[test]
    fn test_shallow_zero_magnitude_event() {
        let style = style_for(&DepthThresholdTable::default(), &quake(5.0, 0.0, None));

        assert_eq!(style.color.to_hex(), "#98ee00");
        assert_eq!(style.radius, 1.0);
    }

    #[test]
    fn test_popup_keeps_raw_values() {
        let place = "10km <b>NE</b> of Ridgecrest, CA";
        let popup = popup_text_for(&quake(7.25, 3.4, Some(place)));

        assert_eq!(
            popup,
            "Intensity: 3.4<br>Depth: 7.25<br>Location: 10km <b>NE</b> of Ridgecrest, CA"
        );
    }

    #[test]
    fn test_popup_without_place() {
        let popup = popup_text_for(&quake(-1.5, 1.0, None));
        assert_eq!(popup, "Intensity: 1<br>Depth: -1.5<br>Location: Unknown");
    }
}
