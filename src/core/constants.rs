//! Core constants for the earthquake map: feeds, tile servers, view and styling.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use crate::style::palette::Color;

/// USGS summary feed of every earthquake in the past week.
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// PB2002 tectonic plate boundaries (Bird, 2003) as GeoJSON line strings.
pub const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Identifier of the host element the map view mounts into.
pub const MAP_CONTAINER_ID: &str = "map";

/// Initial map center (geographic center of the contiguous United States).
pub const DEFAULT_CENTER: (f64, f64) = (39.8283, -98.5795);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 3.0;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_HOT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const OSM_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Layer names as shown in the layer control.
pub const BASE_MAP_NAME: &str = "Base Map";
pub const ALT_MAP_NAME: &str = "Alt Map";
pub const TREMORS_OVERLAY: &str = "Tremors";
pub const PLATE_BOUNDARIES_OVERLAY: &str = "Plate Boundaries";

/// Lower bounds of the depth bands, shallow to deep.
pub const DEPTH_BOUNDS: [f64; 6] = [0.0, 10.0, 30.0, 50.0, 70.0, 90.0];

/// Band colors paired with [`DEPTH_BOUNDS`], low to high severity.
pub const DEPTH_COLORS: [Color; 6] = [
    Color::rgb(0x98, 0xee, 0x00),
    Color::rgb(0xd4, 0xee, 0x00),
    Color::rgb(0xee, 0xcc, 0x00),
    Color::rgb(0xee, 0x9c, 0x00),
    Color::rgb(0xea, 0x82, 0x2c),
    Color::rgb(0xea, 0x2c, 0x2c),
];

/// Marker radius per unit of magnitude.
pub const MAGNITUDE_RADIUS_SCALE: f64 = 4.0;

/// Radius used for magnitude-zero events so they stay visible.
pub const ZERO_MAGNITUDE_RADIUS: f64 = 1.0;

pub const MARKER_STROKE_COLOR: Color = Color::BLACK;
pub const MARKER_STROKE_WEIGHT: f64 = 1.0;
pub const MARKER_OPACITY: f64 = 1.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

pub const BOUNDARY_COLOR: Color = Color::ORANGE;
pub const BOUNDARY_WEIGHT: f64 = 2.0;

/// Text shown in a popup when a feature carries no place label.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Registry IDs of the layers every session creates.
pub const BASE_MAP_ID: &str = "base-map";
pub const ALT_MAP_ID: &str = "alt-map";
pub const TREMORS_ID: &str = "tremors";
pub const PLATE_BOUNDARIES_ID: &str = "plate-boundaries";
