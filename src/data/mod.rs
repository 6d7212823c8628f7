//! GeoJSON model and the loader for the remote earthquake and plate datasets

pub mod geojson;
pub mod loader;

pub use geojson::{EarthquakeFeature, FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use loader::{
    DataLoader, Dataset, DatasetOutcome, FeatureSource, FetchError, FetchResult,
    HttpFeatureSource, LoadReport,
};
