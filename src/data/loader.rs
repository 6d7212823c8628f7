//! Fetching the two remote datasets and feeding them into a [`MapSession`]

use crate::{
    constants::{PLATE_BOUNDARIES_OVERLAY, TREMORS_OVERLAY},
    core::config::SessionConfig,
    data::geojson::{FeatureCollection, GeoJson},
    layers::{
        base::LayerTrait,
        marker::CircleMarker,
        vector::{LineStyle, Polyline},
    },
    session::MapSession,
    style::feature::{popup_text_for, style_for},
    MapError,
};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::{fmt, time::Duration};

/// Shared async client; identifies itself so public feeds don't reject it
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|err| {
            log::warn!("falling back to a default HTTP client: {}", err);
            reqwest::Client::new()
        })
});

/// Why a dataset could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not valid GeoJSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: MapError,
    },

    #[error("{url} is not a feature collection")]
    NotACollection { url: String },
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Where feature documents come from. The HTTP implementation is
/// [`HttpFeatureSource`]; tests substitute an in-memory one.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Raw body of the document at `url`
    async fn fetch_document(&self, url: &str) -> FetchResult<String>;

    /// Fetches and decodes the feature collection at `url`
    async fn fetch_collection(&self, url: &str) -> FetchResult<FeatureCollection> {
        let body = self.fetch_document(url).await?;
        let document = GeoJson::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;
        document
            .into_collection()
            .ok_or_else(|| FetchError::NotACollection {
                url: url.to_string(),
            })
    }
}

/// Plain HTTP GET through the shared client
#[derive(Debug, Clone, Default)]
pub struct HttpFeatureSource {
    timeout: Option<Duration>,
}

impl HttpFeatureSource {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.request_timeout())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl FeatureSource for HttpFeatureSource {
    async fn fetch_document(&self, url: &str) -> FetchResult<String> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let mut request = HTTP_CLIENT.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(network)
    }
}

/// The two datasets a session loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Earthquakes,
    PlateBoundaries,
}

impl Dataset {
    /// Overlay the dataset populates
    pub fn overlay(&self) -> &'static str {
        match self {
            Self::Earthquakes => TREMORS_OVERLAY,
            Self::PlateBoundaries => PLATE_BOUNDARIES_OVERLAY,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earthquakes => f.write_str("earthquakes"),
            Self::PlateBoundaries => f.write_str("plate boundaries"),
        }
    }
}

/// What happened to one dataset during [`DataLoader::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetOutcome {
    Pending,
    /// `features` in the document, `rendered` of them placed on the map
    Loaded { features: usize, rendered: usize },
    Failed { error: String },
}

impl Default for DatasetOutcome {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub earthquakes: DatasetOutcome,
    pub plate_boundaries: DatasetOutcome,
    /// Datasets in the order their responses were applied
    pub arrival_order: Vec<Dataset>,
}

impl LoadReport {
    fn record(&mut self, dataset: Dataset, outcome: DatasetOutcome) {
        match dataset {
            Dataset::Earthquakes => self.earthquakes = outcome,
            Dataset::PlateBoundaries => self.plate_boundaries = outcome,
        }
        self.arrival_order.push(dataset);
    }

    pub fn outcome(&self, dataset: Dataset) -> &DatasetOutcome {
        match dataset {
            Dataset::Earthquakes => &self.earthquakes,
            Dataset::PlateBoundaries => &self.plate_boundaries,
        }
    }

    pub fn all_loaded(&self) -> bool {
        matches!(self.earthquakes, DatasetOutcome::Loaded { .. })
            && matches!(self.plate_boundaries, DatasetOutcome::Loaded { .. })
    }

    pub fn failures(&self) -> Vec<(Dataset, &str)> {
        [Dataset::Earthquakes, Dataset::PlateBoundaries]
            .into_iter()
            .filter_map(|dataset| match self.outcome(dataset) {
                DatasetOutcome::Failed { error } => Some((dataset, error.as_str())),
                _ => None,
            })
            .collect()
    }
}

/// Fetches both datasets concurrently and applies each as it arrives.
///
/// The session is only touched from the task awaiting [`DataLoader::run`],
/// so the two loads never race on it. A failed load is logged and leaves its
/// overlay empty and detached; it never aborts the other load.
pub struct DataLoader<S> {
    source: S,
    earthquake_url: String,
    plate_boundaries_url: String,
}

impl<S: FeatureSource> DataLoader<S> {
    pub fn new(source: S, earthquake_url: String, plate_boundaries_url: String) -> Self {
        Self {
            source,
            earthquake_url,
            plate_boundaries_url,
        }
    }

    pub fn from_config(source: S, config: &SessionConfig) -> Self {
        Self::new(
            source,
            config.earthquake_url.clone(),
            config.plate_boundaries_url.clone(),
        )
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load_earthquakes(&self) -> FetchResult<FeatureCollection> {
        self.source.fetch_collection(&self.earthquake_url).await
    }

    pub async fn load_plate_boundaries(&self) -> FetchResult<FeatureCollection> {
        self.source.fetch_collection(&self.plate_boundaries_url).await
    }

    async fn load(&self, dataset: Dataset) -> (Dataset, FetchResult<FeatureCollection>) {
        let result = match dataset {
            Dataset::Earthquakes => self.load_earthquakes().await,
            Dataset::PlateBoundaries => self.load_plate_boundaries().await,
        };
        (dataset, result)
    }

    pub async fn run(&self, session: &mut MapSession) -> LoadReport {
        let mut pending: FuturesUnordered<_> = [Dataset::Earthquakes, Dataset::PlateBoundaries]
            .into_iter()
            .map(|dataset| self.load(dataset))
            .collect();

        let mut report = LoadReport::default();
        while let Some((dataset, result)) = pending.next().await {
            let outcome = match result {
                Ok(collection) => match apply_dataset(session, dataset, &collection) {
                    Ok(rendered) => DatasetOutcome::Loaded {
                        features: collection.len(),
                        rendered,
                    },
                    Err(err) => failed(dataset, err.to_string()),
                },
                Err(err) => failed(dataset, err.to_string()),
            };
            report.record(dataset, outcome);
        }
        report
    }
}

fn failed(dataset: Dataset, error: String) -> DatasetOutcome {
    log::warn!(
        "{} unavailable, '{}' stays empty: {}",
        dataset,
        dataset.overlay(),
        error
    );
    DatasetOutcome::Failed { error }
}

fn apply_dataset(
    session: &mut MapSession,
    dataset: Dataset,
    collection: &FeatureCollection,
) -> crate::Result<usize> {
    match dataset {
        Dataset::Earthquakes => apply_earthquakes(session, collection),
        Dataset::PlateBoundaries => apply_plate_boundaries(session, collection),
    }
}

/// Adds one styled circle marker per earthquake to "Tremors", then attaches
/// the overlay and the legend. Returns the number of markers added.
///
/// Features without an id become `quake-<index>`, with the index counted
/// over the whole feed.
pub fn apply_earthquakes(
    session: &mut MapSession,
    collection: &FeatureCollection,
) -> crate::Result<usize> {
    let markers: Vec<Box<dyn LayerTrait>> = collection
        .earthquakes()
        .into_iter()
        .map(|(index, quake)| {
            let style = style_for(session.thresholds(), &quake);
            if style.radius < 0.0 {
                log::warn!(
                    "earthquake {:?} has negative magnitude {}, radius {}",
                    quake.id,
                    quake.magnitude,
                    style.radius
                );
            }
            let id = quake
                .id
                .clone()
                .unwrap_or_else(|| format!("quake-{}", index));
            let marker =
                CircleMarker::new(id, quake.position, style).bind_popup(popup_text_for(&quake));
            Box::new(marker) as Box<dyn LayerTrait>
        })
        .collect();

    let count = markers.len();
    session.extend_overlay(TREMORS_OVERLAY, markers)?;
    session.attach_overlay(TREMORS_OVERLAY)?;
    session.attach_legend();
    log::info!("placed {} earthquake markers", count);
    Ok(count)
}

/// Adds every line geometry to "Plate Boundaries" with the fixed boundary
/// style, then attaches the overlay. Returns the number of polylines added.
///
/// Features without a `Name` become `boundary-<index>`, the feed index.
pub fn apply_plate_boundaries(
    session: &mut MapSession,
    collection: &FeatureCollection,
) -> crate::Result<usize> {
    let style = LineStyle::plate_boundary();
    let lines: Vec<Box<dyn LayerTrait>> = collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let paths = feature
                .geometry
                .as_ref()
                .map(|g| g.to_paths())
                .unwrap_or_default();
            if paths.is_empty() {
                log::debug!("skipping plate feature {} without line geometry", index);
                return None;
            }
            let id = feature
                .property("Name")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("boundary-{}", index));
            Some(Box::new(Polyline::new(id, paths, style)) as Box<dyn LayerTrait>)
        })
        .collect();

    let count = lines.len();
    session.extend_overlay(PLATE_BOUNDARIES_OVERLAY, lines)?;
    session.attach_overlay(PLATE_BOUNDARIES_OVERLAY)?;
    log::info!("placed {} plate boundary lines", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemorySource {
        documents: HashMap<String, String>,
    }

    #[async_trait]
    impl FeatureSource for MemorySource {
        async fn fetch_document(&self, url: &str) -> FetchResult<String> {
            self.documents
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn source(entries: &[(&str, &str)]) -> MemorySource {
        MemorySource {
            documents: entries
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_fetch_collection_errors() {
        let source = source(&[
            ("bad", "not json"),
            ("point", r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#),
        ]);

        assert!(matches!(
            source.fetch_collection("bad").await,
            Err(FetchError::Decode { .. })
        ));
        assert!(matches!(
            source.fetch_collection("point").await,
            Err(FetchError::NotACollection { .. })
        ));
        let err = source.fetch_collection("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "missing answered with HTTP 404");
    }

    #[tokio::test]
    async fn test_single_feature_is_a_collection() {
        let source = source(&[(
            "one",
            r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}, "properties": {"mag": 1.5}}"#,
        )]);
        let collection = source.fetch_collection("one").await.unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_report_bookkeeping() {
        let mut report = LoadReport::default();
        assert_eq!(report.earthquakes, DatasetOutcome::Pending);

        report.record(
            Dataset::PlateBoundaries,
            DatasetOutcome::Failed {
                error: "boom".to_string(),
            },
        );
        report.record(
            Dataset::Earthquakes,
            DatasetOutcome::Loaded {
                features: 2,
                rendered: 2,
            },
        );

        assert!(!report.all_loaded());
        assert_eq!(report.failures(), vec![(Dataset::PlateBoundaries, "boom")]);
        assert_eq!(
            report.arrival_order,
            vec![Dataset::PlateBoundaries, Dataset::Earthquakes]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["earthquakes"]["status"], "loaded");
        assert_eq!(json["plate_boundaries"]["error"], "boom");
        assert_eq!(json["arrival_order"][0], "plate_boundaries");
    }

    #[test]
    fn test_http_source_timeout() {
        let config = SessionConfig {
            request_timeout_ms: Some(12_500),
            ..SessionConfig::default()
        };
        let source = HttpFeatureSource::from_config(&config);
        assert_eq!(source.timeout(), Some(Duration::from_millis(12_500)));
        assert_eq!(HttpFeatureSource::default().timeout(), None);
    }
}
