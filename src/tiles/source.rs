use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Leaflet-style `{s}/{z}/{x}/{y}` URL template with subdomain rotation
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string());

        if self.subdomains.is_empty() {
            return url.replace("{s}.", "").replace("{s}", "");
        }

        let sum = u64::from(coord.x) + u64::from(coord.y);
        let idx = (sum % self.subdomains.len() as u64) as usize;
        url.replace("{s}", &self.subdomains[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{OSM_HOT_TILE_URL, OSM_TILE_URL};

    fn abc() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_subdomains_rotate() {
        let source = UrlTemplateSource::new(OSM_TILE_URL, abc());

        assert_eq!(
            source.url(TileCoord::new(1, 3, 3)),
            "https://b.tile.openstreetmap.org/3/1/3.png"
        );
        assert_eq!(
            source.url(TileCoord::new(0, 0, 0)),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn test_hot_template() {
        let source = UrlTemplateSource::new(OSM_HOT_TILE_URL, abc());
        assert_eq!(
            source.url(TileCoord::new(2, 0, 2)),
            "https://c.tile.openstreetmap.fr/hot/2/2/0.png"
        );
    }

    #[test]
    fn test_rotation_at_grid_edge() {
        let source = UrlTemplateSource::new(OSM_TILE_URL, abc());
        assert_eq!(
            source.url(TileCoord::new(u32::MAX, u32::MAX, 32)),
            "https://a.tile.openstreetmap.org/32/4294967295/4294967295.png"
        );
    }

    #[test]
    fn test_without_subdomains() {
        let source = UrlTemplateSource::new(OSM_TILE_URL, Vec::new());
        assert_eq!(
            source.url(TileCoord::new(4, 5, 6)),
            "https://tile.openstreetmap.org/6/4/5.png"
        );
    }
}
