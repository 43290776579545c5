//! World boundaries loading.
//!
//! This module provides functionality for:
//! - Fetching the boundaries document (browser fetch or blocking HTTP)
//! - Decoding it into a feature set
//! - Substituting the full-world placeholder when anything fails

mod download;

use crate::geo::FeatureSet;

pub use download::WorldLoadChannel;

/// Outcome of a dataset load.
#[derive(Debug)]
pub enum LoadResult {
    /// Dataset decoded successfully.
    Loaded(FeatureSet),
    /// Fetch or decode failed; `features` holds the placeholder.
    Fallback { features: FeatureSet, error: String },
}

impl LoadResult {
    #[allow(dead_code)]
    pub fn features(&self) -> &FeatureSet {
        match self {
            LoadResult::Loaded(features) => features,
            LoadResult::Fallback { features, .. } => features,
        }
    }

    pub fn into_features(self) -> FeatureSet {
        match self {
            LoadResult::Loaded(features) => features,
            LoadResult::Fallback { features, .. } => features,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadResult::Loaded(_) => None,
            LoadResult::Fallback { error, .. } => Some(error),
        }
    }
}

/// Turns a fetched body (or fetch error) into a usable feature set.
pub fn resolve(body: Result<String, String>, object_name: &str) -> LoadResult {
    match body.and_then(|text| FeatureSet::from_document(&text, object_name)) {
        Ok(features) => {
            log::info!(
                "Loaded {} boundary features ({} highlighted, {} vertices)",
                features.len(),
                features.highlighted().count(),
                features.features.iter().map(|f| f.vertex_count()).sum::<usize>()
            );
            LoadResult::Loaded(features)
        }
        Err(error) => {
            log::warn!("World boundaries unavailable: {}", error);
            log::warn!("Substituting full-world placeholder");
            LoadResult::Fallback {
                features: FeatureSet::fallback(),
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_yields_exactly_the_placeholder() {
        let result = resolve(Err("HTTP 503".to_string()), "countries");

        assert_eq!(result.error(), Some("HTTP 503"));
        let features = result.into_features();
        assert!(!features.is_empty());
        assert_eq!(features.len(), 1);
        assert!(features.is_fallback());

        let placeholder = &features.features[0];
        assert_eq!(placeholder.id, None);
        assert!(!placeholder.highlighted);
        assert_eq!(placeholder.geometry.0.len(), 1);

        let ring: Vec<(f64, f64)> = placeholder.geometry.0[0]
            .exterior()
            .coords()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(
            ring,
            vec![(-180.0, -90.0), (180.0, -90.0), (180.0, 90.0), (-180.0, 90.0), (-180.0, -90.0)]
        );
    }

    #[test]
    fn test_garbage_body_falls_back() {
        let result = resolve(Ok("<html>not found</html>".to_string()), "countries");
        assert!(result.error().is_some());
        assert!(result.features().is_fallback());
    }

    #[test]
    fn test_missing_object_falls_back() {
        let doc = r#"{"type":"Topology","arcs":[],"objects":{"land":{"type":"GeometryCollection","geometries":[]}}}"#;
        let result = resolve(Ok(doc.to_string()), "countries");
        assert!(result.features().is_fallback());
    }

    #[test]
    fn test_geojson_body_loads() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "356",
                "properties": {"name": "India"},
                "geometry": {"type": "Polygon", "coordinates": [[[70,10],[90,10],[90,30],[70,30],[70,10]]]}
            }]
        }"#;
        let result = resolve(Ok(doc.to_string()), "countries");

        assert!(result.error().is_none());
        let features = result.features();
        assert_eq!(features.len(), 1);
        assert!(features.contains_id("356"));
        assert_eq!(features.highlighted().count(), 1);
    }
}
