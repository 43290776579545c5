//! Frame statistics for the top bar.

use crate::geo::FeaturePath;

/// Statistics about the last rendered frame.
#[derive(Default, Clone, Debug)]
pub struct RenderStats {
    /// Features drawn this frame.
    pub visible_features: usize,

    /// Features suppressed as degenerate.
    pub hidden_features: usize,

    /// Projected vertices across all visible features.
    pub projected_vertices: usize,

    /// Time spent generating paths, in milliseconds.
    pub path_build_ms: Option<f64>,
}

impl RenderStats {
    /// Collects counts from a freshly built frame.
    pub fn from_paths(paths: &[FeaturePath], path_build_ms: f64) -> Self {
        let visible_features = paths.iter().filter(|p| p.visible).count();
        let projected_vertices = paths
            .iter()
            .filter(|p| p.visible)
            .flat_map(|p| p.shapes.iter())
            .map(|s| s.exterior.len() + s.holes.iter().map(Vec::len).sum::<usize>())
            .sum();

        Self {
            visible_features,
            hidden_features: paths.len() - visible_features,
            projected_vertices,
            path_build_ms: Some(path_build_ms),
        }
    }

    /// Format the counts for display (e.g., "176 features · 2 hidden").
    pub fn format_features(&self) -> String {
        if self.hidden_features == 0 {
            format!("{} features", self.visible_features)
        } else {
            format!(
                "{} features · {} hidden",
                self.visible_features, self.hidden_features
            )
        }
    }

    /// Format path timing for display.
    pub fn format_timing(&self) -> String {
        match self.path_build_ms {
            Some(ms) => format!("paths: {:.1}ms · {} pts", ms, self.projected_vertices),
            None => "—".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{build_feature_paths, FeatureSet, MorphProjection};

    #[test]
    fn test_counts_fallback_frame() {
        let paths = build_feature_paths(&FeatureSet::fallback(), &MorphProjection::new(0.0, [0.0, 0.0], [0.0, 0.0]));
        let stats = RenderStats::from_paths(&paths, 1.5);

        assert_eq!(stats.visible_features, 1);
        assert_eq!(stats.hidden_features, 0);
        assert!(stats.projected_vertices > 4);
        assert_eq!(stats.format_features(), "1 features");
        assert!(stats.format_timing().starts_with("paths: 1.5ms"));
    }

    #[test]
    fn test_empty_stats_format() {
        let stats = RenderStats::default();
        assert_eq!(stats.format_timing(), "—");
    }
}
