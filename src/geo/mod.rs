//! Geographic boundary data and the sphere-to-plane morph rendering.

mod feature;
mod path;
mod projection;
mod renderer;
mod svg;
mod topology;

pub use feature::{legend_entries, FeatureSet, HIGHLIGHTED_COUNTRIES};
pub use path::{build_feature_paths, FeaturePath};
pub use projection::MorphProjection;
pub use renderer::{render_feature_paths, ViewTransform};
#[cfg(not(target_arch = "wasm32"))]
pub use svg::render_svg;
