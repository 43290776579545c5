//! SVG export of a rendered frame.

use super::path::FeaturePath;
use super::projection::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::ui::colors::globe::{
    svg, COUNTRY_STROKE_WIDTH, HIGHLIGHT_OPACITY, HIGHLIGHT_STROKE_WIDTH,
};
use std::fmt::Write as _;

/// Renders feature paths into a standalone SVG document.
///
/// Suppressed features are kept as hidden, empty paths so the document has
/// one element per feature.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
pub fn render_svg(paths: &[FeaturePath]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet">"#,
        VIEW_WIDTH, VIEW_HEIGHT
    );

    for path in paths {
        let visibility = if path.visible { "visible" } else { "hidden" };
        let id = path
            .id
            .as_deref()
            .map(|id| format!(r#" data-id="{}""#, escape_attr(id)))
            .unwrap_or_default();

        if path.highlighted {
            let _ = writeln!(
                out,
                r#"  <path class="highlighted-country"{} d="{}" fill="{}" stroke="{}" stroke-width="{}" opacity="{}" style="visibility: {}; filter: {}"/>"#,
                id,
                path.d,
                svg::HIGHLIGHT_FILL,
                svg::HIGHLIGHT_STROKE,
                HIGHLIGHT_STROKE_WIDTH,
                HIGHLIGHT_OPACITY,
                visibility,
                svg::HIGHLIGHT_SHADOW
            );
        } else {
            let _ = writeln!(
                out,
                r#"  <path class="country"{} d="{}" fill="{}" stroke="{}" stroke-width="{}" opacity="1" style="visibility: {}"/>"#,
                id,
                path.d,
                svg::COUNTRY_FILL,
                svg::COUNTRY_STROKE,
                COUNTRY_STROKE_WIDTH,
                visibility
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(id: &str, highlighted: bool, visible: bool) -> FeaturePath {
        FeaturePath {
            id: Some(id.to_string()),
            highlighted,
            shapes: Vec::new(),
            d: if visible { "M0,0L1,0L1,1Z".to_string() } else { String::new() },
            visible,
        }
    }

    #[test]
    fn test_svg_keeps_draw_order_and_styles() {
        let svg = render_svg(&[path("250", false, true), path("356", true, true)]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 500""#));
        let regular = svg.find(r#"data-id="250""#).unwrap();
        let highlighted = svg.find(r#"data-id="356""#).unwrap();
        assert!(regular < highlighted);
        assert!(svg.contains(r##"fill="#e78a53""##));
        assert!(svg.contains(r##"fill="#1a1a1a""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_suppressed_paths_are_hidden() {
        let svg = render_svg(&[path("250", false, false)]);
        assert!(svg.contains(r#"d="""#));
        assert!(svg.contains("visibility: hidden"));
    }

    #[test]
    fn test_ids_are_escaped() {
        let svg = render_svg(&[path(r#"a"<b>"#, false, true)]);
        assert!(svg.contains("a&quot;&lt;b&gt;"));
    }
}
