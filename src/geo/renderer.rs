//! Boundary rendering.
//!
//! Paints projected feature paths onto the egui canvas. Polygons are
//! triangulated for filling since egui only fills convex paths natively.

use super::path::{FeaturePath, ProjectedShape};
use super::projection::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::ui::colors::globe;
use eframe::egui::{epaint::Mesh, Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use glam::DVec2;

/// Maps the logical view box into a screen rectangle, preserving aspect
/// ratio and centering the result.
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    origin: Pos2,
    scale: f32,
}

impl ViewTransform {
    pub fn fit(rect: Rect) -> Self {
        let scale = (rect.width() / VIEW_WIDTH as f32).min(rect.height() / VIEW_HEIGHT as f32);
        let size = Vec2::new(VIEW_WIDTH as f32 * scale, VIEW_HEIGHT as f32 * scale);
        Self {
            origin: rect.center() - size / 2.0,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, p: DVec2) -> Pos2 {
        Pos2::new(
            self.origin.x + p.x as f32 * self.scale,
            self.origin.y + p.y as f32 * self.scale,
        )
    }

}

/// Visual style of one layer.
#[derive(Debug, Clone, Copy)]
struct LayerStyle {
    fill: Color32,
    stroke: Stroke,
    glow: Option<Stroke>,
}

impl LayerStyle {
    fn for_path(path: &FeaturePath, view: &ViewTransform) -> Self {
        if path.highlighted {
            Self {
                fill: globe::HIGHLIGHT_FILL.gamma_multiply(globe::HIGHLIGHT_OPACITY),
                stroke: Stroke::new(
                    globe::HIGHLIGHT_STROKE_WIDTH * view.scale(),
                    globe::HIGHLIGHT_STROKE.gamma_multiply(globe::HIGHLIGHT_OPACITY),
                ),
                glow: Some(Stroke::new(
                    globe::GLOW_WIDTH * view.scale(),
                    globe::glow().gamma_multiply(globe::HIGHLIGHT_OPACITY),
                )),
            }
        } else {
            Self {
                fill: globe::COUNTRY_FILL,
                stroke: Stroke::new(globe::COUNTRY_STROKE_WIDTH * view.scale(), globe::COUNTRY_STROKE),
                glow: None,
            }
        }
    }
}

/// Paints all visible paths in the order given.
///
/// Callers pass paths in draw order (regular before highlighted).
pub fn render_feature_paths(painter: &Painter, paths: &[FeaturePath], view: &ViewTransform) {
    for path in paths.iter().filter(|p| p.visible) {
        let style = LayerStyle::for_path(path, view);
        for shape in &path.shapes {
            render_shape(painter, shape, view, style);
        }
    }
}

fn render_shape(painter: &Painter, shape: &ProjectedShape, view: &ViewTransform, style: LayerStyle) {
    let rings: Vec<Vec<Pos2>> = std::iter::once(&shape.exterior)
        .chain(shape.holes.iter())
        .map(|ring| ring.iter().map(|p| view.to_screen(*p)).collect())
        .collect();

    if let Some(glow) = style.glow {
        if let Some(exterior) = rings.first() {
            painter.add(Shape::closed_line(exterior.clone(), glow));
        }
    }

    if let Some(mesh) = triangulate(&rings, style.fill) {
        painter.add(Shape::mesh(mesh));
    }

    for ring in rings {
        if ring.len() >= 2 {
            painter.add(Shape::closed_line(ring, style.stroke));
        }
    }
}

/// Ear-clips an exterior ring with holes into a colored mesh.
fn triangulate(rings: &[Vec<Pos2>], color: Color32) -> Option<Mesh> {
    let exterior = rings.first()?;
    if exterior.len() < 3 {
        return None;
    }

    let mut coords: Vec<f32> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut mesh = Mesh::default();

    for (i, ring) in rings.iter().enumerate() {
        if ring.len() < 3 {
            continue;
        }
        if i > 0 {
            hole_indices.push(coords.len() / 2);
        }
        for p in ring {
            coords.push(p.x);
            coords.push(p.y);
            mesh.colored_vertex(*p, color);
        }
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2).ok()?;
    if indices.is_empty() {
        return None;
    }
    for triangle in indices.chunks_exact(3) {
        mesh.add_triangle(triangle[0] as u32, triangle[1] as u32, triangle[2] as u32);
    }
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_fit_preserves_aspect() {
        // Wider than 16:10, so height limits the scale
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(1600.0, 500.0));
        let view = ViewTransform::fit(rect);

        assert!((view.scale() - 1.0).abs() < 1e-6);
        let left = view.to_screen(DVec2::new(0.0, 0.0));
        assert!((left.x - 400.0).abs() < 1e-3);
        assert!((left.y - 0.0).abs() < 1e-3);

        let center = view.to_screen(DVec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0));
        assert!((center.x - 800.0).abs() < 1e-3);
        assert!((center.y - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_triangulate_square_with_hole() {
        let outer = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        let hole = vec![
            Pos2::new(3.0, 3.0),
            Pos2::new(3.0, 6.0),
            Pos2::new(6.0, 6.0),
            Pos2::new(6.0, 3.0),
        ];

        let mesh = triangulate(&[outer.clone()], Color32::WHITE).unwrap();
        assert_eq!(mesh.indices.len(), 6);

        let mesh = triangulate(&[outer, hole], Color32::WHITE).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 8 * 3);
    }

    #[test]
    fn test_highlight_opacity_covers_the_whole_path() {
        let view = ViewTransform::fit(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 500.0)));
        let path = FeaturePath {
            id: Some("356".to_string()),
            highlighted: true,
            shapes: Vec::new(),
            d: String::new(),
            visible: true,
        };

        let style = LayerStyle::for_path(&path, &view);
        let faded = |c: Color32| c.gamma_multiply(globe::HIGHLIGHT_OPACITY);
        assert_eq!(style.fill, faded(globe::HIGHLIGHT_FILL));
        assert_eq!(style.stroke.color, faded(globe::HIGHLIGHT_STROKE));
        assert_ne!(style.stroke.color, globe::HIGHLIGHT_STROKE);
        assert_eq!(style.glow.map(|g| g.color), Some(faded(globe::glow())));
    }

    #[test]
    fn test_degenerate_ring_has_no_mesh() {
        let line = vec![Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)];
        assert!(triangulate(&[line], Color32::WHITE).is_none());
    }
}
