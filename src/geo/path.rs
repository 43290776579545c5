//! Path generation for boundary features.
//!
//! A feature goes through: densify (lon/lat) → rotate → cut at the
//! antimeridian → densify (rotated) → project. The result is kept both as
//! projected rings for painting and as an SVG path string, which is also the
//! basis of the degeneracy check.

use super::feature::{BoundaryFeature, FeatureSet};
use super::projection::MorphProjection;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Write as _;

/// Longest edge, in degrees, drawn without subdivision.
pub const MAX_EDGE_DEGREES: f64 = 2.0;

const MAX_EDGE_RADIANS: f64 = MAX_EDGE_DEGREES * PI / 180.0;

/// Why a feature produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// No ring with at least three vertices
    EmptyGeometry,
    /// The source geometry contains NaN or infinite coordinates
    NonFinite,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::EmptyGeometry => write!(f, "geometry has no drawable rings"),
            PathError::NonFinite => write!(f, "geometry contains non-finite coordinates"),
        }
    }
}

/// One filled area in view-box units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedShape {
    pub exterior: Vec<DVec2>,
    pub holes: Vec<Vec<DVec2>>,
}

/// The rendered form of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePath {
    pub id: Option<String>,
    pub highlighted: bool,
    pub shapes: Vec<ProjectedShape>,
    /// SVG path data; empty when the feature is suppressed
    pub d: String,
    pub visible: bool,
}

impl FeaturePath {
    fn hidden(feature: &BoundaryFeature) -> Self {
        Self {
            id: feature.id.clone(),
            highlighted: feature.highlighted,
            shapes: Vec::new(),
            d: String::new(),
            visible: false,
        }
    }
}

/// Side of the antimeridian a cut piece lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    East,
    West,
}

/// A rotated ring (radians) after antimeridian cutting.
#[derive(Debug, Clone)]
struct RingPiece {
    points: Vec<(f64, f64)>,
    side: Option<Side>,
}

/// Whether path data contains a non-finite coordinate marker.
pub fn is_degenerate(d: &str) -> bool {
    d.is_empty() || d.contains("NaN") || d.contains("inf")
}

/// Builds paths for every feature, regular features first so highlights
/// are never occluded.
///
/// Failures are contained per feature: the feature is kept but hidden.
pub fn build_feature_paths(set: &FeatureSet, projection: &MorphProjection) -> Vec<FeaturePath> {
    set.draw_order()
        .map(|feature| match project_feature(feature, projection) {
            Ok(shapes) => {
                let d = path_data(&shapes);
                if is_degenerate(&d) {
                    log::debug!(
                        "Suppressing degenerate path for {}",
                        feature.id.as_deref().unwrap_or("<unnamed>")
                    );
                    return FeaturePath::hidden(feature);
                }
                FeaturePath {
                    id: feature.id.clone(),
                    highlighted: feature.highlighted,
                    shapes,
                    d,
                    visible: true,
                }
            }
            Err(e) => {
                log::debug!(
                    "Error generating path for {}: {}",
                    feature.id.as_deref().unwrap_or("<unnamed>"),
                    e
                );
                FeaturePath::hidden(feature)
            }
        })
        .collect()
}

/// Projects all polygons of a feature.
pub fn project_feature(
    feature: &BoundaryFeature,
    projection: &MorphProjection,
) -> Result<Vec<ProjectedShape>, PathError> {
    let mut shapes = Vec::new();

    for polygon in feature.geometry.iter() {
        let exterior = ring_coords(polygon.exterior().0.iter().map(|c| (c.x, c.y)))?;
        if exterior.len() < 3 {
            continue;
        }

        let exterior_pieces = cut_antimeridian(&rotate_ring(&exterior, projection));
        let mut polygon_shapes: Vec<(Option<Side>, ProjectedShape)> = exterior_pieces
            .into_iter()
            .map(|piece| {
                (
                    piece.side,
                    ProjectedShape {
                        exterior: project_piece(&piece, projection),
                        holes: Vec::new(),
                    },
                )
            })
            .collect();

        for interior in polygon.interiors() {
            let hole = ring_coords(interior.0.iter().map(|c| (c.x, c.y)))?;
            if hole.len() < 3 {
                continue;
            }
            for piece in cut_antimeridian(&rotate_ring(&hole, projection)) {
                let wanted = piece
                    .side
                    .or_else(|| piece.points.first().map(|p| side_of(p.0)));
                let target = polygon_shapes
                    .iter_mut()
                    .find(|(side, _)| side.is_none() || *side == wanted);
                if let Some((_, shape)) = target {
                    shape.holes.push(project_piece(&piece, projection));
                }
            }
        }

        shapes.extend(polygon_shapes.into_iter().map(|(_, shape)| shape));
    }

    if shapes.is_empty() {
        return Err(PathError::EmptyGeometry);
    }
    Ok(shapes)
}

/// Formats projected shapes as SVG path data.
///
/// Coordinates are rounded to three decimals. Non-finite values format as
/// `NaN` or `inf`, which [`is_degenerate`] detects.
pub fn path_data(shapes: &[ProjectedShape]) -> String {
    let mut d = String::new();
    for shape in shapes {
        for ring in std::iter::once(&shape.exterior).chain(shape.holes.iter()) {
            if ring.len() < 2 {
                continue;
            }
            for (i, p) in ring.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{},{}", command, round3(p.x), round3(p.y));
            }
            d.push('Z');
        }
    }
    d
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Collects ring coordinates, densifying long edges and dropping the
/// closing duplicate.
fn ring_coords(coords: impl Iterator<Item = (f64, f64)>) -> Result<Vec<(f64, f64)>, PathError> {
    let mut ring: Vec<(f64, f64)> = Vec::new();
    for (lon, lat) in coords {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(PathError::NonFinite);
        }
        if let Some(&(plon, plat)) = ring.last() {
            push_densified(&mut ring, (plon, plat), (lon, lat), MAX_EDGE_DEGREES);
        }
        ring.push((lon, lat));
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    Ok(ring)
}

/// Appends the intermediate points of the edge `from → to` (exclusive of
/// both ends).
fn push_densified(out: &mut Vec<(f64, f64)>, from: (f64, f64), to: (f64, f64), step: f64) {
    let span = (to.0 - from.0).abs().max((to.1 - from.1).abs());
    let n = (span / step).ceil() as usize;
    for i in 1..n {
        let f = i as f64 / n as f64;
        out.push((from.0 + (to.0 - from.0) * f, from.1 + (to.1 - from.1) * f));
    }
}

fn rotate_ring(ring: &[(f64, f64)], projection: &MorphProjection) -> Vec<(f64, f64)> {
    ring.iter().map(|&(lon, lat)| projection.rotate(lon, lat)).collect()
}

fn project_piece(piece: &RingPiece, projection: &MorphProjection) -> Vec<DVec2> {
    let mut dense: Vec<(f64, f64)> = Vec::with_capacity(piece.points.len());
    let n = piece.points.len();
    for (i, &p) in piece.points.iter().enumerate() {
        dense.push(p);
        let next = piece.points[(i + 1) % n];
        push_densified(&mut dense, p, next, MAX_EDGE_RADIANS);
    }
    dense
        .into_iter()
        .map(|(lambda, phi)| projection.project_rotated(lambda, phi))
        .collect()
}

fn crosses(a: (f64, f64), b: (f64, f64)) -> bool {
    (b.0 - a.0).abs() > PI
}

/// Latitude at which the edge `a → b` meets the antimeridian on `a`'s side.
fn crossing_latitude(a: (f64, f64), b: (f64, f64)) -> f64 {
    let boundary = PI * a.0.signum();
    let b_lambda = b.0 + 2.0 * boundary;
    let span = b_lambda - a.0;
    if span.abs() < f64::EPSILON {
        return a.1;
    }
    a.1 + (b.1 - a.1) * (boundary - a.0) / span
}

fn side_of(lambda: f64) -> Side {
    if lambda >= 0.0 {
        Side::East
    } else {
        Side::West
    }
}

/// Splits a rotated, open ring where it crosses the antimeridian.
///
/// Rings with no crossing pass through unchanged. An even number of
/// crossings yields one piece per side, each closed along the edge of the
/// map. An odd number means the ring encloses a pole: the crossing nearest
/// that pole is rerouted along the pole row first, which leaves an even
/// count.
fn cut_antimeridian(ring: &[(f64, f64)]) -> Vec<RingPiece> {
    let n = ring.len();
    let crossings: Vec<usize> = (0..n)
        .filter(|&i| crosses(ring[i], ring[(i + 1) % n]))
        .collect();

    if crossings.is_empty() {
        return vec![RingPiece {
            points: ring.to_vec(),
            side: None,
        }];
    }

    if crossings.len() % 2 == 1 {
        return cut_antimeridian(&close_through_pole(ring, &crossings));
    }

    // Segments run from one crossing to the next, each on a single side
    let mut segments: Vec<(Side, Vec<(f64, f64)>)> = Vec::with_capacity(crossings.len());
    for (k, &start) in crossings.iter().enumerate() {
        let end = crossings[(k + 1) % crossings.len()];
        let entry_from = ring[start];
        let entry_to = ring[(start + 1) % n];
        let side = side_of(entry_to.0);

        let mut points = vec![(PI * entry_to.0.signum(), crossing_latitude(entry_to, entry_from))];
        let mut i = (start + 1) % n;
        loop {
            points.push(ring[i]);
            if i == end {
                break;
            }
            i = (i + 1) % n;
        }
        let exit_to = ring[(end + 1) % n];
        points.push((PI * ring[end].0.signum(), crossing_latitude(ring[end], exit_to)));
        segments.push((side, points));
    }

    let mut east = Vec::new();
    let mut west = Vec::new();
    for (side, points) in segments {
        match side {
            Side::East => east.extend(points),
            Side::West => west.extend(points),
        }
    }
    [(Side::East, east), (Side::West, west)]
        .into_iter()
        .filter(|(_, points)| points.len() >= 3)
        .map(|(side, points)| RingPiece {
            points,
            side: Some(side),
        })
        .collect()
}

/// Replaces one antimeridian crossing of a pole-enclosing ring with a walk
/// down the map edge, along the pole row and back up the other edge.
///
/// The pole is picked from the mean latitude. The crossing nearest the pole
/// is used so the detour meets no other crossing on either edge.
fn close_through_pole(ring: &[(f64, f64)], crossings: &[usize]) -> Vec<(f64, f64)> {
    let n = ring.len();
    let mean_lat: f64 = ring.iter().map(|p| p.1).sum::<f64>() / n as f64;
    let pole = FRAC_PI_2 * if mean_lat >= 0.0 { 1.0 } else { -1.0 };

    let nearest = crossings
        .iter()
        .map(|&i| (i, crossing_latitude(ring[i], ring[(i + 1) % n])))
        .min_by(|a, b| (pole - a.1).abs().total_cmp(&(pole - b.1).abs()));
    let Some((edge, lat)) = nearest else {
        return ring.to_vec();
    };

    let from = PI * ring[edge].0.signum();
    let steps = (2.0 * PI / MAX_EDGE_RADIANS).ceil() as usize;

    let mut out = Vec::with_capacity(n + steps + 3);
    out.extend_from_slice(&ring[..=edge]);
    out.push((from, lat));
    for s in 0..=steps {
        out.push((from - 2.0 * from * (s as f64 / steps as f64), pole));
    }
    out.push((-from, lat));
    out.extend_from_slice(&ring[edge + 1..]);
    out
}
