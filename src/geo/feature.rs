//! Boundary feature data structures.
//!
//! Country boundaries are stored as lon/lat multipolygons tagged with the
//! dataset identifier and whether the country belongs to the highlight list.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{feature::Id, Feature, GeoJson, Geometry, Value};

/// A country that is drawn with the highlight style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightedCountry {
    /// Dataset identifier (ISO 3166-1 numeric, as found in world-atlas)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Position in the legend (1 = first)
    pub rank: u8,
}

/// Countries drawn above the regular layer.
///
/// Australia appears under both its padded and unpadded code because
/// different dataset builds disagree on the padding.
pub const HIGHLIGHTED_COUNTRIES: &[HighlightedCountry] = &[
    HighlightedCountry { id: "356", name: "India", rank: 2 },
    HighlightedCountry { id: "784", name: "UAE", rank: 3 },
    HighlightedCountry { id: "36", name: "Australia", rank: 4 },
    HighlightedCountry { id: "554", name: "New Zealand", rank: 7 },
    HighlightedCountry { id: "840", name: "USA", rank: 5 },
    HighlightedCountry { id: "826", name: "UK", rank: 8 },
    HighlightedCountry { id: "276", name: "Germany", rank: 6 },
    HighlightedCountry { id: "682", name: "Saudi Arabia", rank: 9 },
    HighlightedCountry { id: "144", name: "Sri Lanka", rank: 1 },
    HighlightedCountry { id: "036", name: "Australia", rank: 4 },
];

/// Looks up the highlight entry for a dataset identifier.
pub fn highlight_for(id: &str) -> Option<&'static HighlightedCountry> {
    HIGHLIGHTED_COUNTRIES.iter().find(|c| c.id == id)
}

/// Highlight entries ordered by rank, one per country.
pub fn legend_entries() -> Vec<&'static HighlightedCountry> {
    let mut entries: Vec<&'static HighlightedCountry> = Vec::new();
    for country in HIGHLIGHTED_COUNTRIES {
        if !entries.iter().any(|e| e.name == country.name) {
            entries.push(country);
        }
    }
    entries.sort_by_key(|c| c.rank);
    entries
}

/// A single country (or placeholder) boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Dataset identifier, if the source provides one
    pub id: Option<String>,
    /// Display name from the `name` property
    pub name: Option<String>,
    /// Boundary polygons in lon/lat degrees
    pub geometry: MultiPolygon<f64>,
    /// Whether the feature uses the highlight style
    pub highlighted: bool,
}

impl BoundaryFeature {
    /// Creates a feature, classifying it against the highlight list.
    pub fn new(id: Option<String>, name: Option<String>, geometry: MultiPolygon<f64>) -> Self {
        let highlighted = id.as_deref().and_then(highlight_for).is_some();
        Self {
            id,
            name,
            geometry,
            highlighted,
        }
    }

    /// The full-world rectangle used when the dataset cannot be loaded.
    pub fn world_rectangle() -> Self {
        let exterior = LineString::from(vec![
            (-180.0, -90.0),
            (180.0, -90.0),
            (180.0, 90.0),
            (-180.0, 90.0),
            (-180.0, -90.0),
        ]);
        Self::new(
            None,
            None,
            MultiPolygon::new(vec![Polygon::new(exterior, Vec::new())]),
        )
    }

    /// Total number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        self.geometry
            .iter()
            .map(|p| {
                p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>()
            })
            .sum()
    }
}

/// Where the current feature set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureSource {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// Parsed from the fetched dataset
    Dataset,
    /// Placeholder substituted after a load failure
    Fallback,
}

/// Collection of boundary features ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub features: Vec<BoundaryFeature>,
    pub source: FeatureSource,
}

impl FeatureSet {
    /// A feature set holding only the world rectangle.
    pub fn fallback() -> Self {
        Self {
            features: vec![BoundaryFeature::world_rectangle()],
            source: FeatureSource::Fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == FeatureSource::Fallback
    }

    /// Features drawn in the background layer.
    pub fn regular(&self) -> impl Iterator<Item = &BoundaryFeature> {
        self.features.iter().filter(|f| !f.highlighted)
    }

    /// Features drawn above the background layer.
    pub fn highlighted(&self) -> impl Iterator<Item = &BoundaryFeature> {
        self.features.iter().filter(|f| f.highlighted)
    }

    /// Features in draw order: regular first, then highlighted.
    pub fn draw_order(&self) -> impl Iterator<Item = &BoundaryFeature> {
        self.regular().chain(self.highlighted())
    }

    /// Whether a feature with the given identifier is present.
    pub fn contains_id(&self, id: &str) -> bool {
        self.features.iter().any(|f| f.id.as_deref() == Some(id))
    }

    /// Parses a world boundaries document.
    ///
    /// TopoJSON topologies are decoded from the named object; anything else
    /// is treated as GeoJSON.
    pub fn from_document(document: &str, object_name: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(document)
            .map_err(|e| format!("Failed to parse boundaries document: {}", e))?;

        let features = if value.get("type").and_then(|t| t.as_str()) == Some("Topology") {
            super::topology::Topology::from_value(value)?.features(object_name)?
        } else {
            let geojson = GeoJson::from_json_value(value)
                .map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;
            features_from_geojson(geojson)
        };

        if features.is_empty() {
            return Err("Boundaries document contains no polygon features".to_string());
        }

        Ok(Self {
            features,
            source: FeatureSource::Dataset,
        })
    }
}

fn features_from_geojson(geojson: GeoJson) -> Vec<BoundaryFeature> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.iter().filter_map(convert_feature).collect(),
        GeoJson::Feature(f) => convert_feature(&f).into_iter().collect(),
        GeoJson::Geometry(g) => convert_geometry(&g)
            .map(|geometry| BoundaryFeature::new(None, None, geometry))
            .into_iter()
            .collect(),
    }
}

fn convert_feature(feature: &Feature) -> Option<BoundaryFeature> {
    let id = feature.id.as_ref().map(|id| match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    });
    let name = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let geometry = feature.geometry.as_ref().and_then(convert_geometry)?;
    Some(BoundaryFeature::new(id, name, geometry))
}

fn convert_geometry(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    match &geometry.value {
        Value::Polygon(rings) => polygon_from_rings(rings).map(|p| MultiPolygon::new(vec![p])),
        Value::MultiPolygon(polygons) => {
            let polygons: Vec<Polygon<f64>> =
                polygons.iter().filter_map(|rings| polygon_from_rings(rings)).collect();
            if polygons.is_empty() {
                None
            } else {
                Some(MultiPolygon::new(polygons))
            }
        }
        Value::GeometryCollection(geometries) => {
            let polygons: Vec<Polygon<f64>> = geometries
                .iter()
                .filter_map(convert_geometry)
                .flat_map(|mp| mp.0)
                .collect();
            if polygons.is_empty() {
                None
            } else {
                Some(MultiPolygon::new(polygons))
            }
        }
        // Boundaries only; points and lines carry no area to fill
        _ => None,
    }
}

/// Builds a polygon from GeoJSON-style rings (exterior first).
pub(crate) fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = ring_from_positions(exterior)?;
    let holes: Vec<LineString<f64>> = holes
        .iter()
        .filter_map(|ring| ring_from_positions(ring))
        .collect();
    Some(Polygon::new(exterior, holes))
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Option<LineString<f64>> {
    let coords: Vec<Coord<f64>> = positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect();
    if coords.len() < 3 {
        return None;
    }
    Some(LineString::from(coords))
}
