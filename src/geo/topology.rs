//! TopoJSON topology decoding.
//!
//! World boundary datasets are distributed as topologies: geometries refer to
//! shared arcs by index instead of repeating coordinates. Arcs are usually
//! quantized, stored as integer deltas that are scaled and translated back
//! into lon/lat by the topology transform.

use super::feature::{polygon_from_rings, BoundaryFeature};
use geo_types::MultiPolygon;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Quantization transform of a topology.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// A geometry object inside a topology.
///
/// Kept loosely typed: the `arcs` nesting depth depends on `type`, and ids
/// may be strings or numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub arcs: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometries: Option<Vec<TopoGeometry>>,
}

/// A parsed TopoJSON topology.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    pub objects: HashMap<String, TopoGeometry>,
}

impl Topology {
    /// Parses a topology from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|e| format!("Failed to parse topology: {}", e))
    }

    /// Decodes every arc into absolute lon/lat positions.
    pub fn decoded_arcs(&self) -> Vec<Vec<[f64; 2]>> {
        self.arcs
            .iter()
            .map(|arc| match self.transform {
                Some(t) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    arc.iter()
                        .filter(|p| p.len() >= 2)
                        .map(|p| {
                            x += p[0];
                            y += p[1];
                            [x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]
                        })
                        .collect()
                }
                None => arc
                    .iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| [p[0], p[1]])
                    .collect(),
            })
            .collect()
    }

    /// Converts the named object into boundary features.
    pub fn features(&self, object_name: &str) -> Result<Vec<BoundaryFeature>, String> {
        let object = self
            .objects
            .get(object_name)
            .ok_or_else(|| format!("Topology has no object named '{}'", object_name))?;

        let arcs = self.decoded_arcs();
        let mut features = Vec::new();

        match object.geometries.as_ref() {
            Some(geometries) if object.kind.as_deref() == Some("GeometryCollection") => {
                for geometry in geometries {
                    if let Some(feature) = convert_geometry(geometry, &arcs)? {
                        features.push(feature);
                    }
                }
            }
            _ => {
                if let Some(feature) = convert_geometry(object, &arcs)? {
                    features.push(feature);
                }
            }
        }

        Ok(features)
    }
}

fn convert_geometry(
    geometry: &TopoGeometry,
    arcs: &[Vec<[f64; 2]>],
) -> Result<Option<BoundaryFeature>, String> {
    let polygons = match (geometry.kind.as_deref(), geometry.arcs.as_ref()) {
        (Some("Polygon"), Some(refs)) => {
            let rings: Vec<Vec<i64>> = serde_json::from_value(refs.clone())
                .map_err(|e| format!("Invalid Polygon arcs: {}", e))?;
            vec![rings]
        }
        (Some("MultiPolygon"), Some(refs)) => serde_json::from_value(refs.clone())
            .map_err(|e| format!("Invalid MultiPolygon arcs: {}", e))?,
        _ => return Ok(None),
    };

    let mut out = Vec::with_capacity(polygons.len());
    for rings in &polygons {
        let rings = rings
            .iter()
            .map(|ring| stitch_ring(ring, arcs))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(polygon) = polygon_from_rings(&rings) {
            out.push(polygon);
        }
    }
    if out.is_empty() {
        return Ok(None);
    }

    let id = geometry.id.as_ref().and_then(|id| match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let name = geometry
        .properties
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(Some(BoundaryFeature::new(id, name, MultiPolygon::new(out))))
}

/// Joins arc references into one closed ring.
///
/// A negative reference `!i` walks arc `i` backwards. Consecutive arcs share
/// an endpoint, so the last point is dropped before appending the next arc.
fn stitch_ring(refs: &[i64], arcs: &[Vec<[f64; 2]>]) -> Result<Vec<Vec<f64>>, String> {
    let mut points: Vec<[f64; 2]> = Vec::new();

    for &r in refs {
        let (index, reversed) = if r < 0 { (!r, true) } else { (r, false) };
        let arc = usize::try_from(index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or_else(|| format!("Arc reference {} out of range", r))?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }

    // Degenerate rings still need four positions to be a valid ring
    if let Some(&first) = points.first() {
        while points.len() < 4 {
            points.push(first);
        }
    }

    Ok(points.into_iter().map(|p| p.to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [0.5, 0.25], "translate": [-10, 20]},
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "840", "properties": {"name": "United States"}, "arcs": [[0, 1]]},
                    {"type": "Polygon", "id": "250", "arcs": [[-2, 2]]},
                    {"type": null}
                ]
            }
        },
        "arcs": [
            [[0, 0], [4, 0], [0, 4]],
            [[4, 4], [-4, 0], [0, -4]],
            [[4, 4], [0, 4], [-4, -8]]
        ]
    }"#;

    fn topology() -> Topology {
        Topology::from_value(serde_json::from_str(TOPOLOGY).unwrap()).unwrap()
    }

    #[test]
    fn test_arcs_are_delta_decoded_and_transformed() {
        let arcs = topology().decoded_arcs();

        assert_eq!(arcs[0], vec![[-10.0, 20.0], [-8.0, 20.0], [-8.0, 21.0]]);
        assert_eq!(arcs[1], vec![[-8.0, 21.0], [-10.0, 21.0], [-10.0, 20.0]]);
    }

    #[test]
    fn test_rings_are_stitched_without_duplicate_joints() {
        let features = topology().features("countries").unwrap();
        assert_eq!(features.len(), 2);

        let usa = &features[0];
        assert_eq!(usa.id.as_deref(), Some("840"));
        assert_eq!(usa.name.as_deref(), Some("United States"));
        assert!(usa.highlighted);

        let ring: Vec<(f64, f64)> = usa.geometry.0[0]
            .exterior()
            .coords()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(
            ring,
            vec![
                (-10.0, 20.0),
                (-8.0, 20.0),
                (-8.0, 21.0),
                (-10.0, 21.0),
                (-10.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_negative_reference_walks_arc_backwards() {
        let features = topology().features("countries").unwrap();
        let france = &features[1];
        assert!(!france.highlighted);

        let ring: Vec<(f64, f64)> = france.geometry.0[0]
            .exterior()
            .coords()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(
            ring,
            vec![
                (-10.0, 20.0),
                (-10.0, 21.0),
                (-8.0, 21.0),
                (-8.0, 22.0),
                (-10.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_missing_object_is_an_error() {
        assert!(topology().features("land").is_err());
    }

    #[test]
    fn test_out_of_range_arc_is_an_error() {
        let doc = r#"{"type": "Topology", "arcs": [],
            "objects": {"countries": {"type": "Polygon", "arcs": [[3]]}}}"#;
        let topo = Topology::from_value(serde_json::from_str(doc).unwrap()).unwrap();
        assert!(topo.features("countries").is_err());
    }

    #[test]
    fn test_document_dispatch_reads_topology() {
        let set = crate::geo::FeatureSet::from_document(TOPOLOGY, "countries").unwrap();
        assert_eq!(set.len(), 2);
    }
}
