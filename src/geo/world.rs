//! World outline geometry read from a GeoJSON FeatureCollection.
//!
//! Each feature's `id` is the numeric country id used by the crosswalk, given
//! either as a number or as a numeric string ("004").

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to read geometry file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a FeatureCollection, found '{0}'")]
    NotFeatureCollection(String),
}

/// A closed ring of (longitude, latitude) points.
pub type Ring = Vec<(f64, f64)>;

/// Outline of one country; only outer rings are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub id: u32,
    pub rings: Vec<Ring>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldMap {
    pub shapes: Vec<CountryShape>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
}

type Position = Vec<f64>;

impl WorldMap {
    pub fn load(path: &Path) -> Result<Self, GeoError> {
        let content = std::fs::read_to_string(path)?;
        let map = Self::from_geojson_str(&content)?;
        tracing::info!(path = %path.display(), shapes = map.shapes.len(), "Loaded world geometry");
        Ok(map)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self, GeoError> {
        let collection: FeatureCollection = serde_json::from_str(content)?;
        if collection.kind != "FeatureCollection" {
            return Err(GeoError::NotFeatureCollection(collection.kind));
        }

        let shapes = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let id = feature
                    .id
                    .as_ref()
                    .and_then(parse_id)
                    .or_else(|| feature.properties.as_ref()?.get("id").and_then(parse_id))?;
                let rings = outer_rings(feature.geometry.as_ref()?)?;
                Some(CountryShape { id, rings })
            })
            .collect();

        Ok(Self { shapes })
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn parse_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Outer rings of a Polygon or MultiPolygon; other geometry types yield `None`.
fn outer_rings(geometry: &Value) -> Option<Vec<Ring>> {
    let coordinates = geometry.get("coordinates")?.clone();
    match geometry.get("type")?.as_str()? {
        "Polygon" => {
            let rings: Vec<Vec<Position>> = serde_json::from_value(coordinates).ok()?;
            Some(rings.into_iter().take(1).map(to_ring).collect())
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Position>>> = serde_json::from_value(coordinates).ok()?;
            Some(
                polygons
                    .into_iter()
                    .filter_map(|rings| rings.into_iter().next())
                    .map(to_ring)
                    .collect(),
            )
        }
        _ => None,
    }
}

fn to_ring(points: Vec<Position>) -> Ring {
    points
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[0], p[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "004", "properties": {},
             "geometry": {"type": "Polygon", "coordinates": [
                [[60.0, 29.0], [75.0, 29.0], [75.0, 38.0], [60.0, 29.0]],
                [[65.0, 31.0], [66.0, 31.0], [66.0, 32.0], [65.0, 31.0]]
             ]}},
            {"type": "Feature", "id": 36, "properties": {},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[113.0, -22.0], [153.0, -22.0], [153.0, -39.0], [113.0, -22.0]]],
                [[[144.0, -40.0], [148.0, -40.0], [146.0, -43.0], [144.0, -40.0]]]
             ]}},
            {"type": "Feature", "properties": {"id": "8"},
             "geometry": {"type": "Polygon", "coordinates": [[[19.0, 40.0], [21.0, 40.0], [20.0, 42.0], [19.0, 40.0]]]}},
            {"type": "Feature", "properties": {"name": "Nowhere"},
             "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
            {"type": "Feature", "id": 10, "properties": {},
             "geometry": {"type": "Point", "coordinates": [0.0, -90.0]}}
        ]
    }"#;

    #[test]
    fn test_parse_ids_and_geometry_types() {
        let map = WorldMap::from_geojson_str(SAMPLE).unwrap();
        let ids: Vec<u32> = map.shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 36, 8]);

        // holes are dropped, every polygon of a multipolygon is kept
        assert_eq!(map.shapes[0].rings.len(), 1);
        assert_eq!(map.shapes[1].rings.len(), 2);
        assert_eq!(map.shapes[0].rings[0][1], (75.0, 29.0));
    }

    #[test]
    fn test_rejects_other_documents() {
        let err = WorldMap::from_geojson_str(r#"{"type": "Feature", "features": []}"#).unwrap_err();
        assert!(matches!(err, GeoError::NotFeatureCollection(_)));
        assert!(WorldMap::from_geojson_str("not json").is_err());
    }
}
