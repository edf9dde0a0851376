use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::LatLng;
use crate::quiz::normalize_country;

// Just enough of GeoJSON to read country outlines.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
}

/// `[lng, lat, ...]`
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Outer ring of every part, flattened
    fn outer_ring_points(&self) -> Vec<LatLng> {
        let polygons: Vec<&Vec<Vec<Position>>> = match self {
            Geometry::Polygon { coordinates } => vec![coordinates],
            Geometry::MultiPolygon { coordinates } => coordinates.iter().collect(),
            Geometry::Unsupported => Vec::new(),
        };

        polygons
            .into_iter()
            .filter_map(|rings| rings.first())
            .flatten()
            .filter_map(|pos| match pos.as_slice() {
                [lng, lat, ..] => Some(LatLng::new(*lat, *lng)),
                _ => None,
            })
            .collect()
    }
}

/// Unweighted mean of the vertices. Not an area centroid.
fn vertex_mean(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
    Some(LatLng::new(lat, lng))
}

#[derive(Debug, Clone)]
struct Country {
    name: String,
    centroid: Option<LatLng>,
}

/// Country outlines reduced to names and approximate centroids
#[derive(Debug, Clone, Default)]
pub struct BoundaryAtlas {
    countries: Vec<Country>,
    by_name: HashMap<String, usize>,
}

impl BoundaryAtlas {
    /// Parses a GeoJSON FeatureCollection keyed by `properties.name`.
    ///
    /// Features without a name are skipped. When two features share a name
    /// the first one wins.
    pub fn from_geojson(text: &str) -> Result<Self, serde_json::Error> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        let mut atlas = Self::default();

        for feature in collection.features {
            let Some(name) = feature.properties.and_then(|p| p.name) else {
                continue;
            };
            let key = normalize_country(&name);
            if atlas.by_name.contains_key(&key) {
                debug!(country = %name, "duplicate boundary feature ignored");
                continue;
            }
            let centroid = feature
                .geometry
                .as_ref()
                .and_then(|g| vertex_mean(&g.outer_ring_points()));
            atlas.by_name.insert(key, atlas.countries.len());
            atlas.countries.push(Country { name, centroid });
        }

        Ok(atlas)
    }

    /// Approximate centroid of `name`, or `None` when the country is unknown
    /// or has no usable outline.
    pub fn centroid(&self, name: &str) -> Option<LatLng> {
        self.by_name
            .get(&normalize_country(name))
            .and_then(|&i| self.countries[i].centroid)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&normalize_country(name))
    }

    /// Names in dataset order
    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Squareland" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0], [10, 0], [10, 10], [0, 10]],
                        [[4, 4], [6, 4], [6, 6]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Islands" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20, 40, 5], [22, 40, 5]]],
                        [[[30, 50], [32, 50]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Pointland" },
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "name": "Squareland" },
                "geometry": { "type": "Polygon", "coordinates": [[[90, 90]]] }
            }
        ]
    }"#;

    #[test]
    fn polygon_centroid_uses_outer_ring_only() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        let c = atlas.centroid("Squareland").unwrap();
        assert!((c.lat - 5.0).abs() < 1e-9);
        assert!((c.lng - 5.0).abs() < 1e-9);
    }

    #[test]
    fn multipolygon_flattens_every_part() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        let c = atlas.centroid("Islands").unwrap();
        assert!((c.lat - 45.0).abs() < 1e-9);
        assert!((c.lng - 26.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_or_unsupported_is_none() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        assert!(atlas.centroid("Atlantis").is_none());
        assert!(atlas.centroid("Pointland").is_none());
        assert!(atlas.contains("Pointland"));
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        assert_eq!(atlas.centroid("  squareLAND "), atlas.centroid("Squareland"));
    }

    #[test]
    fn first_feature_wins_and_unnamed_are_skipped() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        assert_eq!(atlas.len(), 3);
        let names: Vec<_> = atlas.country_names().collect();
        assert_eq!(names, ["Squareland", "Islands", "Pointland"]);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(BoundaryAtlas::from_geojson("{\"features\": 3}").is_err());
    }
}
