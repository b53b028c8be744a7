//! GeoJSON feature envelope and coordinate encoding.
//!
//! GeoJSON positions are longitude-first; shapes store latitude-first
//! coordinates. The conversion here is the axis swap fixed by the encoding,
//! applied at the import/export boundary.

use std::io;

use geojson::{GeoJson, JsonObject};

use crate::geometry::{LatLng, LineCoords};

/// GeoJSON feature generic over the property bag type.
///
/// Only `LineString` and `MultiLineString` geometries are meaningful to a
/// polyline element; the geometry field stays untyped so imports can reject
/// anything else with a descriptive error.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEnvelope<P = JsonObject> {
    pub geometry: geojson::Geometry,
    pub properties: P,
}

impl<P> FeatureEnvelope<P> {
    pub fn new(geometry: geojson::Geometry, properties: P) -> Self {
        Self {
            geometry,
            properties,
        }
    }
}

impl<P: Default> FeatureEnvelope<P> {
    /// Empty line-string envelope with an empty property bag.
    pub fn empty() -> Self {
        Self {
            geometry: geojson::Geometry::new(geojson::Value::LineString(Vec::new())),
            properties: P::default(),
        }
    }
}

impl<P: Default> Default for FeatureEnvelope<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: serde::Serialize> FeatureEnvelope<P> {
    /// Renders the envelope as GeoJSON feature text.
    pub fn to_geojson_string(&self) -> io::Result<String> {
        let properties = match serde_json::to_value(&self.properties).map_err(invalid_data)? {
            serde_json::Value::Object(map) => Some(map),
            serde_json::Value::Null => None,
            other => {
                return Err(invalid_data(format!(
                    "feature properties must encode to an object, got {other}"
                )))
            }
        };
        let feature = geojson::Feature {
            bbox: None,
            geometry: Some(self.geometry.clone()),
            id: None,
            properties,
            foreign_members: None,
        };
        Ok(GeoJson::Feature(feature).to_string())
    }
}

impl<P: serde::de::DeserializeOwned + Default> FeatureEnvelope<P> {
    /// Parses GeoJSON feature text. An absent property bag defaults to an
    /// empty record.
    pub fn from_geojson_str(text: &str) -> io::Result<Self> {
        let geojson: GeoJson = text.parse().map_err(invalid_data)?;
        let feature = geojson::Feature::try_from(geojson).map_err(invalid_data)?;
        let geometry = feature
            .geometry
            .ok_or_else(|| invalid_data("feature has no geometry"))?;
        let properties = match feature.properties {
            Some(map) => serde_json::from_value(serde_json::Value::Object(map))
                .map_err(invalid_data)?,
            None => P::default(),
        };
        Ok(Self {
            geometry,
            properties,
        })
    }
}

/// Converts GeoJSON longitude-first positions into latitude-first
/// coordinates.
///
/// Accepts `LineString` and `MultiLineString` geometries; any other kind is
/// rejected with an error naming it.
pub fn coords_to_latlngs(geometry: &geojson::Geometry) -> io::Result<LineCoords> {
    match &geometry.value {
        geojson::Value::LineString(positions) => Ok(LineCoords::Single(
            positions
                .iter()
                .map(position_to_latlng)
                .collect::<io::Result<_>>()?,
        )),
        geojson::Value::MultiLineString(parts) => Ok(LineCoords::Multi(
            parts
                .iter()
                .map(|positions| {
                    positions
                        .iter()
                        .map(position_to_latlng)
                        .collect::<io::Result<_>>()
                })
                .collect::<io::Result<_>>()?,
        )),
        other => Err(invalid_data(format!(
            "unsupported geometry type: {}",
            other.type_name()
        ))),
    }
}

/// Builds the GeoJSON geometry for the given internal coordinates.
pub fn latlngs_to_geometry(coords: &LineCoords) -> geojson::Geometry {
    match coords {
        LineCoords::Single(pts) => {
            let line: geo_types::LineString<f64> =
                pts.iter().map(|p| geo_types::Coord::from(*p)).collect();
            geojson::Geometry::new(geojson::Value::from(&line))
        }
        LineCoords::Multi(parts) => {
            let lines = geo_types::MultiLineString(
                parts
                    .iter()
                    .map(|part| part.iter().map(|p| geo_types::Coord::from(*p)).collect())
                    .collect(),
            );
            geojson::Geometry::new(geojson::Value::from(&lines))
        }
    }
}

fn position_to_latlng(position: &Vec<f64>) -> io::Result<LatLng> {
    match position.as_slice() {
        [lng, lat, ..] => Ok(LatLng::new(*lat, *lng)),
        _ => Err(invalid_data(format!(
            "position needs at least two ordinates, got {}",
            position.len()
        ))),
    }
}

fn invalid_data(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_string_swaps_axes() {
        let geometry =
            geojson::Geometry::new(geojson::Value::LineString(vec![vec![13.4, 52.5]]));
        let coords = coords_to_latlngs(&geometry).unwrap();
        assert_eq!(coords, LineCoords::Single(vec![LatLng::new(52.5, 13.4)]));
    }

    #[test]
    fn multi_line_string_converts_every_part() {
        let geometry = geojson::Geometry::new(geojson::Value::MultiLineString(vec![
            vec![vec![0.0, 1.0]],
            vec![vec![2.0, 3.0], vec![4.0, 5.0]],
        ]));
        let coords = coords_to_latlngs(&geometry).unwrap();
        assert_eq!(
            coords,
            LineCoords::Multi(vec![
                vec![LatLng::new(1.0, 0.0)],
                vec![LatLng::new(3.0, 2.0), LatLng::new(5.0, 4.0)],
            ])
        );
    }

    #[test]
    fn rejects_other_geometry_kinds_by_name() {
        let geometry = geojson::Geometry::new(geojson::Value::Point(vec![0.0, 0.0]));
        let err = coords_to_latlngs(&geometry).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("Point"));
    }

    #[test]
    fn rejects_short_positions() {
        let geometry = geojson::Geometry::new(geojson::Value::LineString(vec![vec![1.0]]));
        assert!(coords_to_latlngs(&geometry).is_err());
    }

    #[test]
    fn export_is_longitude_first() {
        let geometry =
            latlngs_to_geometry(&LineCoords::Single(vec![LatLng::new(52.5, 13.4)]));
        assert_eq!(
            geometry.value,
            geojson::Value::LineString(vec![vec![13.4, 52.5]])
        );
    }

    #[test]
    fn parse_defaults_absent_properties() {
        let envelope: FeatureEnvelope = FeatureEnvelope::from_geojson_str(
            r#"{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]},"properties":null}"#,
        )
        .unwrap();
        assert!(envelope.properties.is_empty());
    }
}
