//! Conversions between feature records and [`geojson`] features.
//!
//! A [`FeatureRecord`] becomes a GeoJSON feature with the record id as the feature id and the shape kind stored in
//! the `kind` property.

use geojson::feature::Id;
use geojson::{JsonObject, JsonValue, PolygonType, Value};

use crate::error::GeodrawTypesError;
use crate::feature::{FeatureId, FeatureRecord};
use crate::geometry::{Geometry, Position, Ring};
use crate::shape_kind::ShapeKind;

/// Name of the feature property holding the shape kind.
pub const KIND_PROPERTY: &str = "kind";

fn convert_position(position: &[f64]) -> Result<Position, GeodrawTypesError> {
    if position.len() < 2 {
        Err(GeodrawTypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        ))
    } else {
        Ok([position[0], position[1]])
    }
}

fn convert_ring(ring: &[Vec<f64>]) -> Result<Ring, GeodrawTypesError> {
    ring.iter().map(|p| convert_position(p)).collect()
}

fn convert_polygon(polygon: &PolygonType) -> Result<Vec<Ring>, GeodrawTypesError> {
    polygon.iter().map(|ring| convert_ring(ring)).collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl From<&Geometry> for geojson::Geometry {
    fn from(value: &Geometry) -> Self {
        let value = match value {
            Geometry::Point(p) => Value::Point(p.to_vec()),
            Geometry::LineString(positions) => {
                Value::LineString(positions.iter().map(|p| p.to_vec()).collect())
            }
            Geometry::Polygon(rings) => Value::Polygon(
                rings
                    .iter()
                    .map(|ring| ring.iter().map(|p| p.to_vec()).collect())
                    .collect(),
            ),
        };

        geojson::Geometry::new(value)
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeodrawTypesError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        match &value.value {
            Value::Point(p) => Ok(Geometry::Point(convert_position(p)?)),
            Value::LineString(points) => Ok(Geometry::LineString(convert_ring(points)?)),
            Value::Polygon(polygon) => Ok(Geometry::Polygon(convert_polygon(polygon)?)),
            other => Err(GeodrawTypesError::Conversion(format!(
                "unsupported geometry type: {}",
                type_name(other)
            ))),
        }
    }
}

impl From<&FeatureRecord> for geojson::Feature {
    fn from(record: &FeatureRecord) -> Self {
        let mut properties = JsonObject::new();
        properties.insert(
            KIND_PROPERTY.to_string(),
            JsonValue::String(record.kind.name().to_string()),
        );

        geojson::Feature {
            bbox: None,
            geometry: Some((&record.geometry).into()),
            id: Some(Id::String(record.id.to_string())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl TryFrom<&geojson::Feature> for FeatureRecord {
    type Error = GeodrawTypesError;

    fn try_from(feature: &geojson::Feature) -> Result<Self, Self::Error> {
        let id = match &feature.id {
            Some(Id::String(id)) => FeatureId::new(id.as_str()),
            Some(Id::Number(n)) => FeatureId::new(n.to_string()),
            None => {
                return Err(GeodrawTypesError::InvalidFeature(
                    "feature has no id".to_string(),
                ))
            }
        };

        let kind: ShapeKind = match feature.property(KIND_PROPERTY) {
            Some(JsonValue::String(kind)) => kind.parse()?,
            _ => {
                return Err(GeodrawTypesError::InvalidFeature(format!(
                    "feature {id} has no `{KIND_PROPERTY}` property"
                )))
            }
        };

        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            GeodrawTypesError::InvalidFeature(format!("feature {id} has no geometry"))
        })?;

        Ok(FeatureRecord {
            id,
            kind,
            geometry: geometry.try_into()?,
        })
    }
}
