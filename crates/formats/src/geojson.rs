use serde_json::{Map, Value};

use crate::record::VolcanoRecord;

/// Emits a GeoJSON FeatureCollection with one Point feature per record.
pub fn records_to_geojson_value<'a>(records: impl IntoIterator<Item = &'a VolcanoRecord>) -> Value {
    let features: Vec<Value> = records.into_iter().map(record_feature).collect();

    let mut root = Map::new();
    root.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );
    root.insert("features".to_string(), Value::Array(features));
    Value::Object(root)
}

pub fn records_to_geojson_string_pretty<'a>(
    records: impl IntoIterator<Item = &'a VolcanoRecord>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&records_to_geojson_value(records))
}

fn record_feature(record: &VolcanoRecord) -> Value {
    let mut props = Map::new();
    props.insert("country".to_string(), Value::String(record.country.clone()));
    props.insert("name".to_string(), Value::String(record.name.clone()));
    props.insert(
        "primary_type".to_string(),
        Value::String(record.primary_type.clone()),
    );
    if let Some(elevation) = record.elevation_m {
        props.insert("elevation_m".to_string(), Value::from(elevation));
    }
    if let Some(link) = &record.link {
        props.insert("link".to_string(), Value::String(link.clone()));
    }

    let mut geometry = Map::new();
    geometry.insert("type".to_string(), Value::String("Point".to_string()));
    geometry.insert(
        "coordinates".to_string(),
        Value::Array(vec![
            Value::from(record.location.lon_deg),
            Value::from(record.location.lat_deg),
        ]),
    );

    let mut feature = Map::new();
    feature.insert("type".to_string(), Value::String("Feature".to_string()));
    feature.insert(
        "id".to_string(),
        Value::String(format!("{}/{}", record.country, record.name)),
    );
    feature.insert("properties".to_string(), Value::Object(props));
    feature.insert("geometry".to_string(), Value::Object(geometry));
    Value::Object(feature)
}
