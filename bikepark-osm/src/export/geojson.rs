//! Export GeoJSON des noeuds prévus (relecture avant import)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::changes::NodeDraft;

/// Exporte les noeuds prévus en FeatureCollection
pub fn export_to_geojson(nodes: &[NodeDraft], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    let collection = to_feature_collection(nodes);
    serde_json::to_writer(&mut writer, &collection).context("Failed to write GeoJSON")?;
    writer.flush()?;

    Ok(())
}

/// Construit la FeatureCollection (tags OSM + attributs d'enquête)
pub fn to_feature_collection(nodes: &[NodeDraft]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: nodes.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(node: &NodeDraft) -> Feature {
    let mut properties = JsonObject::new();
    for (k, v) in &node.tags {
        properties.insert(k.clone(), JsonValue::from(v.as_str()));
    }

    // Attributs d'enquête non publiés, préfixés pour les distinguer des tags
    let record = &node.record;
    properties.insert("_line".into(), JsonValue::from(record.line));
    properties.insert("_type".into(), JsonValue::from(record.parking_type.label()));
    if let Some(obstruction) = record.obstruction {
        properties.insert("_obstruction".into(), JsonValue::from(obstruction.as_str()));
    }
    if let Some(sight) = record.within_plain_sight {
        properties.insert("_plain_sight".into(), JsonValue::from(sight));
    }
    if let Some(entrance) = record.within_view_of_entrance {
        properties.insert("_entrance_view".into(), JsonValue::from(entrance));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            node.longitude,
            node.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::tags::feature_tags;
    use bikepark::{Obstruction, ParkingType, PointRecord};

    fn draft(record: PointRecord) -> NodeDraft {
        NodeDraft {
            latitude: record.latitude,
            longitude: record.longitude,
            tags: feature_tags(&record).unwrap(),
            record,
        }
    }

    #[test]
    fn test_feature_properties() {
        let mut record = PointRecord::new(3, -105.1, 39.7, ParkingType::InvertedU, Some(4));
        record.obstruction = Some(Obstruction::Low);
        record.within_plain_sight = Some(true);

        let feature = to_feature(&draft(record));
        let props = feature.properties.unwrap();

        assert_eq!(props["bicycle_parking"], "stands");
        assert_eq!(props["capacity"], "4");
        assert_eq!(props["_line"], 3);
        assert_eq!(props["_obstruction"], "low");
        assert_eq!(props["_plain_sight"], true);
        assert!(!props.contains_key("_entrance_view"));
    }

    #[test]
    fn test_export_to_geojson() {
        let nodes = vec![draft(PointRecord::new(
            1,
            -105.1,
            39.7,
            ParkingType::Bollard,
            Some(1),
        ))];

        let output_path = std::env::temp_dir().join("test_bikepark.geojson");
        export_to_geojson(&nodes, &output_path).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: geojson::GeoJson = content.parse().unwrap();
        match parsed {
            geojson::GeoJson::FeatureCollection(fc) => {
                assert_eq!(fc.features.len(), 1);
                let geometry = fc.features[0].geometry.as_ref().unwrap();
                assert_eq!(geometry.value, Value::Point(vec![-105.1, 39.7]));
            }
            other => panic!("Expected FeatureCollection, got {:?}", other),
        }

        std::fs::remove_file(output_path).ok();
    }
}
