//! Construction des modifications OSM depuis les enregistrements parsés
//!
//! Validation -> filtrage des doublons -> correspondance de tags.

pub mod exclusion;
pub mod tags;
pub mod validate;

pub use exclusion::{ExcludedPoint, ExclusionList};
pub use tags::FeatureTags;
pub use validate::{validate, InvalidRecord, ValidationError};

use bikepark::PointRecord;
use tracing::{debug, error, info};

/// Noeud à créer
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraft {
    pub latitude: f64,
    pub longitude: f64,
    pub tags: FeatureTags,
    /// Enregistrement source
    pub record: PointRecord,
}

/// Résultat de la construction: noeuds à créer et points ignorés
#[derive(Debug, Default)]
pub struct ChangePlan {
    /// Dans l'ordre de l'export
    pub nodes: Vec<NodeDraft>,
    pub excluded: Vec<PointRecord>,
}

/// Valide, filtre et convertit les enregistrements
///
/// # Errors
///
/// Retourne `ValidationError` si au moins un enregistrement est invalide;
/// dans ce cas aucun noeud n'est produit.
pub fn build_changes(
    records: &[PointRecord],
    exclusions: &ExclusionList,
) -> Result<ChangePlan, ValidationError> {
    validate(records)?;
    debug!(records = records.len(), "All records valid");
    if !exclusions.is_empty() {
        debug!(exclusions = exclusions.len(), "Filtering known duplicates");
    }

    let mut plan = ChangePlan::default();
    for record in records {
        if exclusions.contains(record) {
            info!(
                line = record.line,
                lat = record.latitude,
                lon = record.longitude,
                parking_type = %record.parking_type,
                "Skipping known duplicate"
            );
            plan.excluded.push(record.clone());
            continue;
        }

        let tags = tags::feature_tags(record).map_err(|reason| {
            error!(
                line = record.line,
                reason = ?reason,
                "Valid record has no OSM mapping"
            );
            ValidationError {
                invalid: vec![InvalidRecord {
                    record: record.clone(),
                    reason,
                }],
            }
        })?;
        plan.nodes.push(NodeDraft {
            latitude: record.latitude,
            longitude: record.longitude,
            tags,
            record: record.clone(),
        });
    }

    info!(
        nodes = plan.nodes.len(),
        excluded = plan.excluded.len(),
        "Change plan built"
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikepark::ParkingType;

    #[test]
    fn test_build_changes_keeps_order_and_filters() {
        let records = vec![
            PointRecord::new(1, -105.1, 39.7, ParkingType::Bollard, Some(1)),
            PointRecord::new(2, -105.2, 39.8, ParkingType::InvertedU, Some(4)),
            PointRecord::new(3, -105.3, 39.9, ParkingType::RepairStation, None),
        ];
        let exclusions = ExclusionList::from_pairs(&[(39.8, -105.2)]);

        let plan = build_changes(&records, &exclusions).unwrap();
        let lines: Vec<_> = plan.nodes.iter().map(|n| n.record.line).collect();
        assert_eq!(lines, vec![1, 3]);
        assert_eq!(plan.excluded.len(), 1);
        assert_eq!(plan.excluded[0].line, 2);
    }

    #[test]
    fn test_mapping_fails_exactly_when_validation_does() {
        let types = ParkingType::ALL.into_iter().chain([ParkingType::Unknown]);
        for parking_type in types {
            for capacity in [None, Some(3)] {
                let record = PointRecord::new(1, -105.1, 39.7, parking_type, capacity);
                assert_eq!(
                    tags::feature_tags(&record).err(),
                    validate::check(&record),
                    "{parking_type:?} {capacity:?}"
                );
            }
        }
    }

    #[test]
    fn test_build_changes_rejects_before_filtering() {
        // Un enregistrement invalide dans la liste d'exclusion reste une erreur
        let records = vec![PointRecord::new(1, -105.2, 39.8, ParkingType::Unknown, Some(1))];
        let exclusions = ExclusionList::from_pairs(&[(39.8, -105.2)]);

        let err = build_changes(&records, &exclusions).unwrap_err();
        assert_eq!(err.invalid.len(), 1);
    }
}
