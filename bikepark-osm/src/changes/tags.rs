//! Correspondance type d'arceau -> tags OSM

use std::collections::BTreeMap;

use bikepark::{ParkingType, PointRecord};

use crate::changes::validate::InvalidReason;

/// Tags d'un noeud OSM (ordre déterministe)
pub type FeatureTags = BTreeMap<String, String>;

/// Valeur `bicycle_parking=*` pour un type d'arceau
///
/// Correspondance volontairement approximative pour les catégories ambiguës.
/// `None` pour `RepairStation` (autre objet OSM) et `Unknown`.
pub fn rack_subtype(parking_type: ParkingType) -> Option<&'static str> {
    let subtype = match parking_type {
        // Râtelier à roue avant des cours d'école
        ParkingType::SchoolYard => "rack",
        ParkingType::Bollard => "bollard",
        // Barre horizontale à crochets: le plus proche est "rack"
        ParkingType::CoatHanger => "rack",
        ParkingType::InvertedU => "stands",
        // Chaque ondulation sert d'arceau
        ParkingType::Wave => "stands",
        ParkingType::BikeLocker => "lockers",
        ParkingType::Horned => "stands",
        ParkingType::Spiral => "rack",
        // Pince-roue
        ParkingType::WheelWell => "wall_loops",
        ParkingType::Vertical => "upright_stands",
        // Arceaux artistiques / sur mesure
        ParkingType::Special => "stands",
        ParkingType::RepairStation | ParkingType::Unknown => return None,
    };
    Some(subtype)
}

/// Tags OSM d'un enregistrement validé
///
/// # Errors
///
/// Retourne la raison d'invalidité si l'enregistrement n'est pas publiable
/// (type inconnu ou capacité manquante), la même que `validate::check`.
pub fn feature_tags(record: &PointRecord) -> Result<FeatureTags, InvalidReason> {
    let mut tags = FeatureTags::new();

    if record.parking_type == ParkingType::RepairStation {
        tags.insert("amenity".into(), "bicycle_repair_station".into());
        tags.insert("service:bicycle:pump".into(), "yes".into());
        tags.insert("fee".into(), "no".into());
        return Ok(tags);
    }

    let subtype = rack_subtype(record.parking_type).ok_or(InvalidReason::UnknownType)?;
    let capacity = record.capacity.ok_or(InvalidReason::MissingCapacity)?;

    tags.insert("amenity".into(), "bicycle_parking".into());
    tags.insert("bicycle_parking".into(), subtype.into());
    tags.insert("capacity".into(), capacity.to_string());
    tags.insert("fee".into(), "no".into());
    Ok(tags)
}
