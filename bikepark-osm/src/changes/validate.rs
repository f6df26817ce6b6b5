//! Validation des enregistrements avant publication
//!
//! Tous les enregistrements invalides sont collectés avant l'abandon, pour
//! que l'opérateur puisse corriger l'export en une seule passe.

use std::fmt;

use bikepark::{ParkingType, PointRecord};
use thiserror::Error;
use tracing::warn;

/// Enregistrement rejeté et raison du rejet
#[derive(Debug, Clone)]
pub struct InvalidRecord {
    pub record: PointRecord,
    pub reason: InvalidReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Libellé de type non reconnu
    UnknownType,
    /// Capacité manquante pour un type qui l'exige
    MissingCapacity,
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capacity = self
            .record
            .capacity
            .map_or_else(|| "none".to_string(), |c| c.to_string());
        let reason = match self.reason {
            InvalidReason::UnknownType => "unknown parking type",
            InvalidReason::MissingCapacity => "missing capacity",
        };
        write!(
            f,
            "line {}: ({}, {}) type={} capacity={}: {}",
            self.record.line,
            self.record.latitude,
            self.record.longitude,
            self.record.parking_type,
            capacity,
            reason
        )
    }
}

/// Échec de validation: au moins un enregistrement invalide
#[derive(Debug, Error)]
pub struct ValidationError {
    pub invalid: Vec<InvalidRecord>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid record(s), nothing uploaded", self.invalid.len())?;
        for invalid in &self.invalid {
            write!(f, "\n  {invalid}")?;
        }
        Ok(())
    }
}

/// Raison d'invalidité d'un enregistrement, `None` s'il est publiable
pub fn check(record: &PointRecord) -> Option<InvalidReason> {
    if record.parking_type == ParkingType::Unknown {
        Some(InvalidReason::UnknownType)
    } else if !record.is_valid_for_upload() {
        Some(InvalidReason::MissingCapacity)
    } else {
        None
    }
}

/// Valide tous les enregistrements
///
/// # Errors
///
/// Retourne `ValidationError` listant chaque enregistrement invalide.
pub fn validate(records: &[PointRecord]) -> Result<(), ValidationError> {
    let invalid: Vec<InvalidRecord> = records
        .iter()
        .filter_map(|record| {
            check(record).map(|reason| InvalidRecord {
                record: record.clone(),
                reason,
            })
        })
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    warn!(invalid = invalid.len(), "Validation failed, nothing will be uploaded");

    Err(ValidationError { invalid })
}
