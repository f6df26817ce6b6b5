//! # bikepark
//!
//! Parser pour les exports de l'enquête sur le stationnement vélo.
//!
//! ## Formes supportées
//!
//! - Export structuré: `longitude,latitude,type,capacité,obstruction,vue,entrée`
//! - Export WKT historique: `"POINT(lon lat,type,Capacity: n)"`, la capacité
//!   pouvant se trouver sur la ligne physique suivante
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bikepark::{parse_file, ParseOptions};
//! use std::path::Path;
//!
//! let records = parse_file(Path::new("survey.csv"), &ParseOptions::default())?;
//! for record in &records {
//!     println!("{} @ {},{}", record.parking_type, record.latitude, record.longitude);
//! }
//! ```

pub mod decode;
pub mod error;
pub mod parser;
pub mod types;

pub use error::SurveyError;
pub use parser::{parse_str, ParseOptions};
pub use types::{Obstruction, ParkingType, PointRecord, RowShape};

use std::path::Path;

use tracing::info;

/// Parse un fichier d'export et retourne les points dans l'ordre du fichier.
///
/// # Errors
///
/// Retourne `SurveyError` si le fichier est illisible, vide, ou si un champ
/// numérique attendu est invalide. Aucune récupération ligne à ligne.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<Vec<PointRecord>, SurveyError> {
    let content = decode::read(path)?;
    let records = parse_str(&content, options)?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Parsed survey export"
    );

    Ok(records)
}
