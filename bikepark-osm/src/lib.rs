//! # bikepark-osm
//!
//! Import d'une enquête de stationnements vélo vers OpenStreetMap.
//!
//! ## Features
//!
//! - Validation complète avant tout appel réseau
//! - Exclusion des doublons déjà présents dans OSM
//! - Un seul changeset par exécution (ouverture, noeuds, fermeture)
//! - Export GeoJSON pour relecture
//!
//! ## Usage CLI
//!
//! ```bash
//! # Import vers OSM (autorisation OAuth2 interactive)
//! bikepark-osm upload --path ./survey.csv --comment "Denver bike parking survey"
//!
//! # Relecture en GeoJSON (sans réseau)
//! bikepark-osm to-geojson --path ./survey.csv --output ./survey.geojson
//! ```

pub mod changes;
pub mod cli;
pub mod config;
pub mod export;
pub mod oauth;
pub mod osm;
pub mod report;

pub use changes::{build_changes, ChangePlan, ExclusionList, NodeDraft, ValidationError};
pub use config::{ApiConfig, Credentials};
pub use osm::{upload, ApiError, ChangesetMetadata, MapApi, OsmClient, UploadFailed};
pub use report::{UploadReport, UploadStatus};
