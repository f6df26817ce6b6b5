//! Accès à l'API d'édition OpenStreetMap (v0.6)

pub mod changeset;
pub mod client;
pub mod xml;

pub use changeset::{upload, upload_plan, Changeset, UploadFailed};
pub use client::OsmClient;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::changes::FeatureTags;

/// Identifiant de changeset OSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ChangesetId(pub u64);

/// Identifiant de noeud OSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct NodeId(pub u64);

impl fmt::Display for ChangesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Métadonnées d'un changeset
#[derive(Debug, Clone)]
pub struct ChangesetMetadata {
    pub comment: String,
    pub source: String,
    pub created_by: String,
}

impl Default for ChangesetMetadata {
    fn default() -> Self {
        Self {
            comment: "Add bicycle parking from city survey".into(),
            source: "survey".into(),
            created_by: format!("bikepark-osm/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ChangesetMetadata {
    /// Tags du changeset
    pub fn tags(&self) -> FeatureTags {
        [
            ("comment", self.comment.as_str()),
            ("source", self.source.as_str()),
            ("created_by", self.created_by.as_str()),
            ("import", "yes"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

/// Erreurs de l'API OSM, propagées sans transformation
#[derive(Debug, Error)]
pub enum ApiError {
    /// Erreur réseau / HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Réponse non 2xx
    #[error("OSM API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Réponse inattendue (identifiant illisible, etc.)
    #[error("Invalid OSM API response: {0}")]
    InvalidResponse(String),

    /// Échec de sérialisation XML
    #[error("XML error: {0}")]
    Xml(#[from] std::io::Error),
}

/// Opérations d'édition utilisées pour l'import
#[async_trait]
pub trait MapApi {
    /// Ouvre un changeset
    async fn open_changeset(&self, metadata: &ChangesetMetadata) -> Result<ChangesetId, ApiError>;

    /// Crée un noeud dans un changeset ouvert
    async fn create_node(
        &self,
        changeset: ChangesetId,
        latitude: f64,
        longitude: f64,
        tags: &FeatureTags,
    ) -> Result<NodeId, ApiError>;

    /// Ferme (valide) un changeset
    async fn close_changeset(&self, changeset: ChangesetId) -> Result<(), ApiError>;
}
