//! Changeset atomique pour un import
//!
//! Le changeset n'est fermé (validé) que si tous les noeuds ont été créés.
//! En cas d'échec il est laissé ouvert: OSM le ferme à expiration, et les
//! noeuds déjà créés restent visibles (pas de compensation).

use thiserror::Error;
use tracing::{error, info, warn};

use crate::changes::{ChangePlan, NodeDraft};
use crate::osm::{ApiError, ChangesetId, ChangesetMetadata, MapApi, NodeId};
use crate::report::{UploadReport, UploadStatus};

/// Échec d'un import: erreur de l'API et rapport des noeuds déjà créés
#[derive(Debug, Error)]
#[error("Upload aborted, {} node(s) already created", .report.created.len())]
pub struct UploadFailed {
    pub report: UploadReport,
    #[source]
    pub source: ApiError,
}

/// Changeset ouvert sur l'API
pub struct Changeset<'a, A: MapApi + ?Sized> {
    api: &'a A,
    id: ChangesetId,
    created: Vec<NodeId>,
    finished: bool,
}

impl<'a, A: MapApi + ?Sized> Changeset<'a, A> {
    /// Ouvre un nouveau changeset
    ///
    /// # Errors
    /// Retourne l'erreur de l'API si le changeset ne peut pas être ouvert
    pub async fn open(api: &'a A, metadata: &ChangesetMetadata) -> Result<Self, ApiError> {
        let id = api.open_changeset(metadata).await?;

        info!(
            changeset = %id,
            comment = %metadata.comment,
            "Changeset opened"
        );

        Ok(Self {
            api,
            id,
            created: Vec::new(),
            finished: false,
        })
    }

    /// Crée un noeud dans ce changeset
    pub async fn create_node(&mut self, draft: &NodeDraft) -> Result<NodeId, ApiError> {
        let node = self
            .api
            .create_node(self.id, draft.latitude, draft.longitude, &draft.tags)
            .await?;
        info!(
            changeset = %self.id,
            node = %node,
            line = draft.record.line,
            parking_type = %draft.record.parking_type,
            "Node created"
        );
        self.created.push(node);
        Ok(node)
    }

    /// Ferme le changeset
    ///
    /// # Errors
    /// Si la fermeture échoue, le changeset est abandonné et l'erreur porte
    /// le rapport
    pub async fn commit(mut self) -> Result<UploadReport, UploadFailed> {
        if let Err(source) = self.api.close_changeset(self.id).await {
            return Err(self.fail(source));
        }
        self.finished = true;

        info!(
            changeset = %self.id,
            nodes = self.created.len(),
            "Changeset closed"
        );

        Ok(UploadReport {
            status: UploadStatus::Committed,
            changeset: Some(self.id),
            created: std::mem::take(&mut self.created),
            ..Default::default()
        })
    }

    /// Abandonne l'émission sans fermer le changeset
    pub fn abort(mut self, reason: &str) -> UploadReport {
        self.finished = true;

        error!(
            changeset = %self.id,
            reason = %reason,
            created = ?self.created,
            "Aborting upload, changeset left open, nodes already created remain in OSM"
        );

        UploadReport {
            status: UploadStatus::Aborted,
            changeset: Some(self.id),
            created: std::mem::take(&mut self.created),
            error: Some(reason.to_string()),
            ..Default::default()
        }
    }

    /// Abandonne et attache le rapport à l'erreur de l'API
    pub fn fail(self, source: ApiError) -> UploadFailed {
        let report = self.abort(&source.to_string());
        UploadFailed { report, source }
    }
}

impl<A: MapApi + ?Sized> Drop for Changeset<'_, A> {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                changeset = %self.id,
                nodes_created = self.created.len(),
                "Changeset dropped without commit"
            );
        }
    }
}

/// Ouvre un changeset, crée chaque noeud dans l'ordre, puis le ferme
///
/// Aucune création n'est tentée si l'ouverture échoue. La première erreur
/// de création arrête l'émission et est propagée.
///
/// # Errors
/// Retourne la première erreur de l'API rencontrée, avec le rapport
/// (statut `Aborted`, noeuds déjà créés)
pub async fn upload<A: MapApi + ?Sized>(
    api: &A,
    metadata: &ChangesetMetadata,
    drafts: &[NodeDraft],
) -> Result<UploadReport, UploadFailed> {
    let mut changeset = match Changeset::open(api, metadata).await {
        Ok(changeset) => changeset,
        Err(source) => {
            error!(error = %source, "Could not open changeset, nothing uploaded");
            let report = UploadReport {
                status: UploadStatus::Aborted,
                error: Some(source.to_string()),
                ..Default::default()
            };
            return Err(UploadFailed { report, source });
        }
    };

    for draft in drafts {
        if let Err(source) = changeset.create_node(draft).await {
            return Err(changeset.fail(source));
        }
    }

    changeset.commit().await
}

/// Publie un plan complet et renseigne les compteurs du rapport
///
/// Un plan vide n'ouvre pas de changeset.
///
/// # Errors
/// Retourne la première erreur de l'API rencontrée, avec le rapport complet
pub async fn upload_plan<A: MapApi + ?Sized>(
    api: &A,
    metadata: &ChangesetMetadata,
    plan: &ChangePlan,
    parsed: usize,
) -> Result<UploadReport, UploadFailed> {
    let with_counts =
        |report: UploadReport| report.with_counts(parsed, plan.excluded.len(), plan.nodes.len());

    if plan.nodes.is_empty() {
        warn!("No node to create, changeset not opened");
        return Ok(with_counts(UploadReport {
            status: UploadStatus::NothingToUpload,
            ..Default::default()
        }));
    }

    match upload(api, metadata, &plan.nodes).await {
        Ok(report) => Ok(with_counts(report)),
        Err(UploadFailed { report, source }) => Err(UploadFailed {
            report: with_counts(report),
            source,
        }),
    }
}
