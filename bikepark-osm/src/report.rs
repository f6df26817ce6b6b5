//! Rapport d'exécution d'un import

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::osm::{ChangesetId, NodeId};

/// Statut final d'un import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum UploadStatus {
    /// Tous les noeuds créés et changeset fermé
    #[default]
    Committed,
    /// Émission interrompue, changeset laissé ouvert
    Aborted,
    /// Simulation: aucun appel à l'API
    DryRun,
    /// Aucun noeud à créer: pas de changeset ouvert
    NothingToUpload,
}

/// Rapport d'un import
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub status: UploadStatus,
    pub changeset: Option<ChangesetId>,

    /// Enregistrements parsés
    pub parsed: usize,
    /// Doublons connus ignorés
    pub excluded: usize,
    /// Noeuds prévus
    pub planned: usize,
    /// Noeuds créés, dans l'ordre
    pub created: Vec<NodeId>,

    pub error: Option<String>,
}

impl UploadReport {
    /// Rapport de simulation
    pub fn dry_run(planned: usize) -> Self {
        Self {
            status: UploadStatus::DryRun,
            planned,
            ..Default::default()
        }
    }

    /// Complète les compteurs issus du parsing et du filtrage
    pub fn with_counts(mut self, parsed: usize, excluded: usize, planned: usize) -> Self {
        self.parsed = parsed;
        self.excluded = excluded;
        self.planned = planned;
        self
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("UPLOAD REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        if let Some(changeset) = self.changeset {
            println!("Changeset: {}", changeset);
        }
        println!(
            "Records: {} parsed, {} excluded, {} planned, {} created",
            self.parsed,
            self.excluded,
            self.planned,
            self.created.len()
        );
        if let Some(ref error) = self.error {
            println!("Error: {}", error);
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Résumé sur une ligne
    pub fn summary(&self) -> String {
        let changeset = self
            .changeset
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        format!(
            "{:?} (changeset {}): {} created / {} planned, {} excluded",
            self.status,
            changeset,
            self.created.len(),
            self.planned,
            self.excluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_report_default() {
        let report = UploadReport::default();
        assert_eq!(report.status, UploadStatus::Committed);
        assert!(report.created.is_empty());
        assert!(report.changeset.is_none());
    }

    #[test]
    fn test_dry_run() {
        let report = UploadReport::dry_run(12).with_counts(15, 3, 12);
        assert_eq!(report.status, UploadStatus::DryRun);
        assert_eq!(report.parsed, 15);
        assert_eq!(report.excluded, 3);
        assert_eq!(report.planned, 12);
    }

    #[test]
    fn test_summary() {
        let report = UploadReport {
            changeset: Some(ChangesetId(77)),
            created: vec![NodeId(1), NodeId(2)],
            planned: 2,
            ..Default::default()
        };
        let summary = report.summary();
        assert!(summary.contains("changeset 77"));
        assert!(summary.contains("2 created / 2 planned"));
    }

    #[test]
    fn test_save_to_file() {
        let report = UploadReport {
            changeset: Some(ChangesetId(5)),
            created: vec![NodeId(10)],
            ..Default::default()
        };
        let path = std::env::temp_dir().join("bikepark_report_test.json");
        report.save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"status\": \"Committed\""));
        assert!(content.contains("\"changeset\": 5"));

        std::fs::remove_file(path).ok();
    }
}
