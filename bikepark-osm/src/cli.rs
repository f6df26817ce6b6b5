//! Définition et implémentation des commandes CLI
//!
//! - `upload`: export d'enquête → changeset OSM
//! - `to-geojson`: export d'enquête → GeoJSON (sans réseau)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use bikepark::{ParseOptions, PointRecord};

use crate::changes::{build_changes, ChangePlan, ExcludedPoint, ExclusionList};
use crate::config::{ApiConfig, Credentials};
use crate::osm::{ChangesetMetadata, OsmClient};
use crate::report::UploadReport;

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the survey to OpenStreetMap in a single changeset
    Upload {
        #[command(flatten)]
        input: InputArgs,

        /// Changeset comment
        #[arg(long)]
        comment: Option<String>,

        /// Changeset source attribution
        #[arg(long)]
        source: Option<String>,

        /// Parse, validate and plan only (no authorization, no upload)
        #[arg(long)]
        dry_run: bool,

        /// Save the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Export the planned nodes to GeoJSON for review (no network)
    ToGeojson {
        #[command(flatten)]
        input: InputArgs,

        /// Output GeoJSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Arguments communs de lecture de l'export
#[derive(Args)]
pub struct InputArgs {
    /// Path to the survey export (structured CSV or legacy WKT rows)
    #[arg(short, long)]
    pub path: PathBuf,

    /// The first row is a column header
    #[arg(long)]
    pub header: bool,

    /// Additional coordinate to skip, as LAT,LON (repeatable)
    #[arg(long = "exclude", value_name = "LAT,LON")]
    pub exclude: Vec<ExcludedPoint>,
}

impl InputArgs {
    fn exclusions(&self) -> ExclusionList {
        ExclusionList::default().with_extra(self.exclude.iter().copied())
    }
}

/// Parse puis valide / filtre / convertit l'export
///
/// Toute erreur ici survient avant le moindre appel réseau.
fn load_plan(input: &InputArgs) -> Result<(Vec<PointRecord>, ChangePlan)> {
    let options = ParseOptions {
        skip_header: input.header,
    };
    let records = bikepark::parse_file(&input.path, &options)
        .context(format!("Failed to parse {}", input.path.display()))?;

    let plan = build_changes(&records, &input.exclusions())?;

    Ok((records, plan))
}

/// Exécute la commande upload
pub async fn cmd_upload(
    input: &InputArgs,
    comment: Option<String>,
    source: Option<String>,
    dry_run: bool,
    report_path: Option<&Path>,
) -> Result<()> {
    let (records, plan) = load_plan(input)?;

    let mut metadata = ChangesetMetadata::default();
    if let Some(comment) = comment {
        metadata.comment = comment;
    }
    if let Some(source) = source {
        metadata.source = source;
    }

    println!("=== Upload {} ===", input.path.display());
    println!("Records: {}", records.len());
    println!("Excluded: {}", plan.excluded.len());
    println!("Nodes to create: {}", plan.nodes.len());
    println!("Comment: {}", metadata.comment);
    println!("Source: {}", metadata.source);

    let report = if dry_run {
        info!("Dry run, nothing uploaded");
        UploadReport::dry_run(plan.nodes.len()).with_counts(
            records.len(),
            plan.excluded.len(),
            plan.nodes.len(),
        )
    } else {
        let credentials = Credentials::from_env()?;
        let config = ApiConfig::from_env();
        println!("API: {}", config.api_url);

        let session = crate::oauth::authorize(&credentials, &config).await?;
        let client = OsmClient::new(session);

        match crate::osm::upload_plan(&client, &metadata, &plan, records.len()).await {
            Ok(report) => report,
            Err(failed) => {
                publish_report(&failed.report, report_path)?;
                return Err(failed.into());
            }
        }
    };

    publish_report(&report, report_path)
}

/// Affiche le rapport et le sauvegarde si demandé
fn publish_report(report: &UploadReport, path: Option<&Path>) -> Result<()> {
    report.display();
    if let Some(path) = path {
        report.save_to_file(path)?;
        info!(path = %path.display(), "Report saved");
    }
    info!("{}", report.summary());
    Ok(())
}

/// Exécute la commande to-geojson
pub fn cmd_export(input: &InputArgs, output: &Path) -> Result<()> {
    let (records, plan) = load_plan(input)?;

    crate::export::export_to_geojson(&plan.nodes, output)?;

    info!(
        records = records.len(),
        nodes = plan.nodes.len(),
        excluded = plan.excluded.len(),
        output = %output.display(),
        "GeoJSON export done"
    );
    println!(
        "{} feature(s) written to {}",
        plan.nodes.len(),
        output.display()
    );

    Ok(())
}
