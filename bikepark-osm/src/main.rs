//! Point d'entrée CLI pour bikepark-osm

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use bikepark_osm::cli::{self, Commands};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Importer une enquête de stationnements vélo dans OpenStreetMap
#[derive(Parser)]
#[command(name = "bikepark-osm")]
#[command(author, version)]
#[command(about = "Importer une enquête de stationnements vélo dans OpenStreetMap")]
#[command(long_about = "Parse un export d'enquête (CSV structuré ou lignes POINT héritées), valide chaque point, ignore les doublons connus puis crée les noeuds dans un seul changeset.\n\nUtilisez 'to-geojson' pour relire le résultat sans rien publier.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Upload {
            input,
            comment,
            source,
            dry_run,
            report,
        } => {
            info!(path = %input.path.display(), dry_run, "Upload to OpenStreetMap");
            cli::cmd_upload(&input, comment, source, dry_run, report.as_deref()).await?;
        }
        Commands::ToGeojson { input, output } => {
            info!(path = %input.path.display(), output = %output.display(), "Export to GeoJSON");
            cli::cmd_export(&input, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
