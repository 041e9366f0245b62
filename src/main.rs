//! Catmeta - Tabular dataset metadata to catalog JSON transformer
//!
//! Command line entry point: parses arguments, loads configuration,
//! initializes tracing and runs the requested transformation.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catmeta::identity::GitIdentity;
use catmeta::transform::{self, MetadataType};
use catmeta::AppConfig;

#[derive(Parser)]
#[command(name = "catmeta", version, about = "Transform tabular dataset metadata into catalog JSON")]
struct Cli {
    /// Path to the metadata TSV file
    #[arg(short, long, value_name = "METADATA")]
    metadata: PathBuf,

    /// The type of metadata file supplied
    #[arg(short = 't', long = "type", value_name = "TYPE", value_enum)]
    metadata_type: MetadataType,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catmeta={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting catmeta v{}", env!("CARGO_PKG_VERSION"));

    transform::run(&cli.metadata, cli.metadata_type, &config, &GitIdentity)?;

    Ok(())
}
