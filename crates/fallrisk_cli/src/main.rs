mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fallrisk_core::CheckKind;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fallrisk")]
#[command(version, about = "Fall-risk dataset validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the dataset release against its schema and quality report
    Validate {
        /// Directory holding the dataset assets
        #[arg(short, long, env = "FALLRISK_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Run configuration file (TOML, YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Run only the named check (repeatable)
        #[arg(long = "only", value_name = "CHECK")]
        only: Vec<CheckKind>,

        /// Compare CSV columns with the schema as a set, ignoring order
        #[arg(long)]
        unordered_columns: bool,
    },

    /// Check a schema file without validating data
    Check {
        /// Path to the schema file (JSON, YAML or TOML)
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            data_dir,
            config,
            format,
            only,
            unordered_columns,
        } => commands::validate::execute(commands::validate::ValidateArgs {
            data_dir,
            config,
            format,
            only,
            unordered_columns,
        }),

        Commands::Check { schema } => commands::check::execute(&schema),
    }
}
