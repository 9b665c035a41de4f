//! The `quizguard` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizguard", version, about = "Quiz record integrity checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw records into the canonical shape
    Normalize {
        /// JSON array, {"questions": [...]} envelope, or raw extraction response
        #[arg(long)]
        input: PathBuf,

        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate records and produce an integrity report
    Validate {
        /// JSON array, {"questions": [...]} envelope, or raw extraction response
        #[arg(long)]
        input: PathBuf,

        /// Source text the records were extracted from
        #[arg(long)]
        source: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, sarif
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit code 1 if any issue is found
        #[arg(long)]
        fail_on_issues: bool,
    },

    /// Order records for presentation
    Arrange {
        /// JSON array, {"questions": [...]} envelope, or raw extraction response
        #[arg(long)]
        input: PathBuf,

        /// "random" shuffles; anything else keeps input order
        #[arg(long, default_value = "random")]
        mode: String,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compare two captures of the same records for drift
    Compare {
        /// Baseline records
        #[arg(long)]
        baseline: PathBuf,

        /// Current records
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the captures differ
        #[arg(long)]
        fail_on_drift: bool,
    },

    /// Create starter config and sample records
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizguard=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize { input, output } => commands::normalize::execute(input, output),
        Commands::Validate {
            input,
            source,
            config,
            format,
            output,
            fail_on_issues,
        } => commands::validate::execute(input, source, config, format, output, fail_on_issues),
        Commands::Arrange { input, mode, seed } => commands::arrange::execute(input, mode, seed),
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_drift,
        } => commands::compare::execute(baseline, current, format, fail_on_drift),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
