use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod report;

#[derive(Parser)]
#[command(
    name = "zonegrid",
    about = "zonegrid — Multi-AZ topology diagrams from resource counts",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one diagram per candidate region.
    ///
    /// Reads the submission from --input, or the newest *_input_data.json
    /// in --input-dir. Regions missing from the AZ map are skipped.
    /// Runs sharing an output directory must not overlap.
    Generate {
        /// Submission file
        #[arg(short, long, conflicts_with = "input_dir")]
        input: Option<PathBuf>,
        /// Directory to pick the newest submission from
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Region → availability zone map (JSON)
        #[arg(short, long)]
        az_map: Option<PathBuf>,
        /// Where diagrams are written
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Output format: dot, png or svg
        #[arg(short, long)]
        format: Option<String>,
        /// Path to zonegrid.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the placement for each region without rendering
    Plan {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        az_map: PathBuf,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Only the first N zones of each region are used
        #[arg(long)]
        max_zones: Option<NonZeroUsize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zonegrid=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            input_dir,
            az_map,
            out_dir,
            format,
            config,
        } => commands::generate::generate(&commands::generate::GenerateRequest {
            input,
            input_dir,
            az_map,
            out_dir,
            format,
            config,
        }),
        Commands::Plan {
            input,
            az_map,
            format,
            max_zones,
        } => commands::plan::plan(&input, &az_map, &format, max_zones.map(NonZeroUsize::get)),
    }
}
