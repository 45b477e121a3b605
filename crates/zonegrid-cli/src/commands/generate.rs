//! `zonegrid generate` — render one diagram per candidate region.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use zonegrid_core::{OutputFormat, ZonegridConfig, input};
use zonegrid_topology::{DotRenderer, GenerateOptions, GenerationReport};

use crate::report::format_generation;

/// Command-line overrides; anything left `None` comes from the config file.
#[derive(Debug, Default)]
pub struct GenerateRequest {
    pub input: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub az_map: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub config: Option<PathBuf>,
}

pub fn generate(req: &GenerateRequest) -> Result<()> {
    let report = run(req)?;
    print!("{}", format_generation(&report));
    Ok(())
}

/// Load inputs and generate every region. Only input problems are errors;
/// per-region failures are carried in the report.
pub fn run(req: &GenerateRequest) -> Result<GenerationReport> {
    let config = ZonegridConfig::load(req.config.as_deref())?;

    let input_path = resolve_input(req, &config)?;
    info!(path = %input_path.display(), "using submission");
    let counts = input::load_counts(&input_path)
        .with_context(|| format!("Cannot read submission {}", input_path.display()))?;

    // A relative AZ map path is resolved against the input directory.
    let az_map_path = match &req.az_map {
        Some(path) => path.clone(),
        None => input_dir(req, &config).join(&config.input.az_map),
    };
    let az_map = input::load_az_map(&az_map_path)
        .with_context(|| format!("Cannot read AZ map {}", az_map_path.display()))?;

    let format = match &req.format {
        Some(f) => f.parse::<OutputFormat>()?,
        None => config.output.format,
    };
    let out_dir = req.out_dir.clone().unwrap_or_else(|| config.output.dir.clone());

    let mut renderer =
        DotRenderer::new(&out_dir, format).with_graphviz(config.output.graphviz.as_str());
    let options = GenerateOptions::from(&config.layout);

    Ok(zonegrid_topology::generate(&counts, &az_map, &mut renderer, &options))
}

fn resolve_input(req: &GenerateRequest, config: &ZonegridConfig) -> Result<PathBuf> {
    if let Some(path) = &req.input {
        return Ok(path.clone());
    }
    Ok(input::latest_input(input_dir(req, config), &config.input.suffix)?)
}

fn input_dir<'a>(req: &'a GenerateRequest, config: &'a ZonegridConfig) -> &'a Path {
    req.input_dir.as_deref().unwrap_or(&config.input.dir)
}
