use std::path::Path;

use anyhow::{Context, Result};
use zonegrid_core::input;
use zonegrid_topology::plan_regions;

use crate::report::format_plans;

pub fn plan(input_path: &Path, az_map_path: &Path, format: &str, max_zones: Option<usize>) -> Result<()> {
    let counts = input::load_counts(input_path)
        .with_context(|| format!("Cannot read submission {}", input_path.display()))?;
    let az_map = input::load_az_map(az_map_path)
        .with_context(|| format!("Cannot read AZ map {}", az_map_path.display()))?;

    let plans = plan_regions(&counts, &az_map, max_zones);

    match format {
        "json" => {
            let value: Vec<serde_json::Value> = plans
                .iter()
                .map(|(region, plan)| serde_json::json!({ "region": region, "placement": plan }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        _ => {
            print!("{}", format_plans(&counts, &plans));
        }
    }

    Ok(())
}
