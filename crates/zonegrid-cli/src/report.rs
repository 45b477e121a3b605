//! Human-readable output.

use zonegrid_core::ResourceCounts;
use zonegrid_placement::PlacementPlan;
use zonegrid_topology::{GenerationReport, RegionOutcome};

pub fn format_generation(report: &GenerationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\nDiagrams ({} regions):\n", report.regions.len()));
    for region in &report.regions {
        match &region.outcome {
            RegionOutcome::Rendered { path } => {
                out.push_str(&format!("  ✅ {:<20} {}\n", region.region, path.display()));
            }
            RegionOutcome::Skipped => {
                out.push_str(&format!("  ⏭  {:<20} no availability zones known\n", region.region));
            }
            RegionOutcome::Failed { error } => {
                out.push_str(&format!("  ❌ {:<20} {error}\n", region.region));
            }
        }
    }

    let rendered = report.rendered().count();
    let failed = report.failed().count();
    out.push_str(&format!("\n{rendered} rendered, {failed} failed\n"));
    out
}

pub fn format_plans(counts: &ResourceCounts, plans: &[(String, PlacementPlan)]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nRequest from {}: {} compute, {} storage, {} database ({} total)\n",
        counts.submitter,
        counts.compute,
        counts.object_storage,
        counts.database,
        counts.total()
    ));

    if plans.is_empty() {
        out.push_str("\nNo candidate region has known availability zones.\n");
        return out;
    }

    for (region, plan) in plans {
        out.push_str(&format!("\n{region}:\n"));
        for zone in &plan.zones {
            if zone.is_empty() {
                out.push_str(&format!("  {} (empty, omitted)\n", zone.zone));
                continue;
            }
            out.push_str(&format!("  {}\n", zone.zone));
            if !zone.compute.is_empty() {
                out.push_str(&format!("    compute:  {}\n", zone.compute.join(", ")));
            }
            if !zone.storage.is_empty() {
                out.push_str(&format!("    storage:  {}\n", zone.storage.join(", ")));
            }
            if !zone.database.is_empty() {
                let dbs: Vec<String> = zone
                    .database
                    .iter()
                    .map(|&i| {
                        if plan.is_writer(i) {
                            format!("{i} (writer)")
                        } else {
                            i.to_string()
                        }
                    })
                    .collect();
                out.push_str(&format!("    database: {}\n", dbs.join(", ")));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegrid_placement::place;

    #[test]
    fn plans_mark_writer_and_empty_zones() {
        let counts = ResourceCounts::new(1, 0, 2);
        let zones = vec!["az-a".to_string(), "az-b".to_string(), "az-c".to_string()];
        let plan = place(&counts, &zones).unwrap();

        let text = format_plans(&counts, &[("r1".to_string(), plan)]);
        assert!(text.contains("anonymous: 1 compute, 0 storage, 2 database (3 total)"));
        assert!(text.contains("database: 0 (writer)"));
        assert!(text.contains("database: 1\n"));
        assert!(text.contains("az-c (empty, omitted)"));
    }

    #[test]
    fn no_plans() {
        let text = format_plans(&ResourceCounts::new(1, 1, 1), &[]);
        assert!(text.contains("No candidate region"));
    }

    #[test]
    fn generation_summary() {
        let report = GenerationReport::default();
        assert!(format_generation(&report).contains("0 rendered, 0 failed"));
    }
}
