//! Per-cluster resource summary command

use anyhow::Result;
use report_lib::pipeline::run_summary;
use report_lib::SummarySettings;

use crate::output::{print_info, print_success, print_table, OutputFormat};

/// Discover clusters and write the summary workbook
pub async fn analyze(settings: &SummarySettings, preview: Option<OutputFormat>) -> Result<()> {
    let Some(outcome) = run_summary(settings).await? else {
        print_info("No clusters found. Exiting...");
        return Ok(());
    };

    if let Some(format) = preview {
        print_table(&outcome.table, format)?;
    }

    let mut clusters: Vec<&str> = outcome.clusters.names().collect();
    clusters.sort_unstable();

    print_success(&format!(
        "Analysis complete! Results saved in '{}'",
        outcome.path.display()
    ));
    println!(
        "Total resource types analyzed: {}",
        outcome.resource_types.unwrap_or_default()
    );
    println!("Clusters included: {}", clusters.join(", "));

    Ok(())
}
