//! Cross-cluster resource status comparison command

use anyhow::Result;
use report_lib::pipeline::run_comparison;
use std::path::PathBuf;
use tracing::debug;

use crate::config::CompareConfig;
use crate::output::{print_info, print_success, print_table, OutputFormat};

/// Compare the configured clusters and write the comparison workbook
pub async fn compare(
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    preview: Option<OutputFormat>,
) -> Result<()> {
    let mut settings = CompareConfig::load(config_path.as_deref())?.into_settings();
    if let Some(output) = output {
        settings.output = output;
    }
    debug!(
        clusters = settings.clusters.len(),
        output = %settings.output.display(),
        "Loaded comparison configuration"
    );

    let Some(outcome) = run_comparison(&settings).await? else {
        print_info("No clusters configured. Exiting...");
        return Ok(());
    };

    if let Some(format) = preview {
        print_table(&outcome.table, format)?;
    }

    let (rows, columns) = outcome.table.shape();
    print_success(&format!(
        "Comparison complete. Results saved in '{}'",
        outcome.path.display()
    ));
    println!("Table shape: ({}, {})", rows, columns);
    println!("Table columns: {}", outcome.table.columns.join(", "));

    Ok(())
}
