//! End-to-end report runs
//!
//! Each run resolves clusters, fetches every cluster's resources one after
//! another, builds the report in memory and only then writes the workbook.

use crate::client::{ControlPlaneClient, Credentials};
use crate::detail::fetch_details;
use crate::fetcher::fetch_inventory;
use crate::models::{Cluster, ClusterSet};
use crate::naming::{customer_name, summary_filename};
use crate::report::comparison::{self, build_comparison};
use crate::report::summary::build_summary;
use crate::report::Table;
use crate::resolver::ClusterSource;
use crate::xlsx::{write_table, SheetStyle};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Inputs of the summary run
#[derive(Debug, Clone)]
pub struct SummarySettings {
    pub control_plane_url: String,
    pub credentials: Credentials,
    /// Directory receiving the timestamped workbook
    pub output_dir: PathBuf,
    pub timeout: Option<Duration>,
}

/// Inputs of the comparison run
#[derive(Debug, Clone)]
pub struct ComparisonSettings {
    pub control_plane_url: String,
    pub credentials: Credentials,
    pub clusters: Vec<Cluster>,
    pub output: PathBuf,
    pub timeout: Option<Duration>,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub path: PathBuf,
    pub table: Table,
    pub clusters: ClusterSet,
    /// Distinct resource types, reported by the summary run only
    pub resource_types: Option<usize>,
}

fn connect(url: &str, credentials: &Credentials, timeout: Option<Duration>) -> Result<ControlPlaneClient> {
    let client = match timeout {
        Some(timeout) => ControlPlaneClient::with_timeout(url, credentials, timeout),
        None => ControlPlaneClient::new(url, credentials),
    };
    client.context("Failed to create control plane client")
}

/// Discover clusters and write the per-type summary workbook
///
/// Returns `Ok(None)` when no cluster could be found; nothing is written
/// in that case.
pub async fn run_summary(settings: &SummarySettings) -> Result<Option<RunOutcome>> {
    let client = connect(&settings.control_plane_url, &settings.credentials, settings.timeout)?;
    let customer = customer_name(&settings.control_plane_url);

    let clusters = ClusterSource::Discover.resolve(&client).await;
    if clusters.is_empty() {
        info!("No clusters found, nothing to analyze");
        return Ok(None);
    }

    info!(clusters = clusters.len(), "Starting resource analysis");
    let inventory = fetch_inventory(&client, &clusters).await;

    info!("Creating resource summary");
    let report = build_summary(&customer, &inventory);
    let table = report.to_table();

    let filename = summary_filename(&customer, chrono::Local::now().naive_local());
    let path = settings.output_dir.join(filename);
    info!(path = %path.display(), "Formatting and saving workbook");
    write_table(&table, &path, SheetStyle::Formatted)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Some(RunOutcome {
        path,
        resource_types: Some(report.resource_type_count()),
        table,
        clusters,
    }))
}

/// Compare resource status across the configured clusters
///
/// Returns `Ok(None)` when the configuration lists no clusters.
pub async fn run_comparison(settings: &ComparisonSettings) -> Result<Option<RunOutcome>> {
    let client = connect(&settings.control_plane_url, &settings.credentials, settings.timeout)?;

    let clusters = ClusterSource::Static(settings.clusters.clone())
        .resolve(&client)
        .await;
    if clusters.is_empty() {
        info!("No clusters configured, nothing to compare");
        return Ok(None);
    }

    info!(clusters = clusters.len(), "Fetching resource statuses");
    let inventory = fetch_inventory(&client, &clusters).await;

    info!("Creating comparison table");
    let details = fetch_details(&client, &inventory).await;
    let report = build_comparison(&inventory, &details);
    let table = report.to_table();

    info!(path = %settings.output.display(), "Saving workbook");
    write_table(&table, &settings.output, SheetStyle::Plain)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    Ok(Some(RunOutcome {
        path: settings.output.clone(),
        resource_types: None,
        table,
        clusters,
    }))
}

/// Default output path of the comparison run
pub fn default_comparison_output() -> PathBuf {
    PathBuf::from(comparison::DEFAULT_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::credentials;
    use crate::report::Cell;

    async fn mock_resources(server: &mut mockito::ServerGuard, cluster_id: &str, body: &str) {
        server
            .mock(
                "GET",
                format!("/cc-ui/v1/dropdown/cluster/{}/resources-info", cluster_id).as_str(),
            )
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn test_run_comparison_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        mock_resources(
            &mut server,
            "a1",
            r#"[{"resourceName": "shop-prod-db", "resourceType": "mysql", "info": {"disabled": true}}]"#,
        )
        .await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/b2/resources-info")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/cc-ui/v1/resources/shop/prod/status")
            .with_status(200)
            .with_body(r#"{"projectName": "shop", "environmentName": "production"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let settings = ComparisonSettings {
            control_plane_url: server.url(),
            credentials: credentials(),
            clusters: vec![Cluster::new("A", "a1"), Cluster::new("B", "b2")],
            output: dir.path().join("resource_status_comparison.xlsx"),
            timeout: None,
        };

        let outcome = run_comparison(&settings).await.unwrap().unwrap();

        assert!(outcome.path.exists());
        assert_eq!(outcome.resource_types, None);
        assert_eq!(outcome.table.shape(), (1, 6));
        assert_eq!(
            outcome.table.rows[0],
            vec![
                Cell::text("shop-prod-db"),
                Cell::text("mysql"),
                Cell::text("shop"),
                Cell::text("production"),
                Cell::text("Disabled"),
                Cell::text("Enabled"),
            ]
        );

        // Same backend, same rows.
        let again = run_comparison(&settings).await.unwrap().unwrap();
        assert_eq!(again.table, outcome.table);
    }

    #[tokio::test]
    async fn test_run_comparison_without_clusters_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.xlsx");
        let settings = ComparisonSettings {
            control_plane_url: "https://acme-cp.example.com".to_string(),
            credentials: credentials(),
            clusters: Vec::new(),
            output: output.clone(),
            timeout: None,
        };

        assert!(run_comparison(&settings).await.unwrap().is_none());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_summary_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/stacks/clusters")
            .with_status(200)
            .with_body(r#"[{"id": "p1", "name": "prod"}, {"id": "q1", "name": "qa"}]"#)
            .create_async()
            .await;
        mock_resources(
            &mut server,
            "p1",
            r#"[
                {"resourceName": "db", "resourceType": "MySQL", "info": {"isNormal": true}},
                {"resourceName": "vpc", "resourceType": "network", "info": {"isSubstack": true, "disabled": true}}
            ]"#,
        )
        .await;
        mock_resources(&mut server, "q1", "[]").await;

        let dir = tempfile::tempdir().unwrap();
        let settings = SummarySettings {
            control_plane_url: server.url(),
            credentials: credentials(),
            output_dir: dir.path().to_path_buf(),
            timeout: Some(Duration::from_secs(5)),
        };

        let outcome = run_summary(&settings).await.unwrap().unwrap();

        assert!(outcome.path.exists());
        let filename = outcome.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.contains("_resource_analysis_"));
        assert!(filename.ends_with(".xlsx"));

        assert_eq!(outcome.clusters.names().collect::<Vec<_>>(), vec!["prod", "qa"]);
        assert_eq!(outcome.resource_types, Some(2));
        assert_eq!(outcome.table.columns.last().unwrap(), "Substack_Resources");
        assert!(outcome.table.column_index("Base_Resources").is_none());
        // prod: two type rows and a separator; qa: separator only
        assert_eq!(outcome.table.rows.len(), 4);
        assert_eq!(outcome.table.rows[0][3], Cell::text("mysql"));
        assert_eq!(outcome.table.rows[1][5], Cell::Count(0));
    }

    #[tokio::test]
    async fn test_run_summary_without_clusters_writes_nothing() {
        let server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let settings = SummarySettings {
            control_plane_url: server.url(),
            credentials: credentials(),
            output_dir: dir.path().to_path_buf(),
            timeout: None,
        };

        assert!(run_summary(&settings).await.unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_run_summary_rejects_bad_url() {
        let settings = SummarySettings {
            control_plane_url: "not a url".to_string(),
            credentials: credentials(),
            output_dir: PathBuf::from("."),
            timeout: None,
        };
        assert!(run_summary(&settings).await.is_err());
    }
}
