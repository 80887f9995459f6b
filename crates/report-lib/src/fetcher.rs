//! Per-cluster resource fetching

use crate::client::{ClientError, ControlPlaneClient};
use crate::models::{ClusterInventory, ClusterResources, ClusterSet, Resource};
use serde_json::Value;
use tracing::{info, warn};

/// Fetch the resources currently configured for one cluster
///
/// Entries are decoded one by one; a malformed entry is logged and skipped
/// instead of failing the whole list.
pub async fn fetch_cluster_resources(
    client: &ControlPlaneClient,
    cluster_id: &str,
) -> Result<Vec<Resource>, ClientError> {
    let entries: Vec<Value> = client
        .get(&["cc-ui", "v1", "dropdown", "cluster", cluster_id, "resources-info"])
        .await?;

    let resources = entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match serde_json::from_value(entry) {
            Ok(resource) => Some(resource),
            Err(e) => {
                warn!(cluster_id, index = idx, error = %e, "Skipping malformed resource entry");
                None
            }
        })
        .collect();

    Ok(resources)
}

/// Fetch every cluster in order
///
/// A cluster whose fetch fails is kept with an empty resource list.
pub async fn fetch_inventory(client: &ControlPlaneClient, clusters: &ClusterSet) -> ClusterInventory {
    let mut inventory = Vec::with_capacity(clusters.len());

    for cluster in clusters.iter() {
        info!(cluster = %cluster.name, "Fetching resource information");
        let resources = match fetch_cluster_resources(client, &cluster.id).await {
            Ok(resources) => {
                info!(cluster = %cluster.name, count = resources.len(), "Found resources");
                resources
            }
            Err(e) => {
                warn!(cluster = %cluster.name, error = %e, "Error fetching resources");
                Vec::new()
            }
        };

        inventory.push(ClusterResources {
            cluster: cluster.clone(),
            resources,
        });
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::client_for;
    use crate::models::Cluster;

    #[tokio::test]
    async fn test_fetch_cluster_resources() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/c1/resources-info")
            .with_status(200)
            .with_body(
                r#"[
                    {"resourceName": "db", "resourceType": "mysql", "info": {"disabled": false, "isNormal": true}},
                    {"resourceName": "cache", "resourceType": "redis", "info": {"disabled": true}}
                ]"#,
            )
            .create_async()
            .await;

        let resources = fetch_cluster_resources(&client_for(&server), "c1").await.unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].resource_name, "db");
        assert!(resources[0].info.is_normal);
        assert!(resources[1].info.disabled);
    }

    #[tokio::test]
    async fn test_fetch_inventory_tolerates_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/good/resources-info")
            .with_status(200)
            .with_body(r#"[{"resourceName": "db", "resourceType": "mysql"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/bad/resources-info")
            .with_status(500)
            .create_async()
            .await;

        let clusters: ClusterSet = vec![Cluster::new("broken", "bad"), Cluster::new("prod", "good")]
            .into_iter()
            .collect();
        let inventory = fetch_inventory(&client_for(&server), &clusters).await;

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0].cluster.name, "broken");
        assert!(inventory[0].resources.is_empty());
        assert_eq!(inventory[1].cluster.name, "prod");
        assert_eq!(inventory[1].resources.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_inventory_keeps_entries_with_null_info() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/c1/resources-info")
            .with_status(200)
            .with_body(
                r#"[
                    {"resourceName": "db", "resourceType": "mysql", "info": {"disabled": true}},
                    {"resourceName": "cache", "resourceType": "redis", "info": null}
                ]"#,
            )
            .create_async()
            .await;

        let clusters: ClusterSet = vec![Cluster::new("prod", "c1")].into_iter().collect();
        let inventory = fetch_inventory(&client_for(&server), &clusters).await;

        let resources = &inventory[0].resources;
        assert_eq!(resources.len(), 2);
        assert!(resources[0].info.disabled);
        assert_eq!(resources[1].resource_name, "cache");
        assert!(!resources[1].info.disabled);
    }

    #[tokio::test]
    async fn test_malformed_entry_is_skipped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/c1/resources-info")
            .with_status(200)
            .with_body(
                r#"[
                    {"resourceName": "db", "resourceType": "mysql", "info": {"disabled": true}},
                    {"resourceType": "redis"},
                    "not an object",
                    {"resourceName": "web", "resourceType": "service"}
                ]"#,
            )
            .create_async()
            .await;

        let resources = fetch_cluster_resources(&client_for(&server), "c1").await.unwrap();

        let names: Vec<&str> = resources.iter().map(|r| r.resource_name.as_str()).collect();
        assert_eq!(names, vec!["db", "web"]);
        assert!(resources[0].info.disabled);
    }

    #[tokio::test]
    async fn test_non_array_body_fails_the_cluster() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cc-ui/v1/dropdown/cluster/c1/resources-info")
            .with_status(200)
            .with_body(r#"{"error": "nope"}"#)
            .create_async()
            .await;

        let err = fetch_cluster_resources(&client_for(&server), "c1").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
