//! Cluster resolution
//!
//! Produces the ordered cluster set that drives fetching, either from a
//! static list or by probing the control plane's cluster endpoints.

use crate::client::ControlPlaneClient;
use crate::models::{Cluster, ClusterSet};
use serde_json::Value;
use tracing::{info, warn};

/// Endpoints probed, in order, for cluster listings
pub const DISCOVERY_ENDPOINTS: &[&[&str]] = &[
    &["cc-ui", "v1", "stacks", "running-base-clusters"],
    &["cc-ui", "v1", "stacks", "clusters"],
    &["cc-ui", "v1", "stacks", "getAllClusters"],
];

const STACKS_ENDPOINT: &[&str] = &["cc-ui", "v1", "stacks", ""];

/// Where the set of clusters comes from
#[derive(Debug, Clone)]
pub enum ClusterSource {
    /// Supplied by configuration
    Static(Vec<Cluster>),
    /// Discovered from the control plane
    Discover,
}

impl ClusterSource {
    pub async fn resolve(&self, client: &ControlPlaneClient) -> ClusterSet {
        match self {
            ClusterSource::Static(clusters) => clusters.iter().cloned().collect(),
            ClusterSource::Discover => discover_clusters(client).await,
        }
    }
}

/// Discover clusters from the listing endpoints, falling back to a
/// per-stack walk when none of them yields anything
pub async fn discover_clusters(client: &ControlPlaneClient) -> ClusterSet {
    info!("Fetching cluster information from discovery endpoints");
    let mut clusters = ClusterSet::new();

    for endpoint in DISCOVERY_ENDPOINTS {
        let path = endpoint.join("/");
        match client.get::<Value>(endpoint).await {
            Ok(body) => {
                for cluster in parse_cluster_list(&body, &["id", "clusterId"], &["name", "clusterName"]) {
                    info!(cluster = %cluster.name, id = %cluster.id, endpoint = %path, "Found cluster");
                    clusters.insert(cluster);
                }
            }
            Err(e) => warn!(endpoint = %path, error = %e, "Could not fetch clusters"),
        }
    }

    if clusters.is_empty() {
        info!("No clusters from listing endpoints, walking individual stacks");
        discover_from_stacks(client, &mut clusters).await;
    }

    info!(count = clusters.len(), "Total unique clusters found");
    clusters
}

async fn discover_from_stacks(client: &ControlPlaneClient, clusters: &mut ClusterSet) {
    let stacks = match client.get::<Value>(STACKS_ENDPOINT).await {
        Ok(body) => stack_names(&body),
        Err(e) => {
            warn!(error = %e, "Could not fetch stacks");
            return;
        }
    };

    for stack in stacks {
        let endpoint = ["cc-ui", "v1", "stacks", stack.as_str(), "clusters"];
        match client.get::<Value>(&endpoint).await {
            Ok(body) => {
                for cluster in parse_cluster_list(&body, &["id"], &["name"]) {
                    info!(cluster = %cluster.name, id = %cluster.id, stack = %stack, "Found cluster from stack");
                    clusters.insert(cluster);
                }
            }
            Err(e) => warn!(stack = %stack, error = %e, "Could not fetch stack clusters"),
        }
    }
}

/// Extract clusters from a JSON array, taking the first non-empty field
/// among `id_fields` and `name_fields` for each object
///
/// Anything that is not an array contributes nothing.
pub fn parse_cluster_list(body: &Value, id_fields: &[&str], name_fields: &[&str]) -> Vec<Cluster> {
    let Some(items) = body.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = first_field(item, id_fields)?;
            let name = first_field(item, name_fields)?;
            Some(Cluster { name, id })
        })
        .collect()
}

fn stack_names(body: &Value) -> Vec<String> {
    let Some(items) = body.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = first_field(item, &["name"]);
            if name.is_none() {
                warn!(stack = %item, "Skipping stack without a name");
            }
            name
        })
        .collect()
}

fn first_field(item: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match item.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
