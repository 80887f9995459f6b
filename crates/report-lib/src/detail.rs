//! Best-effort resource detail lookup
//!
//! Resource names are assumed to start with `<project>-<environment>-`.
//! Names that don't split into at least two tokens are never looked up.

use crate::client::ControlPlaneClient;
use crate::models::{ClusterInventory, ResourceDetail};
use std::collections::BTreeMap;
use tracing::warn;

/// Derive the `(project, environment)` lookup tokens from a resource name
pub fn lookup_tokens(resource_name: &str) -> Option<(&str, &str)> {
    let mut parts = resource_name.split('-');
    let project = parts.next()?;
    let environment = parts.next()?;
    Some((project, environment))
}

/// Look up the status detail for a resource name
///
/// Returns `None` when the name is too short, the server doesn't answer
/// 200, or the request fails.
pub async fn fetch_resource_detail(
    client: &ControlPlaneClient,
    resource_name: &str,
) -> Option<ResourceDetail> {
    let (project, environment) = lookup_tokens(resource_name)?;

    match client
        .get_if_ok(&["cc-ui", "v1", "resources", project, environment, "status"])
        .await
    {
        Ok(detail) => detail,
        Err(e) => {
            warn!(resource = %resource_name, error = %e, "Could not fetch resource details");
            None
        }
    }
}

/// Look up details once per distinct resource name in the inventory
pub async fn fetch_details(
    client: &ControlPlaneClient,
    inventory: &ClusterInventory,
) -> BTreeMap<String, ResourceDetail> {
    let mut names: Vec<&str> = inventory
        .iter()
        .flat_map(|c| c.resources.iter().map(|r| r.resource_name.as_str()))
        .collect();
    names.sort_unstable();
    names.dedup();

    let mut details = BTreeMap::new();
    for name in names {
        if let Some(detail) = fetch_resource_detail(client, name).await {
            details.insert(name.to_string(), detail);
        }
    }
    details
}
