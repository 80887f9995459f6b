//! Cross-cluster resource status comparison

use super::{Cell, Table};
use crate::models::{ClusterInventory, Resource, ResourceDetail, ResourceKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_FILENAME: &str = "resource_status_comparison.xlsx";

const UNKNOWN: &str = "Unknown";
const FIXED_COLUMNS: [&str; 4] = ["resource_name", "resource_type", "project_name", "environment"];

/// Per-cluster status of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceStatus {
    Enabled,
    Disabled,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceStatus::Enabled => f.write_str("Enabled"),
            ResourceStatus::Disabled => f.write_str("Disabled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub key: ResourceKey,
    pub project_name: String,
    pub environment: String,
    /// One entry per cluster, in cluster order
    pub statuses: Vec<ResourceStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub cluster_names: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Every `(name, type)` pair seen in any cluster, sorted
pub fn resource_union(inventory: &ClusterInventory) -> BTreeSet<ResourceKey> {
    inventory
        .iter()
        .flat_map(|c| c.resources.iter().map(|r| r.key()))
        .collect()
}

/// Status of `key` in a cluster's resource list
///
/// Only a resource that is present and flagged disabled counts as
/// `Disabled`; a missing resource reads as `Enabled`.
pub fn status_in(resources: &[Resource], key: &ResourceKey) -> ResourceStatus {
    match resources.iter().find(|r| r.matches(key)) {
        Some(r) if r.info.disabled => ResourceStatus::Disabled,
        _ => ResourceStatus::Enabled,
    }
}

/// Build the comparison rows from a full inventory and the looked-up details
/// (keyed by resource name)
pub fn build_comparison(
    inventory: &ClusterInventory,
    details: &BTreeMap<String, ResourceDetail>,
) -> ComparisonReport {
    let rows = resource_union(inventory)
        .into_iter()
        .map(|key| {
            let detail = details.get(&key.name);
            let project_name = detail
                .and_then(|d| d.project_name.clone())
                .unwrap_or_else(|| UNKNOWN.to_string());
            let environment = detail
                .and_then(|d| d.environment_name.clone())
                .unwrap_or_else(|| UNKNOWN.to_string());
            let statuses = inventory
                .iter()
                .map(|c| status_in(&c.resources, &key))
                .collect();

            ComparisonRow {
                key,
                project_name,
                environment,
                statuses,
            }
        })
        .collect();

    ComparisonReport {
        cluster_names: inventory.iter().map(|c| c.cluster.name.clone()).collect(),
        rows,
    }
}

impl ComparisonReport {
    pub fn to_table(&self) -> Table {
        let columns = FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.cluster_names.iter().cloned())
            .collect();
        let mut table = Table::new(SHEET_NAME, columns);

        for row in &self.rows {
            let mut cells = vec![
                Cell::text(&row.key.name),
                Cell::text(&row.key.resource_type),
                Cell::text(&row.project_name),
                Cell::text(&row.environment),
            ];
            cells.extend(row.statuses.iter().map(|s| Cell::Text(s.to_string())));
            table.push_row(cells);
        }

        table
    }
}
