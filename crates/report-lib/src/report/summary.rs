//! Per-cluster resource summary by type and provenance category

use super::{Cell, Table};
use crate::models::{ClusterInventory, ResourceInfo};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SHEET_NAME: &str = "Resource Summary";

const BASE_COLUMNS: [&str; 9] = [
    "Customer",
    "Environment",
    "Total number of Resources",
    "Resources Type",
    "Nor_of Resources",
    "Enabled_Resources",
    "Normal_Resources",
    "Provided_Resources",
    "Inherited_Resources",
];
const BASE_RESOURCES_COLUMN: &str = "Base_Resources";
const SUBSTACK_RESOURCES_COLUMN: &str = "Substack_Resources";

/// Provenance category of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Normal,
    Provided,
    Base,
    Inherited,
    Substack,
}

/// Classification rules, evaluated in order; the first match wins.
pub const CATEGORY_RULES: [(Category, fn(&ResourceInfo) -> bool); 5] = [
    (Category::Normal, is_normal),
    (Category::Provided, is_provided),
    (Category::Base, is_base),
    (Category::Inherited, is_inherited),
    (Category::Substack, is_substack),
];

fn is_normal(info: &ResourceInfo) -> bool {
    info.is_normal
}

fn is_provided(info: &ResourceInfo) -> bool {
    info.is_provided
}

fn is_base(info: &ResourceInfo) -> bool {
    info.is_base
}

fn is_inherited(info: &ResourceInfo) -> bool {
    info.is_inherited
}

fn is_substack(info: &ResourceInfo) -> bool {
    info.is_substack
}

/// Category of a resource, or `None` when no flag is set
pub fn classify(info: &ResourceInfo) -> Option<Category> {
    CATEGORY_RULES
        .iter()
        .find(|(_, matches)| matches(info))
        .map(|(category, _)| *category)
}

/// Counters for one resource type within one cluster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    pub total: u64,
    pub enabled: u64,
    pub normal: u64,
    pub provided: u64,
    pub base: u64,
    pub inherited: u64,
    pub substack: u64,
}

impl TypeStats {
    fn record(&mut self, info: &ResourceInfo) -> Option<Category> {
        self.total += 1;
        if !info.disabled {
            self.enabled += 1;
        }

        let category = classify(info)?;
        let counter = match category {
            Category::Normal => &mut self.normal,
            Category::Provided => &mut self.provided,
            Category::Base => &mut self.base,
            Category::Inherited => &mut self.inherited,
            Category::Substack => &mut self.substack,
        };
        *counter += 1;
        Some(category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSummary {
    pub cluster_name: String,
    pub total_resources: u64,
    /// Keyed by lower-cased resource type
    pub types: BTreeMap<String, TypeStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub customer: String,
    pub clusters: Vec<ClusterSummary>,
    /// Some resource anywhere was classified `Base`
    pub has_base: bool,
    /// Some resource anywhere was classified `Substack`
    pub has_substack: bool,
}

/// Count every cluster's resources by type and category
pub fn build_summary(customer: &str, inventory: &ClusterInventory) -> SummaryReport {
    let mut has_base = false;
    let mut has_substack = false;

    let clusters = inventory
        .iter()
        .map(|entry| {
            let mut types: BTreeMap<String, TypeStats> = BTreeMap::new();
            for resource in &entry.resources {
                let stats = types
                    .entry(resource.resource_type.to_lowercase())
                    .or_default();
                match stats.record(&resource.info) {
                    Some(Category::Base) => has_base = true,
                    Some(Category::Substack) => has_substack = true,
                    _ => {}
                }
            }

            ClusterSummary {
                cluster_name: entry.cluster.name.clone(),
                total_resources: entry.resources.len() as u64,
                types,
            }
        })
        .collect();

    SummaryReport {
        customer: customer.to_string(),
        clusters,
        has_base,
        has_substack,
    }
}

impl SummaryReport {
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        if self.has_base {
            columns.push(BASE_RESOURCES_COLUMN.to_string());
        }
        if self.has_substack {
            columns.push(SUBSTACK_RESOURCES_COLUMN.to_string());
        }
        columns
    }

    /// Distinct resource types across all clusters
    pub fn resource_type_count(&self) -> usize {
        let mut types: Vec<&str> = self
            .clusters
            .iter()
            .flat_map(|c| c.types.keys().map(String::as_str))
            .collect();
        types.sort_unstable();
        types.dedup();
        types.len()
    }

    /// Project into a table: one banded block per cluster, identity cells
    /// on the block's first row only, and a blank row after each block
    pub fn to_table(&self) -> Table {
        let columns = self.columns();
        let width = columns.len();
        let mut table = Table::new(SHEET_NAME, columns);

        for cluster in &self.clusters {
            for (idx, (resource_type, stats)) in cluster.types.iter().enumerate() {
                let mut row = if idx == 0 {
                    vec![
                        Cell::text(&self.customer),
                        Cell::text(&cluster.cluster_name),
                        Cell::Count(cluster.total_resources),
                    ]
                } else {
                    vec![Cell::Blank, Cell::Blank, Cell::Blank]
                };
                row.extend([
                    Cell::text(resource_type),
                    Cell::Count(stats.total),
                    Cell::Count(stats.enabled),
                    Cell::Count(stats.normal),
                    Cell::Count(stats.provided),
                    Cell::Count(stats.inherited),
                ]);
                if self.has_base {
                    row.push(Cell::Count(stats.base));
                }
                if self.has_substack {
                    row.push(Cell::Count(stats.substack));
                }
                table.push_row(row);
            }

            table.push_row(vec![Cell::Blank; width]);
        }

        table
    }
}
