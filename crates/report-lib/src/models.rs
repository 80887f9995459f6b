//! Core data models for cluster inventories

use serde::{Deserialize, Deserializer, Serialize};

/// A cluster known to the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Display name, used as the report key
    pub name: String,
    /// Opaque handle passed to the fetch API
    pub id: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Ordered set of clusters keyed by name
///
/// Iteration follows first insertion. Re-inserting a known name replaces
/// its id but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a cluster, returning the previous id if any
    pub fn insert(&mut self, cluster: Cluster) -> Option<String> {
        match self.clusters.iter_mut().find(|c| c.name == cluster.name) {
            Some(existing) => Some(std::mem::replace(&mut existing.id, cluster.id)),
            None => {
                self.clusters.push(cluster);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.clusters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl FromIterator<Cluster> for ClusterSet {
    fn from_iter<I: IntoIterator<Item = Cluster>>(iter: I) -> Self {
        let mut set = ClusterSet::new();
        for cluster in iter {
            set.insert(cluster);
        }
        set
    }
}

/// Metadata flags attached to a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceInfo {
    #[serde(deserialize_with = "null_as_false")]
    pub disabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub is_normal: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub is_provided: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub is_base: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub is_inherited: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub is_substack: bool,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A resource configured in a cluster, as returned by `resources-info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_name: String,
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: ResourceInfo,
}

impl Resource {
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            name: self.resource_name.clone(),
            resource_type: self.resource_type.clone(),
        }
    }

    pub fn matches(&self, key: &ResourceKey) -> bool {
        self.resource_name == key.name && self.resource_type == key.resource_type
    }
}

/// Join key across clusters; orders by name, then type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub name: String,
    pub resource_type: String,
}

/// Optional enrichment from the resource status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDetail {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub environment_name: Option<String>,
}

/// Resources fetched for one cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterResources {
    pub cluster: Cluster,
    pub resources: Vec<Resource>,
}

/// Snapshot of every cluster's resources, in cluster order
pub type ClusterInventory = Vec<ClusterResources>;
