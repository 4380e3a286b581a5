//! Read-only views of the objects a placement decision is made about.
//!
//! The host runtime builds these fresh for every scheduling attempt and
//! hands them to the decider by reference. Nothing here is ever mutated
//! by a check.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A reference to the controller that created a replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerReference {
    /// Controller kind tag, e.g. `StatefulSet` or `ReplicaSet`.
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

impl OwnerReference {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// One schedulable unit of an ordered workload group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaDescriptor {
    /// Replica name. The ordinal is its final `-`-separated segment.
    pub name: String,
    /// Owning controllers. Empty when the replica has no owner.
    #[serde(default)]
    pub owners: Vec<OwnerReference>,
    /// Marker key → marker value.
    #[serde(default)]
    pub markers: HashMap<String, String>,
}

impl ReplicaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_owner(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.owners.push(OwnerReference::new(kind, name));
        self
    }

    pub fn with_marker(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.markers.insert(key.into(), value.into());
        self
    }

    /// Whether any owner reference carries the given kind tag.
    pub fn is_owned_by(&self, kind: &str) -> bool {
        self.owners.iter().any(|owner| owner.kind == kind)
    }
}

/// One candidate execution host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDescriptor {
    pub name: String,
    #[serde(default)]
    pub markers: HashMap<String, String>,
}

impl HostDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: HashMap::new(),
        }
    }

    pub fn with_marker(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.markers.insert(key.into(), value.into());
        self
    }
}
