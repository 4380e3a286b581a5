//! Conversions from Kubernetes object JSON to descriptors.
//!
//! Only `metadata.name`, `metadata.labels` and
//! `metadata.ownerReferences[].kind/name` are read; everything else in
//! the object is ignored. Accepts the output of `kubectl get -o json`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::descriptor::{HostDescriptor, OwnerReference, ReplicaDescriptor};
use crate::error::ConvertError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Object {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    items: Vec<Object>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMeta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    owner_references: Vec<OwnerReference>,
}

impl Object {
    fn expect_kind(&self, expected: &str) -> Result<(), ConvertError> {
        match self.kind.as_deref() {
            None => Ok(()),
            Some(kind) if kind == expected => Ok(()),
            Some(kind) => Err(ConvertError::UnexpectedKind {
                expected: expected.to_string(),
                found: kind.to_string(),
            }),
        }
    }

    fn name(&self) -> Result<String, ConvertError> {
        self.metadata.name.clone().ok_or(ConvertError::MissingName)
    }
}

fn object_to_host(object: Object) -> Result<HostDescriptor, ConvertError> {
    object.expect_kind("Node")?;
    Ok(HostDescriptor {
        name: object.name()?,
        markers: object.metadata.labels,
    })
}

/// Parse a Pod object into a [`ReplicaDescriptor`].
pub fn replica_from_json(json: &str) -> Result<ReplicaDescriptor, ConvertError> {
    let object: Object = serde_json::from_str(json)?;
    object.expect_kind("Pod")?;

    Ok(ReplicaDescriptor {
        name: object.name()?,
        owners: object.metadata.owner_references,
        markers: object.metadata.labels,
    })
}

/// Parse a Node object, or a `List`/`NodeList` of them, into host
/// descriptors.
pub fn hosts_from_json(json: &str) -> Result<Vec<HostDescriptor>, ConvertError> {
    let object: Object = serde_json::from_str(json)?;

    match object.kind.as_deref() {
        Some("List") | Some("NodeList") => {
            object.items.into_iter().map(object_to_host).collect()
        }
        _ => Ok(vec![object_to_host(object)?]),
    }
}
