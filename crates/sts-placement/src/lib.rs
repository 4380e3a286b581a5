//! StatefulSet ordinal placement — admission gates and ordinal pinning.
//!
//! This crate decides, for each replica of an ordered workload group,
//! whether it is subject to ordinal placement and which hosts it may
//! land on. A host fits only when its identity label equals the
//! replica's ordinal. It never ranks hosts and holds no mutable state;
//! the host runtime drives it and aggregates the verdicts.
//!
//! # Components
//!
//! - **`checks`** — Eligibility, requirement and compatibility checks
//! - **`decider`** — Config-bound decider and check dispatch
//! - **`filter`** — Filter cycle driver over many candidate hosts
//! - **`config`** — Environment and TOML configuration
//! - **`convert`** — Kubernetes Pod/Node JSON to descriptors

pub mod checks;
pub mod config;
pub mod convert;
pub mod decider;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod verdict;

pub use checks::{
    GROUP_CONTROLLER_KIND, ORDINAL_SEPARATOR, check_compatibility, check_eligibility,
    check_requirement, host_identity, parse_ordinal,
};
pub use config::{DeciderConfig, MalformedInputPolicy};
pub use convert::{hosts_from_json, replica_from_json};
pub use decider::{Check, CheckKind, Decider, PLUGIN_NAME};
pub use descriptor::{HostDescriptor, OwnerReference, ReplicaDescriptor};
pub use error::{ConfigError, ConfigResult, ConvertError};
pub use filter::{FilterOutcome, GateVerdict, HostVerdict, filter_hosts};
pub use verdict::{Code, Reason, Verdict};
