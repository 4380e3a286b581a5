//! The placement decider and its check dispatch.
//!
//! A [`Decider`] binds the three checks to one loaded [`DeciderConfig`].
//! The host runtime calls it at three pipeline phases; [`Check`] names
//! the phase together with its inputs so a caller can drive all of them
//! through [`Decider::evaluate`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::checks::{check_compatibility, check_eligibility, check_requirement};
use crate::config::DeciderConfig;
use crate::descriptor::{HostDescriptor, ReplicaDescriptor};
use crate::verdict::Verdict;

/// Name the decider registers under in the host runtime.
pub const PLUGIN_NAME: &str = "StatefulSetScheduler";

/// Which pipeline phase a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckKind {
    #[serde(rename = "pre_enqueue")]
    Eligibility,
    #[serde(rename = "pre_filter")]
    Requirement,
    #[serde(rename = "filter")]
    Compatibility,
}

impl CheckKind {
    /// Runtime extension point the check runs at.
    pub fn phase(self) -> &'static str {
        match self {
            CheckKind::Eligibility => "pre_enqueue",
            CheckKind::Requirement => "pre_filter",
            CheckKind::Compatibility => "filter",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phase())
    }
}

/// One check invocation with its inputs.
#[derive(Debug, Clone, Copy)]
pub enum Check<'a> {
    Eligibility(&'a ReplicaDescriptor),
    Requirement(&'a ReplicaDescriptor),
    Compatibility(&'a ReplicaDescriptor, &'a HostDescriptor),
}

impl Check<'_> {
    pub fn kind(&self) -> CheckKind {
        match self {
            Check::Eligibility(_) => CheckKind::Eligibility,
            Check::Requirement(_) => CheckKind::Requirement,
            Check::Compatibility(..) => CheckKind::Compatibility,
        }
    }
}

/// Stateless placement decider. Cheap to clone and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct Decider {
    config: Arc<DeciderConfig>,
}

impl Decider {
    pub fn new(config: DeciderConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn config(&self) -> &DeciderConfig {
        &self.config
    }

    pub fn eligibility(&self, replica: &ReplicaDescriptor) -> Verdict {
        check_eligibility(replica)
    }

    pub fn requirement(&self, replica: &ReplicaDescriptor) -> Verdict {
        check_requirement(replica, self.config.qualifying_marker_keys())
    }

    pub fn compatibility(&self, replica: &ReplicaDescriptor, host: &HostDescriptor) -> Verdict {
        check_compatibility(
            replica,
            host,
            self.config.identity_marker_key(),
            self.config.malformed_input(),
        )
    }

    pub fn evaluate(&self, check: Check<'_>) -> Verdict {
        match check {
            Check::Eligibility(replica) => self.eligibility(replica),
            Check::Requirement(replica) => self.requirement(replica),
            Check::Compatibility(replica, host) => self.compatibility(replica, host),
        }
    }
}
