//! Check outcomes and the status codes the host runtime understands.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a check did not accept.
///
/// The `Display` impl renders the operator-facing message; callers that
/// need to act on the outcome should match on the fields instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    #[error("replica {replica} is not owned by a {expected_kind}")]
    NotOwnedByGroup {
        replica: String,
        expected_kind: String,
    },

    #[error("replica {replica} does not have any of the required markers: {required:?}")]
    MissingQualifyingMarker {
        replica: String,
        required: Vec<String>,
    },

    #[error("host {host} does not have marker {key:?}")]
    MissingIdentityMarker { host: String, key: String },

    #[error("host {host} has invalid marker {key:?} value: {value:?}, expected integer")]
    InvalidIdentityValue {
        host: String,
        key: String,
        value: String,
    },

    #[error("replica {replica} has invalid ordinal number")]
    InvalidOrdinal { replica: String },

    #[error("host {host} is not suitable for replica {replica} placement")]
    OrdinalMismatch {
        host: String,
        replica: String,
        identity: i64,
        ordinal: i64,
    },
}

/// The result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    /// The combination does not fit. `retryable` is false when no later
    /// attempt can change the outcome for this replica.
    Reject { reason: Reason, retryable: bool },
    /// Structurally invalid input, usually a misconfigured host or group.
    Fail { reason: Reason },
}

impl Verdict {
    pub fn resolvable(reason: Reason) -> Self {
        Verdict::Reject {
            reason,
            retryable: true,
        }
    }

    pub fn unresolvable(reason: Reason) -> Self {
        Verdict::Reject {
            reason,
            retryable: false,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject { reason, .. } | Verdict::Fail { reason } => Some(reason),
        }
    }

    pub fn code(&self) -> Code {
        match self {
            Verdict::Accept => Code::Success,
            Verdict::Reject {
                retryable: true, ..
            } => Code::Unschedulable,
            Verdict::Reject {
                retryable: false, ..
            } => Code::UnschedulableAndUnresolvable,
            Verdict::Fail { .. } => Code::Error,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            None => write!(f, "{}", self.code()),
            Some(reason) => write!(f, "{}: {reason}", self.code()),
        }
    }
}

/// Status tier reported back to the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    Success,
    /// Rejected now, may succeed elsewhere or later.
    Unschedulable,
    /// Rejected for good; the runtime should stop asking this decider.
    UnschedulableAndUnresolvable,
    /// Hard error, surfaced separately from ordinary placement failures.
    Error,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Code::Success => "success",
            Code::Unschedulable => "unschedulable",
            Code::UnschedulableAndUnresolvable => "unschedulable_and_unresolvable",
            Code::Error => "error",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
