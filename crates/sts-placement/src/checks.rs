//! The three placement checks.
//!
//! Each check is a pure function of its arguments: no shared state, no
//! I/O beyond one advisory `debug!` event. Calling a check twice with the
//! same inputs yields the same [`Verdict`].
//!
//! - **Eligibility**: the replica must be owned by the group controller
//! - **Requirement**: the replica must carry any one qualifying marker
//! - **Compatibility**: the host identity marker must equal the replica ordinal

use tracing::debug;

use crate::config::MalformedInputPolicy;
use crate::descriptor::{HostDescriptor, ReplicaDescriptor};
use crate::verdict::{Reason, Verdict};

/// Owner kind tag of the ordered workload group controller.
pub const GROUP_CONTROLLER_KIND: &str = "StatefulSet";

/// Separator between a replica's group name and its ordinal.
pub const ORDINAL_SEPARATOR: char = '-';

/// Accept replicas owned by the group controller.
///
/// Anything else, including a replica with no owners at all, can never
/// join the group and is rejected as unresolvable.
pub fn check_eligibility(replica: &ReplicaDescriptor) -> Verdict {
    let verdict = if replica.is_owned_by(GROUP_CONTROLLER_KIND) {
        Verdict::Accept
    } else {
        Verdict::unresolvable(Reason::NotOwnedByGroup {
            replica: replica.name.clone(),
            expected_kind: GROUP_CONTROLLER_KIND.to_string(),
        })
    };

    debug!(replica = %replica.name, code = %verdict.code(), "eligibility check");
    verdict
}

/// Accept replicas carrying at least one of `qualifying_marker_keys`.
///
/// Only key presence matters. A miss is retryable since markers can be
/// added later.
pub fn check_requirement(replica: &ReplicaDescriptor, qualifying_marker_keys: &[String]) -> Verdict {
    let verdict = if has_any_marker(replica, qualifying_marker_keys) {
        Verdict::Accept
    } else {
        Verdict::resolvable(Reason::MissingQualifyingMarker {
            replica: replica.name.clone(),
            required: qualifying_marker_keys.to_vec(),
        })
    };

    debug!(replica = %replica.name, code = %verdict.code(), "requirement check");
    verdict
}

fn has_any_marker(replica: &ReplicaDescriptor, keys: &[String]) -> bool {
    keys.iter().any(|key| replica.markers.contains_key(key))
}

/// Accept `host` only when its identity marker equals the replica ordinal.
///
/// Values are compared as integers, so `"007"` on the host matches
/// ordinal 7. A missing identity marker is a retryable rejection. An
/// unparseable identity value or ordinal is handled per `policy`.
pub fn check_compatibility(
    replica: &ReplicaDescriptor,
    host: &HostDescriptor,
    identity_marker_key: &str,
    policy: MalformedInputPolicy,
) -> Verdict {
    let verdict = match compare(replica, host, identity_marker_key) {
        Ok(()) => Verdict::Accept,
        Err(Mismatch::Rejected(reason)) => Verdict::resolvable(reason),
        Err(Mismatch::Malformed(reason)) => match policy {
            MalformedInputPolicy::HardError => Verdict::Fail { reason },
            MalformedInputPolicy::Reject => Verdict::resolvable(reason),
        },
    };

    match verdict.reason() {
        None => debug!(host = %host.name, replica = %replica.name, "compatibility check passed"),
        Some(reason) => debug!(
            host = %host.name,
            replica = %replica.name,
            code = %verdict.code(),
            %reason,
            "compatibility check failed"
        ),
    }
    verdict
}

enum Mismatch {
    Rejected(Reason),
    Malformed(Reason),
}

fn compare(
    replica: &ReplicaDescriptor,
    host: &HostDescriptor,
    identity_marker_key: &str,
) -> Result<(), Mismatch> {
    let identity = parse_identity(host, identity_marker_key)?;
    let ordinal = parse_ordinal(replica).map_err(Mismatch::Malformed)?;

    if identity != ordinal {
        return Err(Mismatch::Rejected(Reason::OrdinalMismatch {
            host: host.name.clone(),
            replica: replica.name.clone(),
            identity,
            ordinal,
        }));
    }
    Ok(())
}

fn parse_identity(host: &HostDescriptor, key: &str) -> Result<i64, Mismatch> {
    let value = host.markers.get(key).ok_or_else(|| {
        Mismatch::Rejected(Reason::MissingIdentityMarker {
            host: host.name.clone(),
            key: key.to_string(),
        })
    })?;

    value.parse().map_err(|_| {
        Mismatch::Malformed(Reason::InvalidIdentityValue {
            host: host.name.clone(),
            key: key.to_string(),
            value: value.clone(),
        })
    })
}

/// Read the host's identity marker as a base-10 integer.
pub fn host_identity(host: &HostDescriptor, key: &str) -> Result<i64, Reason> {
    parse_identity(host, key).map_err(|mismatch| match mismatch {
        Mismatch::Rejected(reason) | Mismatch::Malformed(reason) => reason,
    })
}

/// Extract the ordinal from the final `-`-separated segment of the
/// replica name.
pub fn parse_ordinal(replica: &ReplicaDescriptor) -> Result<i64, Reason> {
    replica
        .name
        .rsplit(ORDINAL_SEPARATOR)
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| Reason::InvalidOrdinal {
            replica: replica.name.clone(),
        })
}
