//! Filter cycle driver — runs the decider over a set of candidate hosts.
//!
//! Mirrors the order the host runtime imposes for one scheduling attempt:
//! 1. Eligibility, once per replica
//! 2. Requirement, once per replica
//! 3. Compatibility, once per candidate host
//!
//! A gate that does not accept ends the cycle before any host is
//! evaluated. Hosts are never ranked; feasible hosts keep input order.

use serde::Serialize;
use tracing::{info, warn};

use crate::decider::{Check, CheckKind, Decider};
use crate::descriptor::{HostDescriptor, ReplicaDescriptor};
use crate::verdict::{Code, Verdict};

/// Compatibility verdict for one candidate host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVerdict {
    pub host: String,
    pub verdict: Verdict,
}

/// A gate check that stopped the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub check: CheckKind,
    pub verdict: Verdict,
}

/// Result of one filter cycle for a replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub replica: String,
    /// Set when eligibility or requirement did not accept.
    pub gate: Option<GateVerdict>,
    /// Per-host compatibility verdicts in input order.
    pub hosts: Vec<HostVerdict>,
}

impl FilterOutcome {
    /// Names of hosts the replica may be placed on.
    pub fn feasible(&self) -> Vec<&str> {
        self.hosts
            .iter()
            .filter(|h| h.verdict.is_accept())
            .map(|h| h.host.as_str())
            .collect()
    }

    pub fn is_schedulable(&self) -> bool {
        self.gate.is_none() && self.hosts.iter().any(|h| h.verdict.is_accept())
    }

    /// Hosts whose verdict was a hard error.
    pub fn hard_errors(&self) -> Vec<&HostVerdict> {
        self.hosts
            .iter()
            .filter(|h| h.verdict.code() == Code::Error)
            .collect()
    }
}

/// Run one filter cycle for `replica` against `hosts`.
pub fn filter_hosts(
    decider: &Decider,
    replica: &ReplicaDescriptor,
    hosts: &[HostDescriptor],
) -> FilterOutcome {
    for check in [Check::Eligibility(replica), Check::Requirement(replica)] {
        let verdict = decider.evaluate(check);
        if !verdict.is_accept() {
            info!(
                replica = %replica.name,
                check = %check.kind(),
                code = %verdict.code(),
                "replica stopped at gate"
            );
            return FilterOutcome {
                replica: replica.name.clone(),
                gate: Some(GateVerdict {
                    check: check.kind(),
                    verdict,
                }),
                hosts: Vec::new(),
            };
        }
    }

    let hosts: Vec<HostVerdict> = hosts
        .iter()
        .map(|host| HostVerdict {
            host: host.name.clone(),
            verdict: decider.evaluate(Check::Compatibility(replica, host)),
        })
        .collect();

    let outcome = FilterOutcome {
        replica: replica.name.clone(),
        gate: None,
        hosts,
    };

    let errors = outcome.hard_errors().len();
    if errors > 0 {
        warn!(replica = %replica.name, errors, "hosts with malformed identity input");
    }

    let feasible = outcome.feasible();
    if feasible.is_empty() {
        warn!(
            replica = %replica.name,
            candidates = outcome.hosts.len(),
            "no feasible host for replica"
        );
    } else {
        info!(replica = %replica.name, feasible = ?feasible, "filter cycle complete");
    }

    outcome
}
