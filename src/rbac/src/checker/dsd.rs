//! Dynamic separation of duty

use super::scan::{OnViolation, Violation};
use super::SodChecker;
use crate::error::{RbacError, Result};
use fortress_core::status::{ACTV_FAILED_DSD, GOOD};
use fortress_core::types::{Session, UserRole, Warning, WarningKind};
use tracing::{debug, warn};

/// Result of a DSD check on a candidate role list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsdReport {
    /// Roles that may be activated, in candidate order
    pub retained: Vec<UserRole>,

    /// Roles that were pruned, in the order they were removed
    pub removed: Vec<UserRole>,

    /// One warning per pruned role
    pub warnings: Vec<Warning>,

    /// [`GOOD`] or [`ACTV_FAILED_DSD`]
    pub status: i32,
}

impl DsdReport {
    fn unchanged(candidates: Vec<UserRole>) -> Self {
        Self {
            retained: candidates,
            removed: Vec::new(),
            warnings: Vec::new(),
            status: GOOD,
        }
    }

    /// True when no role was pruned
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }
}

impl SodChecker {
    /// Prune roles that violate dynamic separation of duty
    ///
    /// `candidates` is the ordered list of roles targeted for activation,
    /// already past temporal checks. The scan follows candidate order, so
    /// for a set of cardinality N the Nth conflicting role (and any later
    /// one) is removed while the first N-1 stay.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the hierarchy or conflict-set store fails,
    /// and [`RbacError::Configuration`] for malformed sets under
    /// [`MalformedSetPolicy::Reject`](crate::config::MalformedSetPolicy::Reject).
    /// Nothing is pruned when an error is returned.
    pub fn validate_dsd(&self, candidates: Vec<UserRole>, tenant: &str) -> Result<DsdReport> {
        // No conflict possible with fewer than two roles
        if candidates.len() < 2 {
            return Ok(DsdReport::unchanged(candidates));
        }

        let names: Vec<String> = candidates.iter().map(|r| r.name.clone()).collect();
        let authorized = self.hierarchy.inherited_roles(&names, tenant)?;
        if authorized.len() <= 1 {
            return Ok(DsdReport::unchanged(candidates));
        }

        let sets = self.conflicts.dsd_sets_touching(&authorized, tenant)?;
        debug!(
            tenant,
            candidates = candidates.len(),
            authorized = authorized.len(),
            sets = sets.len(),
            "checking dynamic separation of duty"
        );
        if sets.is_empty() {
            return Ok(DsdReport::unchanged(candidates));
        }

        let outcome = self.scan(candidates, &sets, tenant, OnViolation::Prune)?;

        let mut removed = Vec::with_capacity(outcome.violations.len());
        let mut warnings = Vec::with_capacity(outcome.violations.len());
        for violation in outcome.violations {
            let warning = dsd_warning(&violation);
            warn!(tenant, "{}", warning.message);
            warnings.push(warning);
            removed.push(violation.role);
        }

        let status = if removed.is_empty() { GOOD } else { ACTV_FAILED_DSD };
        Ok(DsdReport {
            retained: outcome.retained,
            removed,
            warnings,
            status,
        })
    }

    /// Run [`validate_dsd`](Self::validate_dsd) on a session and apply it
    ///
    /// Pruned roles leave `session.roles` and their warnings are appended to
    /// `session.warnings`. Returns the DSD status.
    ///
    /// # Errors
    ///
    /// Lookup and configuration errors propagate with the session unchanged.
    /// In strict mode any violation returns [`RbacError::DsdViolation`], also
    /// leaving the session unchanged.
    pub fn enforce_dsd(&self, session: &mut Session) -> Result<i32> {
        let report = self.validate_dsd(session.roles.clone(), &session.tenant)?;

        if self.config.dsd.strict && !report.is_clean() {
            return Err(RbacError::DsdViolation {
                user_id: session.user_id.clone(),
                warnings: report.warnings,
            });
        }

        session.roles = report.retained;
        session.warnings.extend(report.warnings);
        Ok(report.status)
    }
}

fn dsd_warning(violation: &Violation) -> Warning {
    let role = &violation.role;
    let mut message = match &violation.inherited_from {
        None => format!(
            "validate userId [{}] failed activation of assignedRole [{}] validates DSD Set Name:{} Cardinality:{}",
            role.user_id, role.name, violation.set_name, violation.cardinality
        ),
        Some(parent) => format!(
            "validate userId [{}] assignedRole [{}] parentRole [{}] validates DSD Set Name:{} Cardinality:{}",
            role.user_id, role.name, parent, violation.set_name, violation.cardinality
        ),
    };
    if !violation.conflicts_with.is_empty() {
        message.push_str(&format!(" conflicts with [{}]", violation.conflicts_with.join(", ")));
    }

    Warning {
        code: ACTV_FAILED_DSD,
        kind: WarningKind::DsdViolation,
        role: role.name.clone(),
        message,
        set_name: Some(violation.set_name.clone()),
        cardinality: Some(violation.cardinality),
        inherited_from: violation.inherited_from.clone(),
        conflicts_with: violation.conflicts_with.clone(),
    }
}
