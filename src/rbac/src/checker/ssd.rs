//! Static separation of duty

use super::scan::OnViolation;
use super::SodChecker;
use crate::error::{RbacError, Result, SsdConflict};
use fortress_core::types::UserRole;
use tracing::{debug, warn};

impl SodChecker {
    /// Check that assigning `candidate` keeps the user within every static set
    ///
    /// `assigned` is the user's current assignments. Sets are looked up from
    /// the candidate and its ascendants, then the same scan as DSD runs over
    /// `assigned` followed by `candidate`, stopping at the first crossing.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::SsdViolation`] naming the blamed role, set and
    /// triggering ascendant, or a lookup error if a store fails.
    pub fn validate_ssd(&self, assigned: &[UserRole], candidate: &UserRole, tenant: &str) -> Result<()> {
        if assigned.iter().any(|role| role.is_role(&candidate.name)) {
            debug!(tenant, role = %candidate.name, "role already assigned");
            return Ok(());
        }
        if assigned.is_empty() {
            return Ok(());
        }

        let authorized = self
            .hierarchy
            .inherited_roles(std::slice::from_ref(&candidate.name), tenant)?;
        let sets = self.conflicts.ssd_sets_touching(&authorized, tenant)?;
        if sets.is_empty() {
            return Ok(());
        }

        let mut roles = assigned.to_vec();
        roles.push(candidate.clone());

        let outcome = self.scan(roles, &sets, tenant, OnViolation::Reject)?;
        match outcome.violations.into_iter().next() {
            None => Ok(()),
            Some(violation) => {
                let conflict = SsdConflict {
                    user_id: candidate.user_id.clone(),
                    role: candidate.name.clone(),
                    blamed_role: violation.role.name,
                    set_name: violation.set_name,
                    cardinality: violation.cardinality,
                    inherited_from: violation.inherited_from,
                };
                warn!(tenant, "{}", conflict);
                Err(RbacError::SsdViolation(conflict))
            }
        }
    }
}
