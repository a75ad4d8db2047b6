//! Cardinality scan shared by the DSD and SSD checks

use super::SodChecker;
use crate::config::MalformedSetPolicy;
use crate::error::{RbacError, Result};
use fortress_core::types::{fold, RoleSet, SdSet, UserRole};
use std::collections::HashMap;
use tracing::{debug, warn};

/// How a threshold crossing is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnViolation {
    /// Drop the role and keep scanning (session activation)
    Prune,
    /// Stop at the first crossing (role assignment)
    Reject,
}

/// A role that crossed a set's cardinality
#[derive(Debug, Clone)]
pub(crate) struct Violation {
    pub role: UserRole,
    pub set_name: String,
    pub cardinality: u32,
    pub inherited_from: Option<String>,
    pub conflicts_with: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct ScanOutcome {
    pub retained: Vec<UserRole>,
    pub violations: Vec<Violation>,
}

impl SodChecker {
    /// Walk `candidates` against each set in order
    ///
    /// Per set, a running match count covers both direct membership and
    /// membership of an ascendant. The role under evaluation is the one
    /// removed when the count reaches the cardinality; later sets only see
    /// the roles that survived earlier ones.
    pub(crate) fn scan(
        &self,
        candidates: Vec<UserRole>,
        sets: &[SdSet],
        tenant: &str,
        on_violation: OnViolation,
    ) -> Result<ScanOutcome> {
        let mut retained = candidates;
        let mut violations = Vec::new();
        let mut ascendants: HashMap<String, RoleSet> = HashMap::new();

        for set in sets {
            if let Err(e) = set.validate() {
                match self.config.malformed_sets {
                    MalformedSetPolicy::Skip => {
                        warn!(tenant, set = %set.name, error = %e, "skipping malformed conflict set");
                        continue;
                    }
                    MalformedSetPolicy::Reject => {
                        return Err(RbacError::Configuration(e.to_string()));
                    }
                }
            }

            let mut match_count: u32 = 0;
            let mut counted: Vec<String> = Vec::new();
            let mut survivors = Vec::with_capacity(retained.len());

            for role in retained {
                let violation = if set.contains(&role.name) {
                    match_count += 1;
                    let crossed = match_count >= set.cardinality;
                    let previous = counted.clone();
                    counted.push(role.name.clone());
                    crossed.then(|| (None, previous))
                } else {
                    let parents = match ascendants.get(&fold(&role.name)) {
                        Some(parents) => parents.clone(),
                        None => {
                            let parents = self.hierarchy.ascendants(&role.name, tenant)?;
                            ascendants.insert(fold(&role.name), parents.clone());
                            parents
                        }
                    };

                    let mut crossed = None;
                    for parent in parents.iter().filter(|p| set.contains(p)) {
                        match_count += 1;
                        let previous = counted.clone();
                        counted.push(parent.clone());
                        if match_count >= set.cardinality {
                            crossed = Some((Some(parent.clone()), previous));
                            break;
                        }
                    }
                    crossed
                };

                match violation {
                    Some((inherited_from, conflicts_with)) => {
                        debug!(
                            tenant,
                            role = %role.name,
                            set = %set.name,
                            match_count,
                            "cardinality reached"
                        );
                        violations.push(Violation {
                            role,
                            set_name: set.name.clone(),
                            cardinality: set.cardinality,
                            inherited_from,
                            conflicts_with,
                        });
                        if on_violation == OnViolation::Reject {
                            return Ok(ScanOutcome {
                                retained: survivors,
                                violations,
                            });
                        }
                    }
                    None => survivors.push(role),
                }
            }

            retained = survivors;
        }

        Ok(ScanOutcome {
            retained,
            violations,
        })
    }
}
