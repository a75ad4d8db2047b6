//! Separation-of-duty conflict sets

use super::role::{contains_role, fold, RoleSet};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// When a conflict set is enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SdType {
    /// Enforced when roles are assigned to a user
    Static,
    /// Enforced when roles are activated in a session
    Dynamic,
}

impl fmt::Display for SdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdType::Static => write!(f, "SSD"),
            SdType::Dynamic => write!(f, "DSD"),
        }
    }
}

/// Named set of mutually conflicting roles
///
/// A cardinality of N means at most N-1 members may be held (SSD) or active
/// (DSD) by one user at the same time, counting roles reached through
/// inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdSet {
    /// Set name, unique per tenant and kind
    pub name: String,

    /// Static or dynamic
    pub kind: SdType,

    /// Member role names
    pub members: BTreeSet<String>,

    /// Threshold at which a conflict is reported
    pub cardinality: u32,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SdSet {
    /// Create a new conflict set
    pub fn new<I, S>(name: impl Into<String>, kind: SdType, members: I, cardinality: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            members: members.into_iter().map(Into::into).collect(),
            cardinality,
            description: None,
        }
    }

    /// Create a dynamic (session activation) conflict set
    pub fn dynamic<I, S>(name: impl Into<String>, members: I, cardinality: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, SdType::Dynamic, members, cardinality)
    }

    /// Create a static (assignment) conflict set
    pub fn r#static<I, S>(name: impl Into<String>, members: I, cardinality: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, SdType::Static, members, cardinality)
    }

    /// Check membership of a role, ignoring case
    pub fn contains(&self, role: &str) -> bool {
        contains_role(&self.members, role)
    }

    /// Check whether any of `roles` is a member
    pub fn intersects(&self, roles: &RoleSet) -> bool {
        roles.iter().any(|role| self.contains(role))
    }

    /// Number of distinct members, ignoring case
    pub fn distinct_members(&self) -> usize {
        self.members.iter().map(|m| fold(m)).collect::<BTreeSet<_>>().len()
    }

    /// Validate the set definition
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] if:
    /// - The name is empty
    /// - The cardinality is below 2
    /// - The set has fewer than 2 distinct members
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::configuration(
                "Conflict set name cannot be empty",
            ));
        }

        if self.cardinality < 2 {
            return Err(CoreError::configuration(format!(
                "{} set '{}' has cardinality {}, expected at least 2",
                self.kind, self.name, self.cardinality
            )));
        }

        if self.distinct_members() < 2 {
            return Err(CoreError::configuration(format!(
                "{} set '{}' has {} member(s), expected at least 2",
                self.kind,
                self.name,
                self.distinct_members()
            )));
        }

        if self.members.iter().any(|m| m.trim().is_empty()) {
            return Err(CoreError::configuration(format!(
                "{} set '{}' has an empty member name",
                self.kind, self.name
            )));
        }

        Ok(())
    }
}
