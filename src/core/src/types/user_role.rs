//! Role assignment held by a user

use super::constraint::TemporalConstraint;
use super::role::{fold, same_role};
use crate::error::{CoreError, Result};
use crate::UserId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Field delimiter of the raw directory encoding
pub const RAW_DELIMITER: char = '$';

/// A role assigned to (and possibly activated by) a user
///
/// Two assignments are equal when they name the same user and the same role;
/// the constraint and raw form are ignored for membership and removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    /// Owning user
    pub user_id: UserId,

    /// Role name
    pub name: String,

    /// Activation constraint inherited from the role or set on the assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<TemporalConstraint>,

    /// Raw encoded value this assignment was decoded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl UserRole {
    /// Create an unconstrained assignment
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            constraint: None,
            raw: None,
        }
    }

    /// Attach a temporal constraint
    pub fn with_constraint(mut self, constraint: TemporalConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Decode an assignment from its raw directory value
    ///
    /// Format: `name$timeout$beginTime$endTime$beginDate$endDate$beginLockDate$endLockDate$dayMask`.
    /// A bare `name` yields an unconstrained assignment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRaw`] when the name is empty, a field does
    /// not parse, or there are too many fields.
    pub fn from_raw(user_id: impl Into<UserId>, raw: &str) -> Result<Self> {
        let mut fields = raw.split(RAW_DELIMITER);
        let name = fields.next().unwrap_or("").trim();
        if name.is_empty() {
            return Err(CoreError::invalid_raw(format!(
                "role assignment '{}' has no role name",
                raw
            )));
        }

        let rest: Vec<&str> = fields.collect();
        let constraint = if rest.is_empty() {
            None
        } else {
            let constraint = TemporalConstraint::decode_fields(&rest)?;
            (!constraint.is_unconstrained()).then_some(constraint)
        };

        Ok(Self {
            user_id: user_id.into(),
            name: name.to_string(),
            constraint,
            raw: Some(raw.to_string()),
        })
    }

    /// Encode this assignment in the raw directory form
    pub fn to_raw(&self) -> String {
        match &self.constraint {
            None => self.name.clone(),
            Some(constraint) => {
                let mut fields = vec![self.name.clone()];
                fields.extend(constraint.encode_fields());
                fields.join(&RAW_DELIMITER.to_string())
            }
        }
    }

    /// True when this assignment is for role `name` (case-insensitive)
    pub fn is_role(&self, name: &str) -> bool {
        same_role(&self.name, name)
    }
}

impl PartialEq for UserRole {
    fn eq(&self, other: &Self) -> bool {
        same_role(&self.user_id, &other.user_id) && same_role(&self.name, &other.name)
    }
}

impl Eq for UserRole {}

impl Hash for UserRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold(&self.user_id).hash(state);
        fold(&self.name).hash(state);
    }
}
