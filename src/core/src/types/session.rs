//! User session and the warnings recorded against it

use super::user_role::UserRole;
use crate::{TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a session warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// Role removed for dynamic separation of duty
    DsdViolation,
    /// Outside the role's date range
    Date,
    /// Inside the role's lockout window
    LockDate,
    /// Outside the role's time-of-day window
    Time,
    /// Not an allowed weekday
    Day,
    /// Session idle past the role's timeout
    Timeout,
}

/// Non-fatal problem recorded while activating a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Status id (see [`crate::status`])
    pub code: i32,

    /// Warning category
    pub kind: WarningKind,

    /// Role the warning is about (the role that was removed)
    pub role: String,

    /// Human readable message
    pub message: String,

    /// Conflict set that was violated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,

    /// Cardinality of the violated set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<u32>,

    /// Ascendant role through which the conflict was inherited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,

    /// Set members already counted when the threshold was reached
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
}

impl Warning {
    /// Create a warning without conflict-set details
    pub fn new(code: i32, kind: WarningKind, role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            kind,
            role: role.into(),
            message: message.into(),
            set_name: None,
            cardinality: None,
            inherited_from: None,
            conflicts_with: Vec::new(),
        }
    }
}

/// Runtime record of a user's candidate and active roles
///
/// Created at authentication time and owned by the caller. Validators borrow
/// it mutably for the duration of one call to prune roles and append
/// warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier
    pub id: Uuid,

    /// Authenticated user
    pub user_id: UserId,

    /// Tenant / directory context
    pub tenant: TenantId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last time the session was used (drives role timeouts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,

    /// Candidate roles before activation, active roles afterwards
    pub roles: Vec<UserRole>,

    /// Warnings accumulated during activation
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl Session {
    /// Create an empty session
    pub fn new(user_id: impl Into<UserId>, tenant: impl Into<TenantId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            tenant: tenant.into(),
            created_at: Utc::now(),
            last_access: None,
            roles: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add candidate roles by name, owned by this session's user
    pub fn with_roles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.roles.push(UserRole::new(self.user_id.clone(), name));
        }
        self
    }

    /// Add a candidate role assignment
    pub fn add_role(&mut self, role: UserRole) {
        self.roles.push(role);
    }

    /// Record a warning
    pub fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Names of the roles currently in the session, in order
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    /// Check whether the session holds `name` (case-insensitive)
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.is_role(name))
    }

    /// Mark the session as used now
    pub fn touch(&mut self) {
        self.last_access = Some(Utc::now());
    }
}
