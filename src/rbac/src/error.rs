//! Error types for the separation-of-duty checker

use fortress_core::status::{ACTV_FAILED_DSD, SSD_VALIDATION_FAILED};
use fortress_core::{CoreError, Warning};
use std::fmt;
use thiserror::Error;

/// Details of a rejected role assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsdConflict {
    /// User the assignment was attempted for
    pub user_id: String,
    /// Role whose assignment was attempted
    pub role: String,
    /// Role blamed when the threshold was crossed
    pub blamed_role: String,
    /// Violated static set
    pub set_name: String,
    /// Cardinality of the violated set
    pub cardinality: u32,
    /// Ascendant through which the conflict was inherited
    pub inherited_from: Option<String>,
}

impl fmt::Display for SsdConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assignment of role [{}] to user [{}] violates SSD set [{}] cardinality {}",
            self.role, self.user_id, self.set_name, self.cardinality
        )?;
        if let Some(parent) = &self.inherited_from {
            write!(f, " (inherited via [{}] on [{}])", parent, self.blamed_role)?;
        }
        Ok(())
    }
}

/// RBAC checker errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// Hierarchy store could not be read
    #[error("Hierarchy lookup failed for role [{role}] in tenant [{tenant}]: {reason}")]
    HierarchyLookup {
        role: String,
        tenant: String,
        reason: String,
    },

    /// Conflict-set store could not be read
    #[error("Conflict set lookup failed in tenant [{tenant}]: {reason}")]
    ConflictSetLookup { tenant: String, reason: String },

    /// Dynamic separation of duty violated while running in strict mode
    #[error("DSD violation for user [{user_id}]: {} role(s) rejected", .warnings.len())]
    DsdViolation {
        user_id: String,
        warnings: Vec<Warning>,
    },

    /// Static separation of duty violated
    #[error("SSD violation: {0}")]
    SsdViolation(SsdConflict),

    /// Hierarchy edit would introduce a cycle
    #[error("Circular role hierarchy: {0}")]
    CircularHierarchy(String),

    /// Malformed conflict set or configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Shared data model error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RbacError {
    /// Create a hierarchy lookup error
    pub fn hierarchy_lookup(role: impl Into<String>, tenant: impl Into<String>, reason: impl Into<String>) -> Self {
        RbacError::HierarchyLookup {
            role: role.into(),
            tenant: tenant.into(),
            reason: reason.into(),
        }
    }

    /// Create a conflict-set lookup error
    pub fn conflict_set_lookup(tenant: impl Into<String>, reason: impl Into<String>) -> Self {
        RbacError::ConflictSetLookup {
            tenant: tenant.into(),
            reason: reason.into(),
        }
    }

    /// Status id for separation-of-duty rejections
    pub fn status_code(&self) -> Option<i32> {
        match self {
            RbacError::DsdViolation { .. } => Some(ACTV_FAILED_DSD),
            RbacError::SsdViolation(_) => Some(SSD_VALIDATION_FAILED),
            _ => None,
        }
    }

    /// True for infrastructure failures, as opposed to security decisions
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            RbacError::HierarchyLookup { .. } | RbacError::ConflictSetLookup { .. }
        )
    }
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
