//! # Fortress Core
//!
//! Shared data model for the Fortress RBAC workspace: role assignments with
//! their temporal constraints, separation-of-duty sets, sessions and the
//! warnings attached to them.
//! This package keeps the RBAC checker free of encoding concerns.

pub mod types;
pub mod status;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    same_role, RoleSet, SdSet, SdType, Session, TemporalConstraint, UserRole, Warning,
    WarningKind,
};

// Identifier aliases used across the workspace
pub type TenantId = String;  // Directory context / tenant identifier
pub type UserId = String;    // User identifier
