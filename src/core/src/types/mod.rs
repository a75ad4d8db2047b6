//! Shared types for the Fortress RBAC workspace

pub mod role;
pub mod constraint;
pub mod user_role;
pub mod sd_set;
pub mod session;

// Re-export commonly used types
pub use role::{fold, same_role, RoleSet};
pub use constraint::TemporalConstraint;
pub use user_role::UserRole;
pub use sd_set::{SdSet, SdType};
pub use session::{Session, Warning, WarningKind};
