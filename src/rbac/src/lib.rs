//! # Fortress RBAC
//!
//! Separation-of-duty enforcement for role-based access control:
//! - Role hierarchies with cycle detection
//! - Static separation of duty (SSD) checks on role assignment
//! - Dynamic separation of duty (DSD) pruning on session activation
//! - Temporal constraints (date, lockout, time of day, weekday, timeout)
//! - TTL caching of conflict-set lookups
//! - Thread-safe stores shared behind `Arc`
//!
//! ## Example
//!
//! ```rust
//! use fortress_core::{SdSet, Session};
//! use fortress_rbac::{InMemoryConflictSetStore, InMemoryHierarchyStore, SessionActivator, SodChecker};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hierarchy = Arc::new(InMemoryHierarchyStore::new());
//! hierarchy.add_inheritance("acme", "Senior Teller", "Teller")?;
//!
//! let sets = Arc::new(InMemoryConflictSetStore::new());
//! sets.put("acme", SdSet::dynamic("Cash Handling", ["Teller", "Auditor"], 2))?;
//!
//! let activator = SessionActivator::new(SodChecker::new(hierarchy, sets));
//!
//! let mut session = Session::new("jsmith", "acme").with_roles(["Auditor", "Senior Teller"]);
//! activator.activate_now(&mut session)?;
//!
//! assert_eq!(session.role_names(), vec!["Auditor"]);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod checker;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod sd;

pub use activation::{ConstraintValidator, SessionActivator};
pub use checker::{DsdReport, SodChecker};
pub use config::{CacheConfig, MalformedSetPolicy, RbacConfig};
pub use error::{RbacError, Result, SsdConflict};
pub use hierarchy::{HierarchyStore, InMemoryHierarchyStore, RoleGraph};
pub use sd::{cached_if_enabled, CachedConflictSetStore, ConflictSetStore, InMemoryConflictSetStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
