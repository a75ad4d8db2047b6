//! Separation-of-duty checker
//!
//! Decides whether a user's roles respect the conflict sets of a tenant,
//! taking role inheritance into account:
//!
//! - **DSD** ([`SodChecker::validate_dsd`], [`SodChecker::enforce_dsd`]):
//!   run when a session is activated; violating roles are pruned and a
//!   warning is recorded for each.
//! - **SSD** ([`SodChecker::validate_ssd`]): run when a role is assigned; a
//!   violation rejects the assignment.
//!
//! Both use the same scan. The checker holds no per-call state and can be
//! shared across threads. Conflict sets are read through a TTL cache by
//! default, so a change to the store may take up to one TTL to be seen.
//!
//! # Example
//!
//! ```rust
//! use fortress_core::{SdSet, Session};
//! use fortress_rbac::checker::SodChecker;
//! use fortress_rbac::hierarchy::InMemoryHierarchyStore;
//! use fortress_rbac::sd::InMemoryConflictSetStore;
//! use std::sync::Arc;
//!
//! let sets = Arc::new(InMemoryConflictSetStore::new());
//! sets.put("acme", SdSet::dynamic("Bank", ["Teller", "Auditor"], 2)).unwrap();
//!
//! let checker = SodChecker::new(Arc::new(InMemoryHierarchyStore::new()), sets);
//!
//! let mut session = Session::new("jsmith", "acme").with_roles(["Teller", "Auditor"]);
//! checker.enforce_dsd(&mut session).unwrap();
//!
//! assert_eq!(session.role_names(), vec!["Teller"]);
//! assert_eq!(session.warnings.len(), 1);
//! ```

mod scan;
pub mod dsd;
pub mod ssd;

pub use dsd::DsdReport;

use crate::config::RbacConfig;
use crate::hierarchy::HierarchyStore;
use crate::sd::{cached_if_enabled, ConflictSetStore};
use std::sync::Arc;

/// Dynamic and static separation-of-duty checker
#[derive(Clone)]
pub struct SodChecker {
    /// Role hierarchy lookups
    hierarchy: Arc<dyn HierarchyStore>,

    /// Conflict-set lookups
    conflicts: Arc<dyn ConflictSetStore>,

    /// Checker configuration
    config: RbacConfig,
}

impl SodChecker {
    /// Create a checker with the default configuration
    pub fn new(hierarchy: Arc<dyn HierarchyStore>, conflicts: Arc<dyn ConflictSetStore>) -> Self {
        Self::with_config(hierarchy, conflicts, RbacConfig::default())
    }

    /// Create a checker with a custom configuration
    ///
    /// Conflict-set lookups go through a TTL cache unless `config.cache`
    /// disables it.
    pub fn with_config(
        hierarchy: Arc<dyn HierarchyStore>,
        conflicts: Arc<dyn ConflictSetStore>,
        config: RbacConfig,
    ) -> Self {
        let conflicts = cached_if_enabled(conflicts, &config.cache);
        Self {
            hierarchy,
            conflicts,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RbacConfig {
        &self.config
    }
}
