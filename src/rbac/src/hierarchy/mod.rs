//! Role hierarchy module
//!
//! Provides the role inheritance graph with cycle rejection and the
//! [`HierarchyStore`] lookup the separation-of-duty checker reads from.
//!
//! # Example
//!
//! ```rust
//! use fortress_rbac::hierarchy::{HierarchyStore, InMemoryHierarchyStore};
//!
//! let store = InMemoryHierarchyStore::new();
//! store.add_inheritance("acme", "Teller", "Employee").unwrap();
//!
//! let authorized = store
//!     .inherited_roles(&["Teller".to_string()], "acme")
//!     .unwrap();
//! assert!(authorized.contains("Employee"));
//! ```

pub mod graph;
pub mod store;

pub use graph::{GraphError, RoleGraph};
pub use store::{HierarchyStore, InMemoryHierarchyStore};
