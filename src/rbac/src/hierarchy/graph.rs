//! Role inheritance graph
//!
//! Edges point from a junior (child) role to the senior (parent) role whose
//! permissions it inherits. The graph is kept acyclic: an edge that would
//! close a cycle is rejected with the offending path.

use fortress_core::types::{fold, RoleSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

/// Graph-related errors
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// Edge would create a circular inheritance chain
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    /// Role cannot inherit from itself
    #[error("Role cannot inherit from itself: {0}")]
    SelfInheritance(String),

    /// Invalid role name
    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

/// Directed acyclic graph of role inheritance
///
/// # Example
///
/// ```
/// use fortress_rbac::hierarchy::RoleGraph;
///
/// let mut graph = RoleGraph::new();
/// graph.add_inheritance("Teller", "Employee").unwrap();
/// graph.add_inheritance("Employee", "Guest").unwrap();
///
/// let ascendants = graph.ascendants("teller");
/// assert!(ascendants.contains("Employee"));
/// assert!(ascendants.contains("Guest"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    /// child -> parent edges, node weight is the stored role spelling
    graph: DiGraph<String, ()>,

    /// Folded role name -> node
    indices: HashMap<String, NodeIndex>,
}

impl RoleGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(child, parent)` pairs
    ///
    /// # Errors
    ///
    /// Fails on the first edge that is invalid or closes a cycle.
    pub fn from_edges<I, C, P>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        let mut graph = Self::new();
        for (child, parent) in edges {
            graph.add_inheritance(child.as_ref(), parent.as_ref())?;
        }
        Ok(graph)
    }

    /// Add a role without any edges, returning its node
    pub fn add_role(&mut self, name: &str) -> Result<NodeIndex, GraphError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GraphError::InvalidRole(
                "Role name cannot be empty".to_string(),
            ));
        }

        let key = fold(name);
        if let Some(&idx) = self.indices.get(&key) {
            return Ok(idx);
        }

        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(key, idx);
        Ok(idx)
    }

    /// Record that `child` inherits the permissions of `parent`
    ///
    /// Adding an edge that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either name is empty
    /// - `child` and `parent` are the same role
    /// - `parent` already inherits from `child` (cycle)
    pub fn add_inheritance(&mut self, child: &str, parent: &str) -> Result<(), GraphError> {
        if fold(child.trim()) == fold(parent.trim()) {
            return Err(GraphError::SelfInheritance(child.to_string()));
        }

        let child_idx = self.add_role(child)?;
        let parent_idx = self.add_role(parent)?;

        if self.graph.find_edge(child_idx, parent_idx).is_some() {
            return Ok(());
        }

        // parent reaching child through its own ascendants closes a loop
        if let Some(path) = self.path_between(parent_idx, child_idx) {
            let mut cycle = vec![self.graph[child_idx].clone()];
            cycle.extend(path);
            return Err(GraphError::CircularDependency(cycle.join(" -> ")));
        }

        self.graph.add_edge(child_idx, parent_idx, ());
        Ok(())
    }

    /// Remove the inheritance edge between `child` and `parent`
    ///
    /// Returns false if the edge did not exist.
    pub fn remove_inheritance(&mut self, child: &str, parent: &str) -> bool {
        let (Some(child_idx), Some(parent_idx)) = (self.index(child), self.index(parent)) else {
            return false;
        };

        match self.graph.find_edge(child_idx, parent_idx) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Check if the graph knows about `role`
    pub fn contains(&self, role: &str) -> bool {
        self.index(role).is_some()
    }

    /// Number of roles in the graph
    pub fn role_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of inheritance edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct parents of `role`
    pub fn parents(&self, role: &str) -> RoleSet {
        self.neighbors(role, Direction::Outgoing)
    }

    /// Direct children of `role`
    pub fn children(&self, role: &str) -> RoleSet {
        self.neighbors(role, Direction::Incoming)
    }

    /// All roles `role` inherits from, excluding itself
    pub fn ascendants(&self, role: &str) -> RoleSet {
        self.closure(role, Direction::Outgoing)
    }

    /// All roles that inherit from `role`, excluding itself
    pub fn descendants(&self, role: &str) -> RoleSet {
        self.closure(role, Direction::Incoming)
    }

    /// Union of each role and its ascendants
    ///
    /// Names are de-duplicated ignoring case; the first spelling seen wins.
    pub fn inherited_roles<S: AsRef<str>>(&self, roles: &[S]) -> RoleSet {
        let mut seen = HashSet::new();
        let mut result = RoleSet::new();

        for role in roles {
            let role = role.as_ref();
            if seen.insert(fold(role)) {
                result.insert(role.to_string());
            }
            for parent in self.ascendants(role) {
                if seen.insert(fold(&parent)) {
                    result.insert(parent);
                }
            }
        }

        result
    }

    /// All `(child, parent)` edges, sorted
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(c, p)| (self.graph[c].clone(), self.graph[p].clone()))
            .collect();
        edges.sort();
        edges
    }

    /// Roles ordered so every junior role precedes the roles it inherits from
    pub fn topological_order(&self) -> Result<Vec<String>, GraphError> {
        petgraph::algo::toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .map_err(|cycle| {
                GraphError::CircularDependency(self.graph[cycle.node_id()].clone())
            })
    }

    fn index(&self, role: &str) -> Option<NodeIndex> {
        self.indices.get(&fold(role.trim())).copied()
    }

    fn neighbors(&self, role: &str, direction: Direction) -> RoleSet {
        match self.index(role) {
            Some(idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => RoleSet::new(),
        }
    }

    /// Breadth-first transitive closure in one direction
    fn closure(&self, role: &str, direction: Direction) -> RoleSet {
        let Some(start) = self.index(role) else {
            return RoleSet::new();
        };

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut result = RoleSet::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, direction) {
                if visited.insert(next) {
                    result.insert(self.graph[next].clone());
                    queue.push_back(next);
                }
            }
        }

        result
    }

    /// Shortest parent-direction path from `from` to `to`, inclusive
    fn path_between(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<String>> {
        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);
        previous.insert(from, from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![self.graph[current].clone()];
                let mut node = current;
                while node != from {
                    node = previous[&node];
                    path.push(self.graph[node].clone());
                }
                path.reverse();
                return Some(path);
            }
            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if let std::collections::hash_map::Entry::Vacant(e) = previous.entry(next) {
                    e.insert(current);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = RoleGraph::new();
        assert!(graph.ascendants("anything").is_empty());
        assert!(graph.descendants("anything").is_empty());
        assert_eq!(graph.topological_order().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_linear_chain() {
        // Teller -> Employee -> Guest
        let graph = RoleGraph::from_edges([("Teller", "Employee"), ("Employee", "Guest")]).unwrap();

        let asc = graph.ascendants("Teller");
        assert_eq!(asc.len(), 2);
        assert!(asc.contains("Employee") && asc.contains("Guest"));

        let desc = graph.descendants("Guest");
        assert_eq!(desc.len(), 2);
        assert!(desc.contains("Teller") && desc.contains("Employee"));

        assert!(graph.ascendants("Guest").is_empty());
        assert!(graph.descendants("Teller").is_empty());
    }

    #[test]
    fn test_diamond() {
        // Lead inherits from Dev and Ops, both inherit from Staff
        let graph = RoleGraph::from_edges([
            ("Lead", "Dev"),
            ("Lead", "Ops"),
            ("Dev", "Staff"),
            ("Ops", "Staff"),
        ])
        .unwrap();

        let asc: Vec<_> = graph.ascendants("Lead").into_iter().collect();
        assert_eq!(asc, vec!["Dev", "Ops", "Staff"]);
        assert_eq!(graph.parents("Lead").len(), 2);
        assert_eq!(graph.children("Staff").len(), 2);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let graph = RoleGraph::from_edges([("Teller", "Employee")]).unwrap();
        assert!(graph.ascendants("TELLER").contains("Employee"));
        assert!(graph.contains("employee"));
    }

    #[test]
    fn test_self_inheritance_rejected() {
        let mut graph = RoleGraph::new();
        assert!(matches!(
            graph.add_inheritance("Teller", "teller"),
            Err(GraphError::SelfInheritance(_))
        ));
    }

    #[test]
    fn test_two_role_cycle() {
        let mut graph = RoleGraph::from_edges([("A", "B")]).unwrap();
        let result = graph.add_inheritance("B", "A");

        if let Err(GraphError::CircularDependency(msg)) = result {
            assert_eq!(msg, "B -> A -> B");
        } else {
            panic!("Expected CircularDependency error");
        }
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_multi_role_cycle() {
        let mut graph = RoleGraph::from_edges([("A", "B"), ("B", "C")]).unwrap();
        let result = graph.add_inheritance("C", "A");

        if let Err(GraphError::CircularDependency(msg)) = result {
            assert!(msg.contains('A') && msg.contains('B') && msg.contains('C'));
        } else {
            panic!("Expected CircularDependency error");
        }
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut graph = RoleGraph::new();
        graph.add_inheritance("A", "B").unwrap();
        graph.add_inheritance("a", "b").unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.role_count(), 2);
    }

    #[test]
    fn test_remove_inheritance() {
        let mut graph = RoleGraph::from_edges([("A", "B"), ("B", "C")]).unwrap();
        assert!(graph.remove_inheritance("B", "C"));
        assert!(!graph.remove_inheritance("B", "C"));
        assert_eq!(graph.ascendants("A").len(), 1);
    }

    #[test]
    fn test_inherited_roles_union() {
        let graph = RoleGraph::from_edges([("A", "B"), ("C", "B"), ("B", "D")]).unwrap();
        let roles = graph.inherited_roles(&["A", "c", "Unknown"]);

        let roles: Vec<_> = roles.into_iter().collect();
        assert_eq!(roles, vec!["A", "B", "D", "Unknown", "c"]);
    }

    #[test]
    fn test_topological_order() {
        let graph = RoleGraph::from_edges([("A", "B"), ("B", "C")]).unwrap();
        let order = graph.topological_order().unwrap();

        let pos = |name: &str| order.iter().position(|r| r == name).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("B") < pos("C"));
    }

    #[test]
    fn test_edges_listing() {
        let graph = RoleGraph::from_edges([("B", "C"), ("A", "B")]).unwrap();
        assert_eq!(
            graph.edges(),
            vec![
                ("A".to_string(), "B".to_string()),
                ("B".to_string(), "C".to_string())
            ]
        );
    }

    #[test]
    fn test_lookup_folds_like_set_membership() {
        let graph = RoleGraph::from_edges([("Child", "ΑΣ")]).unwrap();
        let set = fortress_core::SdSet::dynamic("Greek", ["Ασ", "X"], 2);

        assert!(set.contains("ΑΣ"));
        assert!(graph.contains("Ασ"));
        assert!(graph.ascendants("child").contains("ΑΣ"));
        assert!(graph.descendants("Ασ").contains("Child"));
    }
}
