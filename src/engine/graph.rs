//! Whole-store dependency graph analysis.
//!
//! The per-computation walks in [`bom`](crate::engine::bom) and
//! [`plan`](crate::engine::plan) guard their own recursion path, but edits
//! arrive one resource at a time and a cycle can span records that no single
//! computation has touched yet. This module builds a directed graph over
//! every known resource so that `glean check` can audit the store and
//! `glean add` can reject a cycle-introducing edit before persisting it.

use anyhow::Result;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::core::GleanError;
use crate::registry::Registry;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed dependency graph over resource names.
///
/// Edges point from a composite to each of its dependencies and carry the
/// per-unit quantity. Dependency names without a backing record still become
/// nodes; an audit should see them.
pub struct DependencyGraph {
    graph: DiGraph<String, u64>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the graph from every resource the registry knows about.
    pub fn from_registry(registry: &mut Registry) -> Result<Self> {
        let mut graph = Self::new();
        for name in registry.list_names()? {
            graph.ensure_node(&name);
            let Some(resource) = registry.get(&name)? else {
                continue;
            };
            let dependencies: Vec<(String, u64)> = resource
                .dependencies()
                .map(|(dep, qty)| (dep.to_string(), qty))
                .collect();
            for (dependency, quantity) in dependencies {
                graph.add_dependency(&name, &dependency, quantity);
            }
        }
        Ok(graph)
    }

    /// Add a node to the graph if it doesn't already exist, returning its
    /// index.
    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), index);
            index
        }
    }

    /// Record that `parent` requires `quantity` of `dependency` per unit.
    pub fn add_dependency(&mut self, parent: &str, dependency: &str, quantity: u64) {
        let parent_idx = self.ensure_node(parent);
        let dep_idx = self.ensure_node(dependency);
        if !self.graph.contains_edge(parent_idx, dep_idx) {
            self.graph.add_edge(parent_idx, dep_idx, quantity);
        }
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Returns [`GleanError::CircularDependency`] naming the cycle path when
    /// one exists.
    pub fn detect_cycles(&self) -> Result<()> {
        let mut colors: HashMap<NodeIndex, Color> = HashMap::new();
        let mut path: Vec<String> = Vec::new();

        for node in self.graph.node_indices() {
            colors.insert(node, Color::White);
        }

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                return Err(GleanError::CircularDependency {
                    cycle: cycle.join(" -> "),
                }
                .into());
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, `None` otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(self.graph[node].clone());

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // Found a cycle - find where it starts in the path
                    let cycle_start =
                        path.iter().position(|name| *name == self.graph[neighbor])?;
                    let mut cycle = path[cycle_start..].to_vec();
                    // Repeat the entry node to show the cycle closes
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Names in an order where every dependency precedes its dependents.
    pub fn build_order(&self) -> Result<Vec<String>> {
        self.detect_cycles()?;

        match toposort(&self.graph, None) {
            Ok(indices) => {
                // Toposort puts dependents first; reverse so dependencies lead
                Ok(indices
                    .into_iter()
                    .rev()
                    .map(|idx| self.graph[idx].clone())
                    .collect())
            }
            // Unreachable: cycles were just ruled out
            Err(_) => Err(anyhow::anyhow!("failed to determine build order")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Resource;
    use crate::registry::ResourceStore;
    use tempfile::TempDir;

    #[test]
    fn test_acyclic_graph_passes() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("Gadget", "Widget", 2);
        graph.add_dependency("Gadget", "Bolt", 4);
        graph.add_dependency("Widget", "Bolt", 3);
        assert!(graph.detect_cycles().is_ok());
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_cycle_reports_path() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("Gear", "Plate", 1);
        graph.add_dependency("Plate", "Gear", 2);

        let err = graph.detect_cycles().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Gear"));
        assert!(message.contains("Plate"));
    }

    #[test]
    fn test_build_order_dependencies_first() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("Gadget", "Widget", 2);
        graph.add_dependency("Widget", "Bolt", 3);

        let order = graph.build_order().unwrap();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(position("Bolt") < position("Widget"));
        assert!(position("Widget") < position("Gadget"));
    }

    #[test]
    fn test_from_registry_includes_missing_dependencies() {
        let temp = TempDir::new().unwrap();
        let mut registry =
            Registry::new(ResourceStore::open(temp.path().join("resources")).unwrap());
        registry
            .register(Resource::composite("Rig", [("Ghost".to_string(), 1)]))
            .unwrap();

        let graph = DependencyGraph::from_registry(&mut registry).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.detect_cycles().is_ok());
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert!(graph.detect_cycles().is_ok());
        assert!(graph.build_order().unwrap().is_empty());
    }
}
