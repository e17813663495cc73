//! Dependency graph over a resolved mod set: install ordering and traversal.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::ResolveError;
use crate::resolver::ResolvedMod;

/// A node in the resolved dependency graph.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResolvedNode {
    pub id: String,
    pub version: String,
    /// Empty when the mod was requested directly.
    pub installed_by: String,
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// Edge label: the dependent's declaration of the dependency.
#[derive(Debug, Clone)]
pub struct DepEdge {
    pub required: bool,
}

/// Resolved mods and the declared dependencies between them.
///
/// Edges point from a dependent to its dependency. Node indices follow the
/// order mods were added, which for [`DependencyGraph::from_mods`] is the
/// slice order.
pub struct DependencyGraph {
    graph: DiGraph<ResolvedNode, DepEdge>,
    /// Lookup from mod id to node index.
    index: HashMap<String, NodeIndex>,
    /// Lookup from a `provides` alias to the node providing it.
    aliases: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Build the graph for a resolved set. Declared dependencies on mods
    /// outside the set contribute no edge.
    ///
    /// Required edges are added first. An optional edge that would close a
    /// cycle is left out, so a recommendation pointing back at a dependent
    /// never makes the set unorderable.
    pub fn from_mods(mods: &[ResolvedMod]) -> Self {
        let mut g = Self::new();
        let nodes: Vec<NodeIndex> = mods
            .iter()
            .map(|m| {
                let idx = g.add_node(ResolvedNode {
                    id: m.mod_info.id.clone(),
                    version: m.mod_info.version.clone(),
                    installed_by: m.installed_by.clone(),
                });
                for alias in &m.mod_info.provides {
                    g.aliases.entry(alias.clone()).or_insert(idx);
                }
                idx
            })
            .collect();

        for required in [true, false] {
            for (m, &from) in mods.iter().zip(&nodes) {
                for dep in m.mod_info.dependencies.iter().filter(|d| d.required == required) {
                    let Some(to) = g.find(&dep.mod_id) else {
                        continue;
                    };
                    if !required && has_path_connecting(&g.graph, to, from, None) {
                        tracing::debug!(
                            "skipping optional edge {} -> {}: closes a cycle",
                            m.mod_info.id,
                            g.graph[to].id
                        );
                        continue;
                    }
                    g.add_edge(from, to, DepEdge { required });
                }
            }
        }
        g
    }

    /// Add or retrieve a node. If the id already exists, returns the existing index.
    pub fn add_node(&mut self, node: ResolvedNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let key = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Add a dependency edge from dependent `from` to dependency `to`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: DepEdge) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, edge);
        }
    }

    /// Look up a node by mod id, then by `provides` alias.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.index
            .get(id)
            .or_else(|| self.aliases.get(id))
            .copied()
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> &ResolvedNode {
        &self.graph[idx]
    }

    /// Direct dependencies of a node.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DepEdge)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect();
        deps.sort_by_key(|(i, _)| *i);
        deps
    }

    /// Reverse dependencies (who depends on this node).
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DepEdge)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.source(), e.weight()))
            .collect();
        deps.sort_by_key(|(i, _)| *i);
        deps
    }

    /// Mods requested directly, plus any mod nothing in the graph depends on.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph[idx].installed_by.is_empty()
                    || self
                        .graph
                        .edges_directed(idx, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .collect()
    }

    /// Order nodes so every dependency precedes its dependents (Kahn).
    ///
    /// Ties are broken first-in first-out: nodes that become ready are
    /// emitted in the order they became ready, and nodes that become ready
    /// together are emitted by ascending index.
    pub fn install_order(&self) -> Result<Vec<NodeIndex>, ResolveError> {
        let mut pending: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .collect();
        let mut ready: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| pending[idx.index()] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(idx) = ready.pop_front() {
            order.push(idx);
            for (dependent, _) in self.dependents_of(idx) {
                let count = &mut pending[dependent.index()];
                *count -= 1;
                if *count == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(ResolveError::CircularDependency {
                chain: self.cycle_members(),
            });
        }
        Ok(order)
    }

    /// Ids of nodes that sit on a cycle, in index order. Dependents that are
    /// only blocked behind a cycle are not included.
    fn cycle_members(&self) -> Vec<String> {
        let mut members: Vec<NodeIndex> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| match scc.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .flatten()
            .collect();
        members.sort();
        members
            .into_iter()
            .map(|idx| self.graph[idx].id.clone())
            .collect()
    }

    /// Print the dependency tree to a string, one top-level entry per root.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        for root in self.roots() {
            output.push_str(&format!("{}\n", self.graph[root]));
            let mut visited = HashSet::new();
            visited.insert(root);
            let deps = self.dependencies_of(root);
            let count = deps.len();
            for (i, (idx, edge)) in deps.iter().enumerate() {
                self.print_subtree(
                    &mut output,
                    *idx,
                    edge,
                    "",
                    i == count - 1,
                    1,
                    max_depth,
                    &mut visited,
                );
            }
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        edge: &DepEdge,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        let marker = if edge.required { "" } else { " (optional)" };
        output.push_str(&format!("{prefix}{connector}{node}{marker}\n"));

        if let Some(max) = max_depth {
            if depth >= max {
                return;
            }
        }

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, child_edge)) in deps.iter().enumerate() {
            self.print_subtree(
                output,
                *child,
                child_edge,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }

    /// Find a path from a directly requested mod to `target_id`.
    pub fn find_path(&self, target_id: &str) -> Option<Vec<&ResolvedNode>> {
        let target = self.find(target_id)?;
        for root in self.roots() {
            let mut path = Vec::new();
            let mut visited = HashSet::new();
            if self.dfs_path(root, target, &mut path, &mut visited) {
                return Some(path.iter().map(|&idx| &self.graph[idx]).collect());
            }
        }
        None
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            path.pop();
            return false;
        }
        for (child, _) in self.dependencies_of(current) {
            if self.dfs_path(child, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
