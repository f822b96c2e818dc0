use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::ArtifactError,
    models::{normalize_skill_name, GraphLink, GraphNode, NodeLinkGraph},
};

/// Result of attempting a topological ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopoOrder {
    /// Every node, prerequisites first
    Sorted(Vec<String>),
    /// The graph has at least one cycle; these nodes could not be ordered
    Cyclic(Vec<String>),
}

/// Directed skill prerequisite graph. An edge `a -> b` means `a` must be
/// learned before `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeSet<String>,
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str) {
        self.nodes.insert(normalize_skill_name(name));
    }

    /// Adds `prerequisite -> dependent` if both nodes exist. Returns whether
    /// the edge was added.
    pub fn add_edge(&mut self, prerequisite: &str, dependent: &str) -> bool {
        let from = normalize_skill_name(prerequisite);
        let to = normalize_skill_name(dependent);
        if !self.nodes.contains(&from) || !self.nodes.contains(&to) {
            return false;
        }
        self.edges.entry(from).or_default().insert(to);
        true
    }

    /// Builds the graph from the node-link artifact, dropping links whose
    /// endpoints are not declared nodes
    pub fn from_node_link(data: NodeLinkGraph) -> Result<Self, ArtifactError> {
        let mut graph = Self::new();
        for node in &data.nodes {
            if node.id.trim().is_empty() {
                return Err(ArtifactError::Invalid(
                    "dependency graph contains an empty node name".to_string(),
                ));
            }
            graph.add_node(&node.id);
        }

        let mut dropped = 0usize;
        for link in &data.links {
            if !graph.add_edge(&link.source, &link.target) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, "Ignored dependency links with unknown skills");
        }

        Ok(graph)
    }

    /// Node-link form, nodes and links in name order
    pub fn to_node_link(&self) -> NodeLinkGraph {
        NodeLinkGraph {
            nodes: self
                .nodes
                .iter()
                .map(|id| GraphNode { id: id.clone() })
                .collect(),
            links: self
                .edges
                .iter()
                .flat_map(|(source, targets)| {
                    targets.iter().map(move |target| GraphLink {
                        source: source.clone(),
                        target: target.clone(),
                    })
                })
                .collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Subgraph restricted to `keep` and the edges between those nodes.
    /// Names in `keep` that are not nodes of this graph are ignored.
    pub fn induced_subgraph(&self, keep: &BTreeSet<String>) -> DependencyGraph {
        let nodes: BTreeSet<String> = self.nodes.intersection(keep).cloned().collect();
        let edges = self
            .edges
            .iter()
            .filter(|(from, _)| nodes.contains(*from))
            .map(|(from, targets)| {
                let kept: BTreeSet<String> = targets
                    .iter()
                    .filter(|t| nodes.contains(*t))
                    .cloned()
                    .collect();
                (from.clone(), kept)
            })
            .filter(|(_, targets)| !targets.is_empty())
            .collect();

        DependencyGraph { nodes, edges }
    }

    /// Kahn's algorithm. Among nodes that are ready at the same time the
    /// lexicographically smallest goes first, so the order is deterministic.
    pub fn topological_order(&self) -> TopoOrder {
        let mut in_degree: BTreeMap<&str, usize> =
            self.nodes.iter().map(|n| (n.as_str(), 0)).collect();
        for targets in self.edges.values() {
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target.as_str()) {
                    *degree += 1;
                }
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(node) = ready.pop_first() {
            order.push(node.to_string());
            let Some(targets) = self.edges.get(node) else {
                continue;
            };
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(target.as_str());
                    }
                }
            }
        }

        if order.len() == self.nodes.len() {
            TopoOrder::Sorted(order)
        } else {
            let remaining = in_degree
                .into_iter()
                .filter(|(_, degree)| *degree > 0)
                .map(|(node, _)| node.to_string())
                .collect();
            TopoOrder::Cyclic(remaining)
        }
    }
}
