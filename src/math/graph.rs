// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Containment graph over the formulae of one document.
//!
//! An edge `a -> b` says "a appears inside b". So the ingoing edges of a node are
//! its subexpressions and the outgoing edges are the bigger expressions that
//! contain it. Nesting is finite, so the graph is a DAG; `add_containment`
//! refuses any edge that would close a cycle.
//!
//! Nodes live in a `StableDiGraph` arena addressed by `NodeIndex`. The last
//! computed relation list of each node sits in a side map keyed by the same
//! index, which keeps the cache from owning (or being owned by) the nodes.

use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::math::FormulaId;
use crate::relation::Relation;

#[derive(Debug, Clone, Default)]
pub struct MathTagGraph {
    topology: StableDiGraph<FormulaId, ()>,
    index: HashMap<FormulaId, NodeIndex>,
    relations: HashMap<NodeIndex, Vec<Relation>>,
}

impl MathTagGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &FormulaId) -> bool {
        self.index.contains_key(id)
    }

    /// Insert an isolated node. Idempotent: an existing node keeps its edges.
    pub fn add_formula(&mut self, id: &FormulaId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.topology.add_node(id.clone());
        self.index.insert(id.clone(), idx);
        idx
    }

    /// Record that `sub` appears inside `sup`.
    ///
    /// Missing nodes are created. Self-loops and edges closing a cycle are
    /// rejected; a repeated edge is a no-op.
    pub fn add_containment(&mut self, sub: &FormulaId, sup: &FormulaId) -> Result<()> {
        let cyclic = || Error::CyclicContainment {
            sub: sub.to_string(),
            sup: sup.to_string(),
        };
        if sub == sup {
            return Err(cyclic());
        }
        let a = self.add_formula(sub);
        let b = self.add_formula(sup);
        if self.topology.find_edge(a, b).is_some() {
            return Ok(());
        }
        if has_path_connecting(&self.topology, b, a, None) {
            return Err(cyclic());
        }
        self.topology.add_edge(a, b, ());
        Ok(())
    }

    /// Subexpressions of `id` (sources of its ingoing edges).
    pub fn ingoing_edges(&self, id: &FormulaId) -> Vec<FormulaId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Super-expressions containing `id` (targets of its outgoing edges).
    pub fn outgoing_edges(&self, id: &FormulaId) -> Vec<FormulaId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Overwrite the cached relation list of `id`. Inserts the node if needed.
    pub fn set_relations_for(&mut self, id: &FormulaId, relations: Vec<Relation>) {
        let idx = self.add_formula(id);
        self.relations.insert(idx, relations);
    }

    /// Last relation list computed for `id`, if any.
    pub fn relations_for(&self, id: &FormulaId) -> Option<&[Relation]> {
        let idx = self.index.get(id)?;
        self.relations.get(idx).map(Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    /// All (sub, sup) pairs, sorted for stable output.
    pub fn edges(&self) -> Vec<(FormulaId, FormulaId)> {
        let mut edges: Vec<_> = self
            .topology
            .edge_indices()
            .filter_map(|e| self.topology.edge_endpoints(e))
            .map(|(a, b)| (self.topology[a].clone(), self.topology[b].clone()))
            .collect();
        edges.sort();
        edges
    }

    /// Is the graph still a DAG? Used by the debug contracts.
    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.topology)
    }

    fn neighbors(&self, id: &FormulaId, direction: Direction) -> Vec<FormulaId> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<FormulaId> = self
            .topology
            .neighbors_directed(idx, direction)
            .map(|n| self.topology[n].clone())
            .collect();
        // petgraph yields neighbors newest-first; sort for deterministic callers.
        out.sort();
        out
    }
}
