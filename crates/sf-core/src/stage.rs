//! The render tree.
//!
//! A root node with one child per attached shape. Attaching and detaching
//! are the only mutations; the scene controller keeps its live collection in
//! step with this tree.

use crate::id::ShapeId;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageNode {
    Root,
    Shape(ShapeId),
}

#[derive(Debug, Clone)]
pub struct Stage {
    graph: StableDiGraph<StageNode, ()>,
    root: NodeIndex,
    /// Index from ShapeId → NodeIndex for fast lookup.
    index: HashMap<ShapeId, NodeIndex>,
}

impl Stage {
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(StageNode::Root);
        Self {
            graph,
            root,
            index: HashMap::new(),
        }
    }

    /// Attach a shape under the root. Returns `false` if it was already attached.
    pub fn add_child(&mut self, id: ShapeId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let idx = self.graph.add_node(StageNode::Shape(id));
        self.graph.add_edge(self.root, idx, ());
        self.index.insert(id, idx);
        true
    }

    /// Detach a shape. Returns `false` if it was not attached.
    pub fn remove_child(&mut self, id: ShapeId) -> bool {
        match self.index.remove(&id) {
            Some(idx) => self.graph.remove_node(idx).is_some(),
            None => false,
        }
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Attached shapes in attach order.
    pub fn children(&self) -> Vec<ShapeId> {
        let mut ids: Vec<ShapeId> = self
            .graph
            .neighbors_directed(self.root, Direction::Outgoing)
            .filter_map(|idx| match self.graph[idx] {
                StageNode::Shape(id) => Some(id),
                StageNode::Root => None,
            })
            .collect();
        // Outgoing edges iterate newest first.
        ids.reverse();
        ids
    }

    pub fn clear(&mut self) {
        for (_, idx) in self.index.drain() {
            self.graph.remove_node(idx);
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    #[test]
    fn attach_is_once_only() {
        let mut stage = Stage::new();
        let id = ShapeId::new(ShapeKind::Circle, 1);
        assert!(stage.add_child(id));
        assert!(!stage.add_child(id));
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn detach_twice_is_harmless() {
        let mut stage = Stage::new();
        let id = ShapeId::new(ShapeKind::Triangle, 2);
        stage.add_child(id);
        assert!(stage.remove_child(id));
        assert!(!stage.remove_child(id));
        assert!(stage.is_empty());
    }

    #[test]
    fn children_keep_attach_order() {
        let mut stage = Stage::new();
        let ids: Vec<ShapeId> = (0..3)
            .map(|n| ShapeId::new(ShapeKind::Rectangle, n))
            .collect();
        for id in &ids {
            stage.add_child(*id);
        }
        assert_eq!(stage.children(), ids);

        stage.remove_child(ids[1]);
        assert_eq!(stage.children(), vec![ids[0], ids[2]]);
    }
}
