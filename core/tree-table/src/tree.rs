//! FILENAME: core/tree-table/src/tree.rs
//! Node forest built from the grouping columns.
//!
//! Nodes live in one arena per render pass and refer to each other by
//! `NodeId`. A node is created the first time its (parent, value) pair is
//! seen and is never moved or removed until the next pass rebuilds the forest.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::view::CellId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// TREE NODE
// ============================================================================

/// One distinct grouping value at one depth.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// The grouping value.
    pub id: String,

    pub parent: Option<NodeId>,

    /// Child nodes keyed by their grouping value.
    pub children: FxHashMap<String, NodeId>,

    /// Depth in the tree (0 = root).
    pub depth: usize,

    /// Column the anchor cell starts in.
    pub column: usize,

    /// First row that carried this grouping value.
    pub anchor_row: usize,

    pub anchor_cell: CellId,

    /// Rows whose deepest node is this one.
    pub detail_rows: SmallVec<[usize; 4]>,

    /// Distinct child nodes plus detail rows.
    pub child_count: u32,

    /// Rows under this node, its own first row included.
    pub row_count: u32,

    /// Column span of the anchor cell while expanded.
    pub base_col_span: u32,

    pub collapsed: bool,

    pub has_control: bool,
}

impl TreeNode {
    pub(crate) fn new(
        id: String,
        parent: Option<NodeId>,
        depth: usize,
        column: usize,
        anchor_row: usize,
        anchor_cell: CellId,
    ) -> Self {
        TreeNode {
            id,
            parent,
            children: FxHashMap::default(),
            depth,
            column,
            anchor_row,
            anchor_cell,
            detail_rows: SmallVec::new(),
            child_count: 0,
            row_count: 1,
            base_col_span: 1,
            collapsed: false,
            has_control: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// First column past the anchor cell while expanded.
    pub fn column_end(&self) -> usize {
        self.column + self.base_col_span as usize
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeForest {
    nodes: Vec<TreeNode>,
    roots: FxHashMap<String, NodeId>,
}

impl NodeForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.values().copied()
    }

    pub fn root(&self, key: &str) -> Option<NodeId> {
        self.roots.get(key).copied()
    }

    /// Looks up a node by value under `parent`, or in the root registry.
    pub fn child(&self, parent: Option<NodeId>, key: &str) -> Option<NodeId> {
        match parent {
            Some(parent) => self[parent].children.get(key).copied(),
            None => self.root(key),
        }
    }

    /// Follows grouping values from the roots down.
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root(first)?, |node, key| self.child(Some(node), key))
    }

    /// Id the next inserted node will get.
    pub(crate) fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    /// Adds a node and registers it with its parent (or as a root).
    pub(crate) fn insert(&mut self, node: TreeNode) -> NodeId {
        let id = self.next_id();
        match node.parent {
            Some(parent) => {
                self.nodes[parent.0].children.insert(node.id.clone(), id);
            }
            None => {
                self.roots.insert(node.id.clone(), id);
            }
        }
        self.nodes.push(node);
        id
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// Every row in the subtree of `id`.
    pub fn subtree_rows(&self, id: NodeId) -> Vec<usize> {
        let mut rows = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self[current];
            rows.extend(node.detail_rows.iter().copied());
            stack.extend(node.children.values().copied());
        }
        rows.sort_unstable();
        rows
    }
}

impl Index<NodeId> for NodeForest {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeForest {
    fn index_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }
}

pub struct Ancestors<'a> {
    forest: &'a NodeForest,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.forest[current].parent;
        Some(current)
    }
}
