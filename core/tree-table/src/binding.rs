//! FILENAME: core/tree-table/src/binding.rs
//! Core-side bookkeeping for view cells.
//!
//! The view only carries what the host draws. Everything the layout code
//! needs to remember about a cell (which node owns it, what it shows when
//! expanded or collapsed, where its data comes from) lives here, keyed by
//! `CellId`.

use rustc_hash::FxHashMap;

use crate::content::CellContent;
use crate::tree::NodeId;
use crate::view::CellId;

/// What part a cell plays in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Anchor cell of a tree node.
    Node(NodeId),
    /// Grouping column with no node of its own (null grouping value).
    Filler,
    /// Non-grouping column.
    Detail,
    /// The "no data" cell.
    Placeholder,
}

impl CellRole {
    pub fn is_grouping(self) -> bool {
        matches!(self, CellRole::Node(_) | CellRole::Filler)
    }
}

#[derive(Debug, Clone)]
pub struct CellBinding {
    pub role: CellRole,
    pub column: usize,
    pub row: usize,
    pub expanded: CellContent,
    /// Built on the first collapse that reaches the cell, then reused.
    pub collapsed: Option<CellContent>,
}

impl CellBinding {
    pub fn new(role: CellRole, row: usize, column: usize, expanded: CellContent) -> Self {
        CellBinding {
            role,
            column,
            row,
            expanded,
            collapsed: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CellBindings {
    entries: FxHashMap<CellId, CellBinding>,
}

impl CellBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: CellId, binding: CellBinding) {
        self.entries.insert(id, binding);
    }

    pub fn get(&self, id: CellId) -> Option<&CellBinding> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut CellBinding> {
        self.entries.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
