//! FILENAME: core/tree-table/src/builder.rs
//! Node Tree Builder - turns one row record into cells and a node chain.
//!
//! Algorithm, per row, left to right over the columns:
//! 1. Grouping column with a value: reuse the node keyed by that value under
//!    the current parent, or create it and emit its anchor cell.
//! 2. Grouping column with a null value: no node at this depth; the column
//!    is folded into the grouping cell already emitted in this row. When the
//!    reused parent's cell already covers it nothing is emitted; otherwise it
//!    gets a filler cell.
//! 3. Any other column: emit a detail cell.

use smallvec::SmallVec;

use crate::binding::CellRole;
use crate::content::{cell_class_name, grouping_key, resolve_content, CellContent};
use crate::definition::{grouping_prefix_len, ColumnSpec, RowRecord};
use crate::error::TreeTableResult;
use crate::state::RenderState;
use crate::tree::{NodeId, TreeNode};
use crate::view::{CellId, ViewCell};

/// The nodes one row passes through, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChain {
    pub row: usize,
    pub nodes: SmallVec<[NodeId; 4]>,
}

impl RowChain {
    fn new(row: usize) -> Self {
        RowChain {
            row,
            nodes: SmallVec::new(),
        }
    }

    /// The node whose detail row this is.
    pub fn deepest(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

pub struct NodeTreeBuilder<'a> {
    columns: &'a [ColumnSpec],
    grouping_len: usize,
}

impl<'a> NodeTreeBuilder<'a> {
    /// Fails before any node exists if the grouping columns are not a prefix.
    pub fn new(columns: &'a [ColumnSpec]) -> TreeTableResult<Self> {
        let grouping_len = grouping_prefix_len(columns)?;
        Ok(NodeTreeBuilder { columns, grouping_len })
    }

    pub fn grouping_len(&self) -> usize {
        self.grouping_len
    }

    /// Emits the cells of `row` and returns the chain of nodes it belongs to.
    pub fn build_row_nodes(
        &self,
        state: &mut RenderState,
        record: &RowRecord,
        row: usize,
    ) -> TreeTableResult<RowChain> {
        let mut chain = RowChain::new(row);
        let mut parent: Option<NodeId> = None;
        // Last grouping cell emitted in this row; null values widen it.
        let mut open_cell: Option<CellId> = None;

        for (position, column) in self.columns[..self.grouping_len].iter().enumerate() {
            let field = column.grouping_field.as_deref().unwrap_or(&column.name);

            let Some(key) = grouping_key(record.get(field)) else {
                match open_cell {
                    Some(cell) => state.widen_cell(cell),
                    // Already under the reused parent's row-spanning cell.
                    None if parent.is_some_and(|p| state.forest[p].column_end() > position) => {}
                    None => {
                        let cell = self.new_cell(row, position, record, CellContent::Empty);
                        open_cell = Some(state.push_cell(CellRole::Filler, cell));
                    }
                }
                continue;
            };

            if let Some(existing) = state.forest.child(parent, &key) {
                chain.nodes.push(existing);
                parent = Some(existing);
                open_cell = None;
                continue;
            }

            if let Some(parent) = parent {
                split_folded_cell(state, parent, position, column);
            }

            let content = resolve_content(column, record)?;
            let node_id = state.forest.next_id();
            let cell = state.push_cell(
                CellRole::Node(node_id),
                self.new_cell(row, position, record, content),
            );
            let depth = chain.nodes.len();
            let inserted = state
                .forest
                .insert(TreeNode::new(key, parent, depth, position, row, cell));
            debug_assert_eq!(inserted, node_id);
            log_debug!(
                "TREE",
                "node {} '{}' depth={} row={} col={}",
                node_id.index(),
                state.forest[node_id].id,
                depth,
                row,
                position
            );

            chain.nodes.push(node_id);
            parent = Some(node_id);
            open_cell = Some(cell);
        }

        for (offset, column) in self.columns[self.grouping_len..].iter().enumerate() {
            let content = resolve_content(column, record)?;
            let cell = self.new_cell(row, self.grouping_len + offset, record, content);
            state.push_cell(CellRole::Detail, cell);
        }

        Ok(chain)
    }

    fn new_cell(&self, row: usize, position: usize, record: &RowRecord, content: CellContent) -> ViewCell {
        let column = &self.columns[position];
        let mut cell = ViewCell::new(row, position, cell_class_name(column, record), content);
        cell.column_visible = column.visible;
        cell
    }
}

/// Narrows `parent`'s anchor cell so it ends before `position`.
///
/// A node whose first row had null values below it was widened over those
/// columns, and its later rows left them to the node's cell. Once a row gives
/// it a child in one of them, every row already under the node gets a filler
/// for the remainder instead.
fn split_folded_cell(
    state: &mut RenderState,
    parent: NodeId,
    position: usize,
    column: &ColumnSpec,
) {
    let node = &state.forest[parent];
    let end = node.column_end();
    if end <= position {
        return;
    }

    let kept = (position - node.column) as u32;
    let anchor_cell = node.anchor_cell;
    state.forest[parent].base_col_span = kept;
    state.view.cell_mut(anchor_cell).col_span = kept;

    let rows = state.forest.subtree_rows(parent);
    for &row in &rows {
        let mut filler = ViewCell::new(row, position, column.name.clone(), CellContent::Empty);
        filler.col_span = (end - position) as u32;
        filler.column_visible = column.visible;
        state.insert_cell_ordered(CellRole::Filler, filler);
    }

    log_debug!(
        "TREE",
        "split node {} at col {} (keeps {} col(s), {} filler row(s))",
        parent.index(),
        position,
        kept,
        rows.len()
    );
}
