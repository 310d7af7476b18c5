//! FILENAME: core/tree-table/src/table.rs
//! Tree Table - the entry point the host talks to.
//!
//! Owns the options and the rows, runs render passes, and forwards user
//! interaction (toggles, in-place edits) to the current pass. A render pass
//! builds into a fresh `RenderState`; the previous one is replaced only when
//! the new pass succeeds.

use serde_json::Value;

use crate::binding::CellRole;
use crate::builder::NodeTreeBuilder;
use crate::content::grouping_key;
use crate::definition::{ColumnSpec, RowRecord, TreeTableOptions};
use crate::error::{TreeTableError, TreeTableResult};
use crate::span::propagate;
use crate::state::RenderState;
use crate::toggle::{self, ToggleContext};
use crate::tree::{NodeForest, NodeId, TreeNode};
use crate::view::{HeaderCell, TreeTableView};

pub struct TreeTable {
    options: TreeTableOptions,
    data: Vec<RowRecord>,
    state: Option<RenderState>,
}

impl TreeTable {
    /// Creates a table from options; the options' `data` become the rows.
    pub fn new(mut options: TreeTableOptions) -> TreeTableResult<Self> {
        options.validate()?;
        if !options.expanded.is_fully_expanded() {
            log_warn!(
                "CONFIG",
                "initial expansion {:?} is not supported; rendering fully expanded",
                options.expanded
            );
        }
        let data = std::mem::take(&mut options.data);
        Ok(TreeTable {
            options,
            data,
            state: None,
        })
    }

    pub fn from_json(json: &str) -> TreeTableResult<Self> {
        TreeTable::new(TreeTableOptions::from_json(json)?)
    }

    pub fn options(&self) -> &TreeTableOptions {
        &self.options
    }

    pub fn data(&self) -> &[RowRecord] {
        &self.data
    }

    /// Replaces the rows and renders them.
    pub fn render_with(&mut self, data: Vec<RowRecord>) -> TreeTableResult<&TreeTableView> {
        self.data = data;
        self.render()
    }

    /// Renders the current rows from scratch, discarding all expansion state.
    pub fn render(&mut self) -> TreeTableResult<&TreeTableView> {
        log_enter!("RENDER", "render", "rows={}", self.data.len());

        let state = self.build()?;
        log_exit_info!(
            "RENDER",
            "render",
            "rows={} nodes={} cells={}",
            state.view.rows.len(),
            state.forest.len(),
            state.view.cells.len()
        );
        Ok(&self.state.insert(state).view)
    }

    fn build(&self) -> TreeTableResult<RenderState> {
        let columns = &self.options.columns;
        let builder = NodeTreeBuilder::new(columns)?;
        let mut state = RenderState::new(build_header(columns), columns.len());

        if self.data.is_empty() {
            state.push_placeholder(self.options.empty_message());
            return Ok(state);
        }

        for (index, record) in self.data.iter().enumerate() {
            let row = state.push_row(self.row_key(record), self.row_class_name(record, index));
            let chain = builder.build_row_nodes(&mut state, record, row)?;
            propagate(&mut state, &chain);
        }
        Ok(state)
    }

    fn row_key(&self, record: &RowRecord) -> Option<String> {
        grouping_key(record.get(&self.options.primary))
    }

    fn row_class_name(&self, record: &RowRecord, index: usize) -> Option<String> {
        match &self.options.row_class_resolver {
            Some(resolver) => Some(resolver.resolve(record, index)),
            None => self.options.row_class_name.clone(),
        }
    }

    // ========================================================================
    // INSPECTION
    // ========================================================================

    pub fn view(&self) -> Option<&TreeTableView> {
        self.state.as_ref().map(|s| &s.view)
    }

    pub fn forest(&self) -> Option<&NodeForest> {
        self.state.as_ref().map(|s| &s.forest)
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.forest()?.get(id)
    }

    /// Finds a node by its grouping values, outermost first.
    pub fn find_node(&self, path: &[&str]) -> Option<NodeId> {
        self.forest()?.find_path(path)
    }

    /// Indices of the rows currently shown.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.view()
            .map(|view| view.visible_rows().map(|r| r.index).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // INTERACTION
    // ========================================================================

    /// Handles a click on a node's collapse control.
    pub fn toggle(&mut self, node: NodeId) -> bool {
        self.with_context(|ctx| toggle::toggle(ctx, node))
    }

    pub fn collapse(&mut self, node: NodeId) -> bool {
        self.with_context(|ctx| toggle::collapse(ctx, node))
    }

    pub fn expand(&mut self, node: NodeId) -> bool {
        self.with_context(|ctx| toggle::expand(ctx, node))
    }

    pub fn can_toggle(&self, node: NodeId) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| toggle::can_toggle(state, node))
    }

    fn with_context(&mut self, f: impl FnOnce(&mut ToggleContext<'_>) -> bool) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let mut ctx = ToggleContext {
            state,
            columns: &self.options.columns,
            data: &self.data,
        };
        f(&mut ctx)
    }

    /// Stores a value typed into an editable detail cell.
    ///
    /// Updates the row record and the cell's expanded content. A cell that
    /// currently shows its collapsed form keeps showing it.
    pub fn edit_cell(&mut self, row: usize, column: &str, value: &str) -> TreeTableResult<()> {
        let state = self.state.as_mut().ok_or(TreeTableError::NotRendered)?;
        let record = self.data.get_mut(row).ok_or(TreeTableError::RowOutOfRange(row))?;
        let position = self
            .options
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| TreeTableError::ColumnNotFound(column.to_string()))?;
        let not_editable = || TreeTableError::NotEditable {
            row,
            column: column.to_string(),
        };

        let cell_id = state.view.cell_at(row, position).ok_or_else(not_editable)?;
        let binding = state.bindings.get_mut(cell_id).ok_or_else(not_editable)?;
        if binding.role != CellRole::Detail || !binding.expanded.set_value(value) {
            return Err(not_editable());
        }

        let cell = state.view.cell_mut(cell_id);
        if !cell.collapsed {
            cell.content = binding.expanded.clone();
        }
        record.insert(column.to_string(), Value::String(value.to_string()));
        log_debug!("RENDER", "edit row={} column={}", row, column);
        Ok(())
    }
}

/// One header cell per column; a header colspan swallows the following columns.
pub fn build_header(columns: &[ColumnSpec]) -> Vec<HeaderCell> {
    let mut header = Vec::with_capacity(columns.len());
    let mut skip = 0u32;
    for column in columns {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let col_span = column.colspan.unwrap_or(1).max(1);
        header.push(HeaderCell {
            name: column.name.clone(),
            text: column.text.clone().unwrap_or_else(|| column.name.clone()),
            col_span,
            visible: column.visible,
        });
        skip = col_span - 1;
    }
    header
}
