//! FILENAME: core/tree-table/src/state.rs
//! Per-pass render state.
//!
//! Everything one render pass produces: the view handed to the host, the
//! node forest, and the cell bindings. Builder, propagator and toggle
//! functions all take this explicitly and mutate it in place.

use crate::binding::{CellBinding, CellBindings, CellRole};
use crate::content::CellContent;
use crate::tree::NodeForest;
use crate::view::{CellId, HeaderCell, TreeTableView, ViewCell, ViewRow};

#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub view: TreeTableView,
    pub forest: NodeForest,
    pub bindings: CellBindings,
}

impl RenderState {
    pub fn new(header: Vec<HeaderCell>, column_count: usize) -> Self {
        RenderState {
            view: TreeTableView::new(header, column_count),
            forest: NodeForest::new(),
            bindings: CellBindings::new(),
        }
    }

    /// Appends an empty visible row and returns its index.
    pub fn push_row(&mut self, key: Option<String>, class_name: Option<String>) -> usize {
        let index = self.view.rows.len();
        self.view.rows.push(ViewRow {
            index,
            key,
            class_name,
            visible: true,
            placeholder: false,
            cells: Vec::new(),
        });
        index
    }

    /// Appends a cell to the end of its row.
    pub fn push_cell(&mut self, role: CellRole, cell: ViewCell) -> CellId {
        let row = cell.row;
        let id = self.register(role, cell);
        self.view.rows[row].cells.push(id);
        id
    }

    /// Inserts a cell into its row in front of the first cell starting further right.
    pub fn insert_cell_ordered(&mut self, role: CellRole, cell: ViewCell) -> CellId {
        let (row, column) = (cell.row, cell.column);
        let id = self.register(role, cell);
        let view = &mut self.view;
        let position = view.rows[row]
            .cells
            .iter()
            .position(|&c| view.cells[c.index()].column > column)
            .unwrap_or(view.rows[row].cells.len());
        view.rows[row].cells.insert(position, id);
        id
    }

    /// Widens a cell by one column. A node's base span follows its anchor cell.
    pub fn widen_cell(&mut self, id: CellId) {
        let cell = self.view.cell_mut(id);
        cell.col_span += 1;
        let col_span = cell.col_span;
        if let Some(CellRole::Node(node)) = self.bindings.get(id).map(|b| b.role) {
            self.forest[node].base_col_span = col_span;
        }
    }

    /// Adds the single "no data" row spanning every column.
    pub fn push_placeholder(&mut self, message: &str) -> CellId {
        let row = self.push_row(None, None);
        self.view.rows[row].placeholder = true;
        let mut cell = ViewCell::new(row, 0, String::new(), CellContent::label(message));
        cell.col_span = (self.view.column_count as u32).max(1);
        self.push_cell(CellRole::Placeholder, cell)
    }

    fn register(&mut self, role: CellRole, cell: ViewCell) -> CellId {
        let id = CellId(self.view.cells.len());
        let binding = CellBinding::new(role, cell.row, cell.column, cell.content.clone());
        self.view.cells.push(cell);
        self.bindings.insert(id, binding);
        id
    }
}
