//! FILENAME: core/tree-table/src/view.rs
//! Tree Table View - Renderable output for the host surface.
//!
//! The view is a flat list of cells plus rows that reference them in
//! display order. Cells covered by another cell's row span simply do not
//! appear in later rows, the same way an HTML table is written.

use serde::{Deserialize, Serialize};

use crate::content::CellContent;
use crate::tree::NodeId;

/// Stable identifier of a cell in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// COLLAPSE CONTROL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleState {
    Expanded,
    Collapsed,
}

impl ToggleState {
    /// Class name the host puts on the control.
    pub fn class_name(self) -> &'static str {
        match self {
            ToggleState::Expanded => "collapseButton expanded",
            ToggleState::Collapsed => "collapseButton collapsed",
        }
    }
}

/// The interactive toggle shown in front of a node's cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleControl {
    pub node: NodeId,
    pub state: ToggleState,
    pub hidden: bool,
}

// ============================================================================
// CELLS AND ROWS
// ============================================================================

/// A single body cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCell {
    /// Index of the column this cell starts in.
    pub column: usize,

    /// Index of the row this cell lives in.
    pub row: usize,

    pub row_span: u32,

    pub col_span: u32,

    /// Hidden because a collapsed node absorbed it.
    pub hidden: bool,

    /// False when the column itself is configured invisible.
    pub column_visible: bool,

    pub class_name: String,

    /// True while the cell shows its collapsed representation.
    pub collapsed: bool,

    pub content: CellContent,

    pub toggle: Option<ToggleControl>,
}

impl ViewCell {
    pub fn new(row: usize, column: usize, class_name: String, content: CellContent) -> Self {
        ViewCell {
            column,
            row,
            row_span: 1,
            col_span: 1,
            hidden: false,
            column_visible: true,
            class_name,
            collapsed: false,
            content,
            toggle: None,
        }
    }

    /// Columns this cell takes up on screen.
    pub fn display_span(&self) -> u32 {
        if self.column_visible {
            self.col_span
        } else {
            0
        }
    }

    /// Class name including the collapsed marker.
    pub fn full_class_name(&self) -> String {
        if self.collapsed {
            format!("{} collapsed", self.class_name)
        } else {
            self.class_name.clone()
        }
    }
}

/// A single body row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    pub index: usize,

    /// Value of the primary field, if the row has one.
    pub key: Option<String>,

    pub class_name: Option<String>,

    pub visible: bool,

    /// True for the single "no data" row.
    pub placeholder: bool,

    /// Cells in display order.
    pub cells: Vec<CellId>,
}

/// A single header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub name: String,
    pub text: String,
    pub col_span: u32,
    pub visible: bool,
}

// ============================================================================
// VIEW
// ============================================================================

/// The complete rendered table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeTableView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<ViewRow>,
    pub cells: Vec<ViewCell>,
    pub column_count: usize,
}

impl TreeTableView {
    pub fn new(header: Vec<HeaderCell>, column_count: usize) -> Self {
        TreeTableView {
            header,
            rows: Vec::new(),
            cells: Vec::new(),
            column_count,
        }
    }

    pub fn cell(&self, id: CellId) -> &ViewCell {
        &self.cells[id.0]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut ViewCell {
        &mut self.cells[id.0]
    }

    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &ViewCell> + '_ {
        self.rows[row].cells.iter().map(move |&id| self.cell(id))
    }

    /// The cell of `row` that starts in `column`, if that row has one.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<CellId> {
        self.rows
            .get(row)?
            .cells
            .iter()
            .copied()
            .find(|&id| self.cell(id).column == column)
    }

    /// Cells after `anchor` in the same row, in display order.
    pub fn trailing_cells(&self, anchor: CellId) -> Vec<CellId> {
        let row = &self.rows[self.cell(anchor).row];
        match row.cells.iter().position(|&id| id == anchor) {
            Some(position) => row.cells[position + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ViewRow> + '_ {
        self.rows.iter().filter(|r| r.visible && !r.placeholder)
    }

    pub fn visible_row_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.placeholder)
    }
}
