//! FILENAME: core/tree-table/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeTableError {
    #[error("grouping columns must be contiguous from the start: column '{column}' at position {position} follows a non-grouping column")]
    NonContiguousGrouping { column: String, position: usize },

    #[error("column '{column}' has an unrecognized cell type: {descriptor}")]
    UnknownCellType { column: String, descriptor: String },

    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("Table has not been rendered")]
    NotRendered,

    #[error("Row out of range: {0}")]
    RowOutOfRange(usize),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Cell in column '{column}' of row {row} is not editable")]
    NotEditable { row: usize, column: String },
}

impl TreeTableError {
    /// True for the structural configuration faults that abort a render pass.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TreeTableError::NonContiguousGrouping { .. } | TreeTableError::UnknownCellType { .. }
        )
    }
}

pub type TreeTableResult<T> = Result<T, TreeTableError>;
