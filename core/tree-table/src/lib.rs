//! FILENAME: core/tree-table/src/lib.rs
//! Tree Table subsystem.
//!
//! Renders flat row records as a hierarchical table: the leading grouping
//! columns become nested nodes whose cells span the rows beneath them, and
//! every node with more than one child can be collapsed into a single summary
//! row and expanded again.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `content`: Per-cell content and class-name resolution
//! - `view`: Renderable output for the host surface (WHAT we display)
//! - `tree` / `binding` / `state`: Node forest and per-pass bookkeeping
//! - `builder` / `span`: Building the forest row by row (HOW we lay out)
//! - `toggle`: Expand/collapse transitions on a built table
//! - `table`: The `TreeTable` entry point tying it all together

#[macro_use]
mod logging;

pub mod binding;
pub mod builder;
pub mod content;
pub mod definition;
pub mod error;
pub mod span;
pub mod state;
pub mod table;
pub mod toggle;
pub mod tree;
pub mod view;


pub use binding::{CellBinding, CellBindings, CellRole};
pub use builder::{NodeTreeBuilder, RowChain};
pub use content::{CellContent, CellKind};
pub use definition::{
    CellClassResolver, CellDescriptor, CollapsedContentResolver, ColumnSpec, ContentResolver,
    InitialExpansion, RowClassResolver, RowRecord, TreeTableOptions,
};
pub use error::{TreeTableError, TreeTableResult};
pub use state::RenderState;
pub use table::TreeTable;
pub use toggle::{SpanChange, ToggleContext};
pub use tree::{NodeForest, NodeId, TreeNode};
pub use view::{CellId, HeaderCell, ToggleControl, ToggleState, TreeTableView, ViewCell, ViewRow};
