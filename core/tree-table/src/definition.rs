//! FILENAME: core/tree-table/src/definition.rs
//! Tree Table Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a tree table.
//! The plain fields round-trip through JSON; the resolver hooks are
//! attached in code after loading and are skipped by serde.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{CellContent, CellKind};
use crate::error::{TreeTableError, TreeTableResult};
use crate::tree::TreeNode;

/// One input record, keyed by field name.
pub type RowRecord = serde_json::Map<String, Value>;

/// Message shown in the placeholder row when there is no data.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data";

// ============================================================================
// RESOLVER HOOKS
// ============================================================================

/// A shared callback supplied by the caller.
pub struct Resolver<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Clone for Resolver<F> {
    fn clone(&self) -> Self {
        Resolver(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Resolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

pub type ContentFn = dyn Fn(&RowRecord, &str) -> CellContent + Send + Sync;
pub type CollapsedContentFn = dyn Fn(&RowRecord, &str, &TreeNode) -> Option<CellContent> + Send + Sync;
pub type CellClassFn = dyn Fn(&RowRecord, &str) -> String + Send + Sync;
pub type RowClassFn = dyn Fn(&RowRecord, usize) -> String + Send + Sync;

/// Produces a cell's content from `(row, column name)`.
pub type ContentResolver = Resolver<ContentFn>;
/// Produces a detail cell's content while a node is collapsed over it.
pub type CollapsedContentResolver = Resolver<CollapsedContentFn>;
/// Produces the extra class name of a cell from `(row, column name)`.
pub type CellClassResolver = Resolver<CellClassFn>;
/// Produces a row's class name from `(row, row index)`.
pub type RowClassResolver = Resolver<RowClassFn>;

impl ContentResolver {
    pub fn new(f: impl Fn(&RowRecord, &str) -> CellContent + Send + Sync + 'static) -> Self {
        let f: Arc<ContentFn> = Arc::new(f);
        Resolver(f)
    }

    pub fn resolve(&self, row: &RowRecord, column: &str) -> CellContent {
        (self.0)(row, column)
    }
}

impl CollapsedContentResolver {
    pub fn new(
        f: impl Fn(&RowRecord, &str, &TreeNode) -> Option<CellContent> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<CollapsedContentFn> = Arc::new(f);
        Resolver(f)
    }

    pub fn resolve(&self, row: &RowRecord, column: &str, node: &TreeNode) -> Option<CellContent> {
        (self.0)(row, column, node)
    }
}

impl CellClassResolver {
    pub fn new(f: impl Fn(&RowRecord, &str) -> String + Send + Sync + 'static) -> Self {
        let f: Arc<CellClassFn> = Arc::new(f);
        Resolver(f)
    }

    pub fn resolve(&self, row: &RowRecord, column: &str) -> String {
        (self.0)(row, column)
    }
}

impl RowClassResolver {
    pub fn new(f: impl Fn(&RowRecord, usize) -> String + Send + Sync + 'static) -> Self {
        let f: Arc<RowClassFn> = Arc::new(f);
        Resolver(f)
    }

    pub fn resolve(&self, row: &RowRecord, index: usize) -> String {
        (self.0)(row, index)
    }
}

// ============================================================================
// COLUMN SPEC
// ============================================================================

/// How a column's cells are filled, as written in the configuration.
///
/// Anything that is not a string or an integer is kept as-is and rejected
/// when the first cell of the column is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDescriptor {
    /// Content type by name: "label", "text" or "textarea".
    Tag(String),
    /// Content type by ordinal: 0 = label, 1 = text, 2 = textarea.
    Ordinal(i64),
    Other(Value),
}

impl CellDescriptor {
    /// The content kind this descriptor names, if it names one.
    pub fn kind(&self) -> Option<CellKind> {
        match self {
            CellDescriptor::Tag(tag) => CellKind::from_tag(tag),
            CellDescriptor::Ordinal(ordinal) => CellKind::from_ordinal(*ordinal),
            CellDescriptor::Other(_) => None,
        }
    }
}

impl From<CellKind> for CellDescriptor {
    fn from(kind: CellKind) -> Self {
        CellDescriptor::Tag(kind.tag().to_string())
    }
}

impl fmt::Display for CellDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellDescriptor::Tag(tag) => write!(f, "\"{}\"", tag),
            CellDescriptor::Ordinal(ordinal) => write!(f, "{}", ordinal),
            CellDescriptor::Other(value) => write!(f, "{}", value),
        }
    }
}

/// A single column of the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Field whose value the cell displays.
    pub name: String,

    /// Field whose value identifies the tree node at this depth.
    /// Set only on the leading run of grouping columns.
    #[serde(default)]
    pub grouping_field: Option<String>,

    /// Header text (defaults to `name`).
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub cell: Option<CellDescriptor>,

    /// Extra class name written after the column name on every cell.
    #[serde(default)]
    pub column_class_name: Option<String>,

    /// Header column span; the next `colspan - 1` columns get no header cell.
    #[serde(default)]
    pub colspan: Option<u32>,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(skip)]
    pub content_resolver: Option<ContentResolver>,

    #[serde(skip)]
    pub collapsed_content: Option<CollapsedContentResolver>,

    #[serde(skip)]
    pub class_resolver: Option<CellClassResolver>,
}

fn default_visible() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        ColumnSpec {
            name: name.into(),
            grouping_field: None,
            text: None,
            cell: None,
            column_class_name: None,
            colspan: None,
            visible: true,
            content_resolver: None,
            collapsed_content: None,
            class_resolver: None,
        }
    }

    /// A grouping column that groups and displays the same field.
    pub fn grouping(name: impl Into<String>) -> Self {
        let name = name.into();
        ColumnSpec::new(name.clone()).grouped_by(name)
    }

    pub fn grouped_by(mut self, field: impl Into<String>) -> Self {
        self.grouping_field = Some(field.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_cell(mut self, kind: CellKind) -> Self {
        self.cell = Some(kind.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.column_class_name = Some(class_name.into());
        self
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_content(
        mut self,
        f: impl Fn(&RowRecord, &str) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.content_resolver = Some(ContentResolver::new(f));
        self
    }

    pub fn with_collapsed_content(
        mut self,
        f: impl Fn(&RowRecord, &str, &TreeNode) -> Option<CellContent> + Send + Sync + 'static,
    ) -> Self {
        self.collapsed_content = Some(CollapsedContentResolver::new(f));
        self
    }

    pub fn with_class_resolver(
        mut self,
        f: impl Fn(&RowRecord, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.class_resolver = Some(CellClassResolver::new(f));
        self
    }

    pub fn is_grouping(&self) -> bool {
        self.grouping_field.is_some()
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Which nodes start expanded.
///
/// Accepted for compatibility with existing configurations; rendering always
/// starts fully expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialExpansion {
    All(bool),
    /// Only the node with this id and its ancestors.
    Only(String),
}

impl Default for InitialExpansion {
    fn default() -> Self {
        InitialExpansion::All(true)
    }
}

impl InitialExpansion {
    pub fn is_fully_expanded(&self) -> bool {
        matches!(self, InitialExpansion::All(true))
    }
}

/// The complete, serializable definition of a tree table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeTableOptions {
    pub columns: Vec<ColumnSpec>,

    /// Field holding each row's key.
    pub primary: String,

    #[serde(default)]
    pub expanded: InitialExpansion,

    #[serde(default)]
    pub row_class_name: Option<String>,

    #[serde(default)]
    pub empty_message: Option<String>,

    #[serde(default)]
    pub data: Vec<RowRecord>,

    #[serde(skip)]
    pub row_class_resolver: Option<RowClassResolver>,
}

impl TreeTableOptions {
    pub fn new(primary: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        TreeTableOptions {
            columns,
            primary: primary.into(),
            expanded: InitialExpansion::default(),
            row_class_name: None,
            empty_message: None,
            data: Vec::new(),
            row_class_resolver: None,
        }
    }

    /// Parses options from JSON. Resolver hooks are attached afterwards.
    pub fn from_json(json: &str) -> TreeTableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_data(mut self, data: Vec<RowRecord>) -> Self {
        self.data = data;
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn with_row_class_resolver(
        mut self,
        f: impl Fn(&RowRecord, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.row_class_resolver = Some(RowClassResolver::new(f));
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnSpec> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn empty_message(&self) -> &str {
        self.empty_message.as_deref().unwrap_or(DEFAULT_EMPTY_MESSAGE)
    }

    /// Checks the configuration and returns the number of grouping columns.
    pub fn validate(&self) -> TreeTableResult<usize> {
        grouping_prefix_len(&self.columns)
    }
}

/// Length of the leading run of grouping columns.
///
/// Fails if a grouping column appears after a non-grouping one.
pub fn grouping_prefix_len(columns: &[ColumnSpec]) -> TreeTableResult<usize> {
    let prefix = columns.iter().take_while(|c| c.is_grouping()).count();
    if let Some((offset, column)) = columns[prefix..]
        .iter()
        .enumerate()
        .find(|(_, c)| c.is_grouping())
    {
        return Err(TreeTableError::NonContiguousGrouping {
            column: column.name.clone(),
            position: prefix + offset,
        });
    }
    Ok(prefix)
}
