//! FILENAME: core/tree-table/src/content.rs
//! Cell content resolution.
//!
//! Turns a row record plus a column spec into what one cell shows. The
//! layout code only ever asks this module for content; it never looks
//! inside it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::definition::{ColumnSpec, RowRecord};
use crate::error::{TreeTableError, TreeTableResult};

// ============================================================================
// CONTENT KINDS
// ============================================================================

/// The built-in ways of presenting a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Read-only text.
    Label,
    /// Single-line editable text.
    Text,
    /// Multi-line editable text.
    TextArea,
}

impl CellKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "label" => Some(CellKind::Label),
            "text" => Some(CellKind::Text),
            "textarea" => Some(CellKind::TextArea),
            _ => None,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(CellKind::Label),
            1 => Some(CellKind::Text),
            2 => Some(CellKind::TextArea),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            CellKind::Label => "label",
            CellKind::Text => "text",
            CellKind::TextArea => "textarea",
        }
    }

    fn render(self, column: &str, value: &Value) -> CellContent {
        let text = display_value(value);
        match self {
            CellKind::Label => CellContent::Label { text },
            CellKind::Text => CellContent::TextInput { name: column.to_string(), value: text },
            CellKind::TextArea => CellContent::TextArea { name: column.to_string(), value: text },
        }
    }
}

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CellContent {
    #[default]
    Empty,
    Label { text: String },
    TextInput { name: String, value: String },
    TextArea { name: String, value: String },
    /// Caller-produced markup, passed through untouched.
    Markup { html: String },
}

impl CellContent {
    pub fn label(text: impl Into<String>) -> Self {
        CellContent::Label { text: text.into() }
    }

    pub fn markup(html: impl Into<String>) -> Self {
        CellContent::Markup { html: html.into() }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, CellContent::TextInput { .. } | CellContent::TextArea { .. })
    }

    /// The visible text, if the content has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            CellContent::Empty => None,
            CellContent::Label { text } => Some(text.as_str()),
            CellContent::TextInput { value, .. } | CellContent::TextArea { value, .. } => {
                Some(value.as_str())
            }
            CellContent::Markup { html } => Some(html.as_str()),
        }
    }

    /// Replaces the value of an editable content. Returns false otherwise.
    pub(crate) fn set_value(&mut self, new_value: &str) -> bool {
        match self {
            CellContent::TextInput { value, .. } | CellContent::TextArea { value, .. } => {
                *value = new_value.to_string();
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Builds the content of one cell.
///
/// A content resolver on the column wins; otherwise the cell descriptor picks
/// a built-in kind, and with no descriptor the raw value is shown as a label.
pub fn resolve_content(column: &ColumnSpec, row: &RowRecord) -> TreeTableResult<CellContent> {
    if let Some(resolver) = &column.content_resolver {
        return Ok(resolver.resolve(row, &column.name));
    }

    let value = row.get(&column.name).unwrap_or(&Value::Null);
    let Some(descriptor) = &column.cell else {
        return Ok(CellContent::label(display_value(value)));
    };

    let kind = descriptor.kind().ok_or_else(|| TreeTableError::UnknownCellType {
        column: column.name.clone(),
        descriptor: descriptor.to_string(),
    })?;
    Ok(kind.render(&column.name, value))
}

/// Class name for a cell: the column name, then the column's extra class.
pub fn cell_class_name(column: &ColumnSpec, row: &RowRecord) -> String {
    let extra = match (&column.class_resolver, &column.column_class_name) {
        (Some(resolver), _) => Some(resolver.resolve(row, &column.name)),
        (None, Some(class_name)) => Some(class_name.clone()),
        (None, None) => None,
    };
    match extra {
        Some(extra) if !extra.is_empty() => format!("{} {}", column.name, extra),
        _ => column.name.clone(),
    }
}

/// Text shown for a raw field value. Null shows as nothing.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Node identity for a grouping value; `None` when the value is null or absent.
pub fn grouping_key(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => Some(display_value(value)),
    }
}
