//! FILENAME: core/tree-table/src/toggle.rs
//! Expand/Collapse Engine - per-node transitions on a built table.
//!
//! Each node is either expanded (the initial state) or collapsed. A
//! transition first visits the node's own subtree and row, producing a
//! `SpanChange`, and only then walks the ancestors to apply the row delta.
//!
//! Collapse:
//! 1. Hide every row of the subtree except the node's anchor row
//! 2. Absorb the trailing cells of the anchor row into the node's cell
//! 3. Row span becomes 1, column span becomes base + absorbed
//! 4. Ancestors lose the rows that disappeared
//!
//! Expand reverses it, recomputing the visible rows from the collapsed
//! flags still set further down.

use crate::binding::CellRole;
use crate::definition::{ColumnSpec, RowRecord};
use crate::state::RenderState;
use crate::tree::{NodeForest, NodeId};
use crate::view::{ToggleState, TreeTableView};

/// Everything a transition reads or writes.
pub struct ToggleContext<'a> {
    pub state: &'a mut RenderState,
    pub columns: &'a [ColumnSpec],
    pub data: &'a [RowRecord],
}

/// What visiting a node's subtree during a transition produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanChange {
    /// Rows the node now covers.
    pub visible_leaf_count: u32,
    /// Columns taken over from trailing cells of the anchor row.
    pub absorbed_col_span: u32,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Collapses an expanded node or expands a collapsed one.
pub fn toggle(ctx: &mut ToggleContext<'_>, node: NodeId) -> bool {
    match ctx.state.forest.get(node) {
        Some(n) if n.collapsed => expand(ctx, node),
        Some(_) => collapse(ctx, node),
        None => false,
    }
}

/// True if the node has a visible collapse control the user could click.
pub fn can_toggle(state: &RenderState, node: NodeId) -> bool {
    let Some(tree_node) = state.forest.get(node) else {
        return false;
    };
    if !tree_node.has_control {
        return false;
    }
    let cell = state.view.cell(tree_node.anchor_cell);
    state.view.rows[tree_node.anchor_row].visible
        && !cell.hidden
        && cell.toggle.is_some_and(|t| !t.hidden)
}

pub fn collapse(ctx: &mut ToggleContext<'_>, node: NodeId) -> bool {
    if !can_toggle(ctx.state, node) || ctx.state.forest[node].collapsed {
        return false;
    }
    log_enter!("TOGGLE", "collapse", "node={}", node.index());

    let anchor_cell = ctx.state.forest[node].anchor_cell;
    let old_row_span = ctx.state.view.cell(anchor_cell).row_span;

    ctx.state.forest[node].collapsed = true;
    let change = collapse_visit(ctx, node);

    let base_col_span = ctx.state.forest[node].base_col_span;
    let cell = ctx.state.view.cell_mut(anchor_cell);
    cell.row_span = change.visible_leaf_count;
    cell.col_span = base_col_span + change.absorbed_col_span;
    set_toggle_state(ctx.state, node, ToggleState::Collapsed);

    shift_ancestor_spans(ctx.state, node, old_row_span, change.visible_leaf_count);

    log_exit!(
        "TOGGLE",
        "collapse",
        "node={} rows {}->1 absorbed={}",
        node.index(),
        old_row_span,
        change.absorbed_col_span
    );
    true
}

pub fn expand(ctx: &mut ToggleContext<'_>, node: NodeId) -> bool {
    if !can_toggle(ctx.state, node) || !ctx.state.forest[node].collapsed {
        return false;
    }
    log_enter!("TOGGLE", "expand", "node={}", node.index());

    let anchor_cell = ctx.state.forest[node].anchor_cell;
    let old_row_span = ctx.state.view.cell(anchor_cell).row_span;

    ctx.state.forest[node].collapsed = false;
    let change = expand_visit(ctx.state, node);

    let base_col_span = ctx.state.forest[node].base_col_span;
    let cell = ctx.state.view.cell_mut(anchor_cell);
    cell.row_span = change.visible_leaf_count;
    cell.col_span = base_col_span;
    set_toggle_state(ctx.state, node, ToggleState::Expanded);

    shift_ancestor_spans(ctx.state, node, old_row_span, change.visible_leaf_count);

    log_exit!(
        "TOGGLE",
        "expand",
        "node={} rows {}->{}",
        node.index(),
        old_row_span,
        change.visible_leaf_count
    );
    true
}

// ============================================================================
// SUBTREE VISITS
// ============================================================================

/// Rows the node covers given the collapsed flags in its subtree.
///
/// A collapsed node counts as its one summary row; an expanded node counts
/// its own detail rows plus whatever its children cover.
pub fn visible_leaf_count(forest: &NodeForest, node: NodeId) -> u32 {
    let tree_node = &forest[node];
    if tree_node.collapsed {
        return 1;
    }
    let rows = tree_node.detail_rows.len() as u32
        + tree_node
            .children
            .values()
            .map(|&child| visible_leaf_count(forest, child))
            .sum::<u32>();
    rows.max(1)
}

fn collapse_visit(ctx: &mut ToggleContext<'_>, node: NodeId) -> SpanChange {
    let anchor_row = ctx.state.forest[node].anchor_row;
    for row in ctx.state.forest.subtree_rows(node) {
        if row != anchor_row {
            ctx.state.view.rows[row].visible = false;
        }
    }

    SpanChange {
        visible_leaf_count: 1,
        absorbed_col_span: absorb_trailing(ctx, node),
    }
}

fn expand_visit(state: &mut RenderState, node: NodeId) -> SpanChange {
    reveal_rows(&state.forest, &mut state.view, node);
    restore_trailing(state, node);

    SpanChange {
        visible_leaf_count: visible_leaf_count(&state.forest, node),
        absorbed_col_span: 0,
    }
}

/// Shows the anchor row, and the rest of the subtree where nothing above is collapsed.
fn reveal_rows(forest: &NodeForest, view: &mut TreeTableView, node: NodeId) {
    let tree_node = &forest[node];
    view.rows[tree_node.anchor_row].visible = true;
    if tree_node.collapsed {
        return;
    }
    for &row in &tree_node.detail_rows {
        view.rows[row].visible = true;
    }
    for &child in tree_node.children.values() {
        reveal_rows(forest, view, child);
    }
}

// ============================================================================
// TRAILING CELLS
// ============================================================================

/// Folds the cells to the right of the node's cell into it.
///
/// Stops after the first descendant that is already collapsed: everything
/// past it is already folded into that descendant.
fn absorb_trailing(ctx: &mut ToggleContext<'_>, node: NodeId) -> u32 {
    let RenderState { view, forest, bindings } = &mut *ctx.state;
    let collapsing = &forest[node];
    let mut absorbed = 0;

    for cell_id in view.trailing_cells(collapsing.anchor_cell) {
        let Some(binding) = bindings.get_mut(cell_id) else {
            continue;
        };

        match binding.role {
            CellRole::Node(owner) => {
                let cell = view.cell_mut(cell_id);
                cell.hidden = true;
                absorbed += cell.display_span();
                if let Some(toggle) = cell.toggle.as_mut() {
                    toggle.hidden = true;
                }
                if forest[owner].collapsed {
                    break;
                }
            }
            CellRole::Filler => {
                let cell = view.cell_mut(cell_id);
                cell.hidden = true;
                absorbed += cell.display_span();
            }
            CellRole::Detail => {
                let column = &ctx.columns[binding.column];
                match &column.collapsed_content {
                    Some(resolver) => {
                        let row = &ctx.data[binding.row];
                        let content = binding
                            .collapsed
                            .get_or_insert_with(|| {
                                resolver
                                    .resolve(row, &column.name, collapsing)
                                    .unwrap_or_default()
                            })
                            .clone();
                        let cell = view.cell_mut(cell_id);
                        cell.content = content;
                        cell.collapsed = true;
                        cell.row_span = 1;
                    }
                    None => {
                        let cell = view.cell_mut(cell_id);
                        cell.hidden = true;
                        absorbed += cell.display_span();
                    }
                }
            }
            CellRole::Placeholder => {}
        }
    }

    absorbed
}

/// Gives the cells to the right of the node's cell their expanded look back.
///
/// Stops after the first descendant that is still collapsed; the cells past
/// it stay folded into that descendant.
fn restore_trailing(state: &mut RenderState, node: NodeId) {
    let RenderState { view, forest, bindings } = state;

    for cell_id in view.trailing_cells(forest[node].anchor_cell) {
        let Some(binding) = bindings.get(cell_id) else {
            continue;
        };

        match binding.role {
            CellRole::Node(owner) => {
                let cell = view.cell_mut(cell_id);
                cell.hidden = false;
                if let Some(toggle) = cell.toggle.as_mut() {
                    toggle.hidden = false;
                }
                if forest[owner].collapsed {
                    break;
                }
            }
            CellRole::Filler => view.cell_mut(cell_id).hidden = false,
            CellRole::Detail => {
                let cell = view.cell_mut(cell_id);
                cell.hidden = false;
                cell.collapsed = false;
                cell.content = binding.expanded.clone();
            }
            CellRole::Placeholder => {}
        }
    }
}

// ============================================================================
// ANCESTORS
// ============================================================================

/// Moves every ancestor's row span by `new - old`.
fn shift_ancestor_spans(state: &mut RenderState, node: NodeId, old: u32, new: u32) {
    if old == new {
        return;
    }
    let delta = i64::from(new) - i64::from(old);
    let RenderState { view, forest, .. } = state;
    for ancestor in forest.ancestors(node) {
        let cell = view.cell_mut(forest[ancestor].anchor_cell);
        cell.row_span = (i64::from(cell.row_span) + delta).clamp(1, i64::from(u32::MAX)) as u32;
    }
}

fn set_toggle_state(state: &mut RenderState, node: NodeId, toggle_state: ToggleState) {
    let anchor_cell = state.forest[node].anchor_cell;
    if let Some(toggle) = state.view.cell_mut(anchor_cell).toggle.as_mut() {
        toggle.state = toggle_state;
    }
}
