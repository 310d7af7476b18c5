//! FILENAME: core/tree-table/src/span.rs
//! Row Span Propagator - grows node row spans as rows are added.
//!
//! Runs once per row after the builder has produced the row's chain. The
//! walk goes from the deepest node up to the root and touches each chain
//! node exactly once.

use crate::builder::RowChain;
use crate::state::RenderState;
use crate::tree::NodeId;
use crate::view::{ToggleControl, ToggleState};

/// Records `chain.row` under every node of the chain.
pub fn propagate(state: &mut RenderState, chain: &RowChain) {
    let row = chain.row;
    let Some(deepest) = chain.deepest() else {
        return;
    };

    state.forest[deepest].detail_rows.push(row);
    add_child(state, deepest);

    let mut below: Option<NodeId> = None;
    for &node in chain.nodes.iter().rev() {
        // A node created in this row is a new child of the node above it.
        if let Some(child) = below {
            if state.forest[child].anchor_row == row {
                add_child(state, node);
            }
        }

        let tree_node = &mut state.forest[node];
        if tree_node.anchor_row != row {
            tree_node.row_count += 1;
            let (anchor_cell, row_count) = (tree_node.anchor_cell, tree_node.row_count);
            state.view.cell_mut(anchor_cell).row_span = row_count;
        }
        below = Some(node);
    }
}

/// Counts one more child under `node`, attaching the collapse control on the second.
fn add_child(state: &mut RenderState, node: NodeId) {
    let tree_node = &mut state.forest[node];
    tree_node.child_count += 1;
    if tree_node.has_control || tree_node.child_count <= 1 {
        return;
    }

    tree_node.has_control = true;
    let anchor_cell = tree_node.anchor_cell;
    state.view.cell_mut(anchor_cell).toggle = Some(ToggleControl {
        node,
        state: ToggleState::Expanded,
        hidden: false,
    });
    log_debug!("SPAN", "collapse control on node {}", node.index());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::CellRole;
    use crate::content::CellContent;
    use crate::tree::TreeNode;
    use crate::view::ViewCell;
    use smallvec::smallvec;

    /// Adds a node anchored in `row`, with its cell, the way the builder does.
    fn node(state: &mut RenderState, parent: Option<NodeId>, id: &str, row: usize) -> NodeId {
        let depth = parent.map_or(0, |p| state.forest[p].depth + 1);
        let next = state.forest.next_id();
        let cell = state.push_cell(
            CellRole::Node(next),
            ViewCell::new(row, depth, id.to_string(), CellContent::label(id)),
        );
        state
            .forest
            .insert(TreeNode::new(id.to_string(), parent, depth, depth, row, cell))
    }

    #[test]
    fn test_row_spans_follow_rows() {
        let mut state = RenderState::new(Vec::new(), 2);
        for _ in 0..3 {
            state.push_row(None, None);
        }
        let a = node(&mut state, None, "a", 0);
        let b = node(&mut state, Some(a), "b", 0);
        propagate(&mut state, &RowChain { row: 0, nodes: smallvec![a, b] });
        propagate(&mut state, &RowChain { row: 1, nodes: smallvec![a, b] });
        let c = node(&mut state, Some(a), "c", 2);
        propagate(&mut state, &RowChain { row: 2, nodes: smallvec![a, c] });

        let span = |state: &RenderState, id: NodeId| state.view.cell(state.forest[id].anchor_cell).row_span;
        assert_eq!(span(&state, a), 3);
        assert_eq!(span(&state, b), 2);
        assert_eq!(span(&state, c), 1);

        assert_eq!(state.forest[a].child_count, 2);
        assert_eq!(state.forest[b].child_count, 2);
        assert_eq!(state.forest[c].child_count, 1);
        assert!(state.forest[a].has_control);
        assert!(state.forest[b].has_control);
        assert!(!state.forest[c].has_control);
        assert!(state.view.cell(state.forest[c].anchor_cell).toggle.is_none());
    }

    #[test]
    fn test_empty_chain_is_ignored() {
        let mut state = RenderState::new(Vec::new(), 1);
        state.push_row(None, None);
        propagate(&mut state, &RowChain { row: 0, nodes: smallvec![] });
        assert!(state.forest.is_empty());
    }
}
