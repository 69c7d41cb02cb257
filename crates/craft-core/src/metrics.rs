//! Structural diagnostics for recipe trees.
//!
//! These feed tuning and guardrail warnings (search-space size) only; they are never used
//! to gate correctness.

use crate::node::{ActionKind, ActionNode, Operator};

/// Depth of the tree: 0 for an absent node, 1 for a childless node.
pub fn tree_max_depth(node: Option<&ActionNode>) -> usize {
    let Some(node) = node else { return 0 };
    1 + node
        .children
        .iter()
        .map(|child| tree_max_depth(Some(child)))
        .max()
        .unwrap_or(0)
}

/// Structural upper bound on the number of paths a tree can yield.
///
/// Product of children's counts for AND-like nodes (craft/require/explicit `And`
/// operator), sum for OR-like/union nodes; 0 for a childless root, 1 for any other
/// childless node. Saturating: a saturated count still reads as "too many".
pub fn count_action_paths(node: Option<&ActionNode>) -> u64 {
    let Some(node) = node else { return 0 };
    if node.children.is_empty() {
        return match node.kind {
            ActionKind::Root => 0,
            _ => 1,
        };
    }

    let and_like = matches!(node.kind, ActionKind::Craft | ActionKind::Require)
        || (node.kind != ActionKind::Root && node.operator == Operator::And);

    let counts = node
        .children
        .iter()
        .map(|child| count_action_paths(Some(child)));
    if and_like {
        counts.fold(1u64, u64::saturating_mul)
    } else {
        counts.fold(0u64, u64::saturating_add)
    }
}
