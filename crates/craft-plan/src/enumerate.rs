//! Eager reference enumeration: every path a tree can yield, fully materialized.
//!
//! Memory-proportional to branching factor × depth, so it suits small trees and
//! cross-checking the stream engine; production consumers pull from the stream instead.

use std::sync::Arc;

use craft_core::{ActionKind, ActionNode, ActionPath, ActionStep, Operator};

/// All paths of `tree`. Zero paths is the normal answer for an infeasible tree.
pub fn enumerate(node: &ActionNode) -> Vec<ActionPath> {
    match node.kind {
        // A root is a union of its children, not a product.
        ActionKind::Root => union(&node.children),
        ActionKind::Require => product(&node.children, None),
        ActionKind::Craft => {
            if node.children.is_empty() {
                leaf_paths(node)
            } else {
                product(&node.children, node.production_step())
            }
        }
        ActionKind::Smelt => {
            if node.children.is_empty() {
                leaf_paths(node)
            } else if node.operator == Operator::Or {
                union(&node.children)
            } else {
                product(&node.children, node.production_step())
            }
        }
        ActionKind::Mine | ActionKind::Hunt => {
            if node.children.is_empty() {
                leaf_paths(node)
            } else if node.operator == Operator::Or {
                union(&node.children)
            } else {
                // Mine/hunt have no AND production semantics.
                Vec::new()
            }
        }
    }
}

fn leaf_paths(node: &ActionNode) -> Vec<ActionPath> {
    match node.leaf_step() {
        Some(step) => vec![ActionPath::new(vec![step])],
        // Malformed leaves contribute nothing rather than failing.
        None => Vec::new(),
    }
}

fn union(children: &[Arc<ActionNode>]) -> Vec<ActionPath> {
    children.iter().flat_map(|child| enumerate(child)).collect()
}

/// Cartesian product of the children's path lists, each combination concatenated in child
/// order and followed by `parent_step` when present. Any child with zero paths is a hard
/// dependency failure: the whole node yields zero.
fn product(children: &[Arc<ActionNode>], parent_step: Option<ActionStep>) -> Vec<ActionPath> {
    let mut combos: Vec<Vec<ActionStep>> = vec![Vec::new()];
    for child in children {
        let child_paths = enumerate(child);
        if child_paths.is_empty() {
            return Vec::new();
        }
        let mut next = Vec::with_capacity(combos.len() * child_paths.len());
        for prefix in &combos {
            for path in &child_paths {
                let mut steps = prefix.clone();
                steps.extend(path.steps.iter().cloned());
                next.push(steps);
            }
        }
        combos = next;
    }
    combos
        .into_iter()
        .map(|mut steps| {
            if let Some(step) = &parent_step {
                steps.push(step.clone());
            }
            ActionPath::new(steps)
        })
        .collect()
}
