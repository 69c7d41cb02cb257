//! Tree → stream compiler.
//!
//! Applies the same structural rules as the eager enumerator, but builds a lazy
//! combinator tree instead of materializing paths. Structurally infeasible nodes compile
//! to the empty stream, which propagates as "this branch contributes nothing".

use std::rc::Rc;
use std::sync::Arc;

use craft_core::{ActionKind, ActionNode, ActionStep, Operator};

use crate::stream::{empty_stream, singleton_stream, AndCombine, OrMerge, PathStream, StreamHooks};

/// Compile a tree into a lazy, cheapest-first path stream.
///
/// The node is read, never mutated, so sub-trees shared across alternative branches may
/// be compiled into several streams within one drain.
pub fn compile(node: &ActionNode, hooks: &Rc<StreamHooks>) -> PathStream {
    match node.kind {
        ActionKind::Root => or_over(&node.children, hooks),
        ActionKind::Require => and_over(&node.children, None, hooks),
        ActionKind::Craft => {
            if node.children.is_empty() {
                leaf(node, hooks)
            } else {
                and_over(&node.children, node.production_step(), hooks)
            }
        }
        ActionKind::Smelt => {
            if node.children.is_empty() {
                leaf(node, hooks)
            } else if node.operator == Operator::Or {
                or_over(&node.children, hooks)
            } else {
                and_over(&node.children, node.production_step(), hooks)
            }
        }
        ActionKind::Mine | ActionKind::Hunt => {
            if node.children.is_empty() {
                leaf(node, hooks)
            } else if node.operator == Operator::Or {
                or_over(&node.children, hooks)
            } else {
                empty_stream()
            }
        }
    }
}

fn leaf(node: &ActionNode, hooks: &Rc<StreamHooks>) -> PathStream {
    match node.leaf_step() {
        Some(step) => singleton_stream(step, hooks),
        None => empty_stream(),
    }
}

fn or_over(children: &[Arc<ActionNode>], hooks: &Rc<StreamHooks>) -> PathStream {
    if children.is_empty() {
        return empty_stream();
    }
    let streams: Vec<PathStream> = children.iter().map(|child| compile(child, hooks)).collect();
    Box::new(OrMerge::new(streams))
}

fn and_over(
    children: &[Arc<ActionNode>],
    parent_step: Option<ActionStep>,
    hooks: &Rc<StreamHooks>,
) -> PathStream {
    let streams: Vec<PathStream> = children.iter().map(|child| compile(child, hooks)).collect();
    Box::new(AndCombine::new(streams, parent_step, Rc::clone(hooks)))
}
