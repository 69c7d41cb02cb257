//! Lazy, priority-ordered enumeration of crafting plans.
//!
//! [`enumerate`] is the eager reference semantics: every path a tree can yield, fully
//! materialized. The stream engine ([`compile`] over [`OrMerge`]/[`AndCombine`]) produces
//! the same set of paths lazily, cheapest first, so a consumer can pull until satisfied
//! and stop. [`Planner`] wires the streams to the simulator, the optimizers, and the
//! world budget.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod compile;
pub mod enumerate;
pub mod planner;
pub mod stream;

pub use compile::compile;
pub use enumerate::enumerate;
pub use planner::{Planner, PlannerConfig};
pub use stream::{
    empty_stream, singleton_stream, AndCombine, OrMerge, PathStream, RankedPath, StreamHooks,
};
