//! Deterministic, engine-agnostic crafting-plan primitives.
//!
//! The tree model (`ActionNode`) describes the alternative and combined ways to obtain an
//! item; `ActionStep`/`ActionPath` are the flattened, concrete plans handed to execution.
//! Planners operate on these types without mutating nodes, so sub-trees may be shared
//! across alternative branches.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod metrics;
pub mod node;
pub mod path;
pub mod variant;

pub use metrics::{count_action_paths, tree_max_depth};
pub use node::{ActionKind, ActionNode, IngredientSpec, InputSpec, Operator, ResultSpec, TreeError};
pub use path::{ActionPath, ActionStep};
pub use variant::Variants;
