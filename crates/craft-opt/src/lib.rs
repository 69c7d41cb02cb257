//! Post-generation rewrites and ranking for crafting plans.
//!
//! Everything here takes a finished `ActionPath` (or plain item names) and returns a new
//! value; generation-time ordering stays in `craft-plan`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod optimize;
pub mod select;
pub mod weight;

pub use optimize::{dedup_persistent, hoist_mining, is_persistent_name};
pub use select::{minimal_fuel, minimal_tool};
pub use weight::{path_weight, step_weight, INVENTORY_STATION};
