//! Feasibility checks for crafting plans.
//!
//! The simulator replays a path against a private copy of the supply ledger and answers
//! "would this order of steps run out of anything?". The world budget answers the coarser
//! question "does the nearby world even hold enough of the raw materials?", with a
//! distance gate and depletion tracking as paths are committed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod sim;
pub mod world;

pub use sim::{
    is_path_composable_basic, is_path_valid_basic, simulate, FuelError, FuelYieldFn, SimOptions,
    Supply, CRAFTING_TABLE, FURNACE, TABLE_STATION,
};
pub use world::{
    can_consume_world, consume_world, sum_available, SourceKind, WorldBudget, UNBOUNDED,
};
