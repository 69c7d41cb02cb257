//! Step-by-step replay of a path against a supply ledger.

use std::collections::BTreeMap;

use thiserror::Error;

use craft_core::{ActionKind, ActionPath, ActionStep};

/// Item name to held quantity. Ordered so replay diagnostics are deterministic.
pub type Supply = BTreeMap<String, u64>;

/// Crafting-station item gating `table` crafts when stations are required.
pub const CRAFTING_TABLE: &str = "crafting_table";
/// Station item gating smelts when stations are required.
pub const FURNACE: &str = "furnace";
/// The `what` value of a craft step that needs a crafting table.
pub const TABLE_STATION: &str = "table";

/// Fuel-yield lookup failure. Caught inside the simulator and substituted with a
/// conservative 1-unit fuel deduction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no smelt yield known for fuel `{0}`")]
pub struct FuelError(pub String);

/// Smelts obtainable from one unit of the named fuel.
pub type FuelYieldFn<'a> = dyn Fn(&str) -> Result<u32, FuelError> + 'a;

/// Inputs to one simulation pass. The supply is cloned internally; the caller's ledger is
/// never touched.
pub struct SimOptions<'a> {
    pub initial_supply: &'a Supply,
    pub fuel_yield: Option<&'a FuelYieldFn<'a>>,
    /// When set, `table` crafts require a crafting table in supply and smelts require a
    /// furnace (presence, not consumption).
    pub require_stations: bool,
}

/// Replay `path` in order and report whether every step could run.
///
/// Infeasibility is a normal answer, not an error: the first failing deduction abandons
/// the run and returns `false`.
pub fn simulate(path: &ActionPath, opts: &SimOptions<'_>) -> bool {
    let mut supply = opts.initial_supply.clone();
    for step in path.iter() {
        if !apply_step(&mut supply, step, opts) {
            return false;
        }
    }
    true
}

/// The real validity constraint: stations must be present.
pub fn is_path_valid_basic(
    path: &ActionPath,
    initial_supply: &Supply,
    fuel_yield: Option<&FuelYieldFn<'_>>,
) -> bool {
    simulate(
        path,
        &SimOptions {
            initial_supply,
            fuel_yield,
            require_stations: true,
        },
    )
}

/// Station-blind mode: can this sub-path still combine algebraically with others that may
/// provide the stations later?
pub fn is_path_composable_basic(
    path: &ActionPath,
    initial_supply: &Supply,
    fuel_yield: Option<&FuelYieldFn<'_>>,
) -> bool {
    simulate(
        path,
        &SimOptions {
            initial_supply,
            fuel_yield,
            require_stations: false,
        },
    )
}

fn apply_step(supply: &mut Supply, step: &ActionStep, opts: &SimOptions<'_>) -> bool {
    match step.action {
        // Obtainment is assumed to succeed; it only adds to supply.
        ActionKind::Mine | ActionKind::Hunt => {
            if let Some(item) = step.produced_item() {
                add(supply, item, u64::from(step.count));
            }
            true
        }
        ActionKind::Craft => {
            if opts.require_stations
                && step.what == TABLE_STATION
                && held(supply, CRAFTING_TABLE) == 0
            {
                tracing::trace!(step = %step.what, "craft rejected: no crafting table");
                return false;
            }
            for ingredient in &step.ingredients {
                let need = u64::from(ingredient.count).saturating_mul(u64::from(step.count));
                if !take(supply, &ingredient.item, need) {
                    tracing::trace!(
                        item = %ingredient.item,
                        need,
                        have = held(supply, &ingredient.item),
                        "craft rejected: ingredient shortfall"
                    );
                    return false;
                }
            }
            if let Some(result) = &step.result {
                add(
                    supply,
                    &result.item,
                    u64::from(result.count).saturating_mul(u64::from(step.count)),
                );
            }
            true
        }
        ActionKind::Smelt => {
            if opts.require_stations && held(supply, FURNACE) == 0 {
                tracing::trace!("smelt rejected: no furnace");
                return false;
            }
            if let Some(input) = &step.input {
                let need = u64::from(input.count).saturating_mul(u64::from(step.count));
                if !take(supply, &input.item, need) {
                    tracing::trace!(
                        item = %input.item,
                        need,
                        "smelt rejected: input shortfall"
                    );
                    return false;
                }
            }
            if let Some(fuel) = &step.fuel {
                let need = fuel_units(step.count, fuel, opts.fuel_yield);
                if !take(supply, fuel, need) {
                    tracing::trace!(fuel = %fuel, need, "smelt rejected: fuel shortfall");
                    return false;
                }
            }
            if let Some(result) = &step.result {
                add(
                    supply,
                    &result.item,
                    u64::from(result.count).saturating_mul(u64::from(step.count)),
                );
            }
            true
        }
        // Grouping kinds never appear in flattened paths; tolerate them as no-ops.
        ActionKind::Root | ActionKind::Require => true,
    }
}

/// Fuel units needed for `count` smelts: `ceil(count / yield)` with a known positive
/// yield, the full `count` when no positive yield is known, and 1 when the lookup fails.
fn fuel_units(count: u32, fuel: &str, fuel_yield: Option<&FuelYieldFn<'_>>) -> u64 {
    let Some(lookup) = fuel_yield else {
        return u64::from(count);
    };
    match lookup(fuel) {
        Ok(smelts_per_unit) if smelts_per_unit > 0 => {
            u64::from(count.div_ceil(smelts_per_unit))
        }
        Ok(_) => u64::from(count),
        Err(_) => 1,
    }
}

fn held(supply: &Supply, item: &str) -> u64 {
    supply.get(item).copied().unwrap_or(0)
}

fn add(supply: &mut Supply, item: &str, amount: u64) {
    *supply.entry(item.to_string()).or_insert(0) += amount;
}

fn take(supply: &mut Supply, item: &str, amount: u64) -> bool {
    match supply.get_mut(item) {
        Some(have) if *have >= amount => {
            *have -= amount;
            true
        }
        _ => amount == 0,
    }
}
