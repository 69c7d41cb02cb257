//! Cheapest-alternative selection over plain item names.
//!
//! These helpers rank candidate tool/fuel names by fixed tier tables; they deliberately
//! take name lists, not variant fields, so callers resolve variants first. Unknown names
//! rank after every known tier; ties break by input order.

/// Tool material tiers, cheapest first.
const TOOL_TIERS: [&str; 6] = ["wooden", "stone", "golden", "iron", "diamond", "netherite"];

/// Fuel names by how precious they are, cheapest first.
const FUEL_TIERS: [&str; 7] = [
    "stick",
    "planks",
    "log",
    "coal",
    "charcoal",
    "blaze_rod",
    "lava_bucket",
];

fn tool_tier(name: &str) -> usize {
    TOOL_TIERS
        .iter()
        .position(|tier| name.starts_with(tier))
        .unwrap_or(TOOL_TIERS.len())
}

fn fuel_tier(name: &str) -> usize {
    FUEL_TIERS
        .iter()
        .position(|tier| name.contains(tier))
        .unwrap_or(FUEL_TIERS.len())
}

/// The cheapest-tier tool name, or `None` for an empty list.
pub fn minimal_tool<'a>(names: &[&'a str]) -> Option<&'a str> {
    names
        .iter()
        .enumerate()
        .min_by_key(|(index, name)| (tool_tier(name), *index))
        .map(|(_, name)| *name)
}

/// The cheapest-tier fuel name, or `None` for an empty list.
pub fn minimal_fuel<'a>(names: &[&'a str]) -> Option<&'a str> {
    names
        .iter()
        .enumerate()
        .min_by_key(|(index, name)| (fuel_tier(name), *index))
        .map(|(_, name)| *name)
}
