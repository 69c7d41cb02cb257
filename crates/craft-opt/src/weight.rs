//! The fixed integer cost model for ranking whole paths.
//!
//! Deterministic and independent of the stream engine's per-item scores; used for
//! post-hoc comparison and tie-breaking. The magnitudes encode a strict preference
//! order: craft over smelt over mine over hunt, and fewer units over more.

use craft_core::{ActionKind, ActionPath, ActionStep};

/// Craft-station value meaning "no station needed".
pub const INVENTORY_STATION: &str = "inventory";

/// Cost of one step. Zero-count steps and grouping kinds contribute nothing.
pub fn step_weight(step: &ActionStep) -> u64 {
    if step.count == 0 {
        return 0;
    }
    let count = u64::from(step.count);
    match step.action {
        ActionKind::Craft if step.what == INVENTORY_STATION => count,
        ActionKind::Craft => 10 * count,
        ActionKind::Smelt => 100 * count,
        ActionKind::Mine => 1000 * count,
        ActionKind::Hunt => 10_000 * count,
        ActionKind::Root | ActionKind::Require => 0,
    }
}

/// Aggregate cost of a path.
pub fn path_weight(path: &ActionPath) -> u64 {
    path.iter().map(step_weight).fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(action: ActionKind, what: &str, count: u32) -> ActionStep {
        ActionStep {
            action,
            what: what.into(),
            count,
            ..ActionStep::default()
        }
    }

    #[test]
    fn kinds_are_ordered_by_magnitude() {
        let craft_inv = step(ActionKind::Craft, "inventory", 1);
        let craft_table = step(ActionKind::Craft, "table", 1);
        let smelt = step(ActionKind::Smelt, "furnace", 1);
        let mine = step(ActionKind::Mine, "iron_ore", 1);
        let hunt = step(ActionKind::Hunt, "cow", 1);

        assert_eq!(step_weight(&craft_inv), 1);
        assert_eq!(step_weight(&craft_table), 10);
        assert_eq!(step_weight(&smelt), 100);
        assert_eq!(step_weight(&mine), 1000);
        assert_eq!(step_weight(&hunt), 10_000);
    }

    #[test]
    fn count_scales_and_zero_count_is_free() {
        assert_eq!(step_weight(&step(ActionKind::Mine, "iron_ore", 3)), 3000);
        assert_eq!(step_weight(&step(ActionKind::Hunt, "cow", 0)), 0);
    }

    #[test]
    fn a_long_cheap_path_can_still_beat_one_expensive_step() {
        let crafting = ActionPath::new(vec![
            step(ActionKind::Craft, "inventory", 4),
            step(ActionKind::Craft, "table", 2),
        ]);
        let hunting = ActionPath::new(vec![step(ActionKind::Hunt, "cow", 1)]);
        assert!(path_weight(&crafting) < path_weight(&hunting));
    }
}
