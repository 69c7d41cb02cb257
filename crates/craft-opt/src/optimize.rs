//! Path rewrites that remove redundant work without changing what a path produces.

use std::collections::{BTreeMap, BTreeSet};

use craft_core::{ActionKind, ActionPath, ActionStep};

type MineKey<'a> = (&'a str, Option<&'a str>, Option<&'a str>);

fn mine_key(step: &ActionStep) -> MineKey<'_> {
    (
        step.what.as_str(),
        step.target_item.as_deref(),
        step.tool.as_deref(),
    )
}

/// Collapse repeated mine steps of the same `(what, target item, tool)` into the first
/// occurrence, summing counts. The surviving step is only rewritten when its count
/// actually changed; later duplicates are removed.
pub fn hoist_mining(path: &ActionPath) -> ActionPath {
    let mut first_at: BTreeMap<MineKey<'_>, usize> = BTreeMap::new();
    let mut totals: BTreeMap<MineKey<'_>, u32> = BTreeMap::new();
    for (index, step) in path.iter().enumerate() {
        if step.action != ActionKind::Mine {
            continue;
        }
        let key = mine_key(step);
        first_at.entry(key).or_insert(index);
        let total = totals.entry(key).or_insert(0);
        *total = total.saturating_add(step.count);
    }

    let mut steps = Vec::with_capacity(path.len());
    for (index, step) in path.iter().enumerate() {
        if step.action != ActionKind::Mine {
            steps.push(step.clone());
            continue;
        }
        let key = mine_key(step);
        if first_at.get(&key) != Some(&index) {
            continue;
        }
        let total = totals.get(&key).copied().unwrap_or(step.count);
        if total == step.count {
            steps.push(step.clone());
        } else {
            steps.push(ActionStep {
                count: total,
                ..step.clone()
            });
        }
    }
    ActionPath::new(steps)
}

/// Drop any step that re-produces a persistent item already produced earlier in the path.
///
/// The first producer is kept in full; a second copy of a keep-forever item (tool,
/// station) is wholly redundant, so the later step is removed entirely rather than having
/// its count reduced. Non-persistent productions pass through untouched.
pub fn dedup_persistent(path: &ActionPath, is_persistent: impl Fn(&str) -> bool) -> ActionPath {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut steps = Vec::with_capacity(path.len());
    for step in path.iter() {
        if let Some(item) = step.produced_item() {
            if is_persistent(item) && !seen.insert(item.to_string()) {
                continue;
            }
        }
        steps.push(step.clone());
    }
    ActionPath::new(steps)
}

/// Default persistence predicate: stations and tools are kept forever once obtained.
pub fn is_persistent_name(name: &str) -> bool {
    const STATIONS: [&str; 2] = ["crafting_table", "furnace"];
    const TOOL_SUFFIXES: [&str; 6] = ["_pickaxe", "_axe", "_shovel", "_sword", "_hoe", "_shears"];
    STATIONS.contains(&name) || TOOL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::ResultSpec;

    fn mine(what: &str, count: u32) -> ActionStep {
        ActionStep {
            action: ActionKind::Mine,
            what: what.into(),
            count,
            ..ActionStep::default()
        }
    }

    fn craft(result: &str) -> ActionStep {
        ActionStep {
            action: ActionKind::Craft,
            what: "inventory".into(),
            count: 1,
            result: Some(ResultSpec {
                item: result.into(),
                count: 1,
            }),
            ..ActionStep::default()
        }
    }

    #[test]
    fn duplicate_mining_collapses_into_the_first_occurrence() {
        let path = ActionPath::new(vec![
            mine("oak_log", 2),
            craft("planks"),
            mine("oak_log", 1),
            mine("oak_log", 3),
        ]);
        let hoisted = hoist_mining(&path);
        assert_eq!(hoisted.len(), 2);
        assert_eq!(hoisted.steps[0].count, 6);
        assert_eq!(hoisted.steps[0].what, "oak_log");
        assert_eq!(hoisted.steps[1].action, ActionKind::Craft);
    }

    #[test]
    fn different_tools_are_different_mining_steps() {
        let path = ActionPath::new(vec![
            ActionStep {
                tool: Some("stone_pickaxe".into()),
                ..mine("iron_ore", 1)
            },
            ActionStep {
                tool: Some("iron_pickaxe".into()),
                ..mine("iron_ore", 1)
            },
        ]);
        assert_eq!(hoist_mining(&path).len(), 2);
    }

    #[test]
    fn untouched_paths_come_back_step_for_step() {
        let path = ActionPath::new(vec![mine("oak_log", 2), craft("planks")]);
        assert_eq!(hoist_mining(&path), path);
    }

    #[test]
    fn later_persistent_production_is_dropped_entirely() {
        let path = ActionPath::new(vec![
            craft("crafting_table"),
            craft("stick"),
            // A second table via a different action is still redundant.
            ActionStep {
                target_item: Some("crafting_table".into()),
                ..mine("crafting_table", 1)
            },
        ]);
        let deduped = dedup_persistent(&path, is_persistent_name);
        assert_eq!(deduped.len(), 2);
        assert_eq!(
            deduped.steps[1].result.as_ref().map(|r| r.item.as_str()),
            Some("stick")
        );
    }

    #[test]
    fn non_persistent_duplicates_survive() {
        let path = ActionPath::new(vec![craft("stick"), craft("stick")]);
        assert_eq!(dedup_persistent(&path, is_persistent_name).len(), 2);
    }
}
