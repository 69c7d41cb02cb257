//! The stream engine drained to exhaustion must produce exactly the eager enumerator's
//! path set, with scores never decreasing along the way.

use std::rc::Rc;

use craft_core::{
    ActionKind, ActionNode, ActionPath, IngredientSpec, Operator, ResultSpec, Variants,
};
use craft_plan::{compile, enumerate, StreamHooks};

fn mine(what: &str, count: u32) -> ActionNode {
    ActionNode::new(ActionKind::Mine)
        .with_what(Variants::single(what.to_string()))
        .with_count(count)
}

fn hunt(what: &str) -> ActionNode {
    ActionNode::new(ActionKind::Hunt)
        .with_what(Variants::single(what.to_string()))
        .with_drop_chance(0.5)
}

fn craft(station: &str, result: &str, ingredients: &[(&str, u32)]) -> ActionNode {
    ActionNode::new(ActionKind::Craft)
        .with_what(Variants::single(station.to_string()))
        .with_result(Variants::single(ResultSpec {
            item: result.into(),
            count: 1,
        }))
        .with_ingredients(Variants::single(
            ingredients
                .iter()
                .map(|(item, count)| IngredientSpec {
                    item: item.to_string(),
                    count: *count,
                })
                .collect(),
        ))
}

/// root
/// ├── craft sword        (AND: ore-alternatives × stick production, then the craft)
/// │   ├── mine (OR): iron_ore | deepslate_iron_ore
/// │   └── craft stick   (AND: mine oak_log, then the craft)
/// ├── smelt (OR): mine sand | mine red_sand     (union, no smelt step appended)
/// └── hunt zombie
fn fixture() -> ActionNode {
    let ore = ActionNode::new(ActionKind::Mine)
        .with_operator(Operator::Or)
        .with_what(Variants::single("iron_ore".to_string()))
        .with_children(vec![
            mine("iron_ore", 3).into(),
            mine("deepslate_iron_ore", 3).into(),
        ]);
    let stick = craft("inventory", "stick", &[("planks", 2)]).with_child(mine("oak_log", 1));
    let sword = craft("table", "iron_sword", &[("iron_ingot", 2), ("stick", 1)])
        .with_child(ore)
        .with_child(stick);

    let glass_routes = ActionNode::new(ActionKind::Smelt)
        .with_operator(Operator::Or)
        .with_input(Variants::single(craft_core::InputSpec {
            item: "sand".into(),
            count: 1,
        }))
        .with_children(vec![mine("sand", 4).into(), mine("red_sand", 4).into()]);

    ActionNode::new(ActionKind::Root)
        .with_child(sword)
        .with_child(glass_routes)
        .with_child(hunt("zombie"))
}

fn signature(path: &ActionPath) -> Vec<(ActionKind, String, u32)> {
    path.iter()
        .map(|step| (step.action, step.what.clone(), step.count))
        .collect()
}

#[test]
fn drained_stream_matches_the_eager_enumeration() {
    let tree = fixture();

    let mut eager: Vec<_> = enumerate(&tree).iter().map(signature).collect();
    eager.sort();

    let hooks = Rc::new(StreamHooks::default());
    let drained: Vec<_> = compile(&tree, &hooks).collect();
    let mut streamed: Vec<_> = drained.iter().map(|ranked| signature(&ranked.path)).collect();
    streamed.sort();

    assert_eq!(eager.len(), 5);
    assert_eq!(streamed, eager);
}

#[test]
fn stream_scores_never_decrease() {
    let tree = fixture();
    let hooks = Rc::new(StreamHooks::default());
    let scores: Vec<u64> = compile(&tree, &hooks).map(|ranked| ranked.score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn failing_required_branch_contributes_nothing() {
    // A require over a structurally dead child (mine with AND children is undefined)
    // yields zero paths; the root degrades to its surviving branch.
    let dead = ActionNode::new(ActionKind::Mine)
        .with_what(Variants::single("bedrock".to_string()))
        .with_operator(Operator::And)
        .with_child(mine("stone", 1));
    let require = ActionNode::new(ActionKind::Require)
        .with_child(dead)
        .with_child(mine("dirt", 1));
    let tree = ActionNode::new(ActionKind::Root)
        .with_child(require)
        .with_child(hunt("cow"));

    let eager = enumerate(&tree);
    assert_eq!(eager.len(), 1);

    let hooks = Rc::new(StreamHooks::default());
    let drained: Vec<_> = compile(&tree, &hooks).collect();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].path.steps[0].action, ActionKind::Hunt);
}

#[test]
fn no_solution_is_an_empty_result_not_an_error() {
    let tree = ActionNode::new(ActionKind::Root);
    assert!(enumerate(&tree).is_empty());
    let hooks = Rc::new(StreamHooks::default());
    assert_eq!(compile(&tree, &hooks).count(), 0);
}
