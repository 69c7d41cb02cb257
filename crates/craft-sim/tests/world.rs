use craft_sim::{
    can_consume_world, consume_world, sum_available, SourceKind, WorldBudget, UNBOUNDED,
};

fn budget() -> WorldBudget {
    let mut budget = WorldBudget::new();
    budget.add_source(SourceKind::Blocks, "iron_ore", 5);
    budget.add_source(SourceKind::Blocks, "coal_ore", 12);
    budget.add_source(SourceKind::Entities, "cow", 3);
    budget
}

#[test]
fn no_budget_never_blocks_planning() {
    assert!(can_consume_world(None, SourceKind::Blocks, "iron_ore", 999));
    assert_eq!(
        sum_available(None, SourceKind::Blocks, &["iron_ore"]),
        UNBOUNDED
    );
    // Consuming against nothing is a no-op rather than an error.
    consume_world(None, SourceKind::Blocks, "iron_ore", 10);
}

#[test]
fn missing_pool_reads_as_unconstrained() {
    let mut budget = WorldBudget::new();
    budget.add_source(SourceKind::Blocks, "iron_ore", 5);
    assert!(budget.can_consume(SourceKind::Entities, "cow", 7));
    assert_eq!(budget.sum_available(SourceKind::Entities, &["cow"]), UNBOUNDED);
}

#[test]
fn zero_amount_is_always_consumable() {
    let budget = budget();
    assert!(budget.can_consume(SourceKind::Blocks, "diamond_ore", 0));
    assert!(!budget.can_consume(SourceKind::Blocks, "diamond_ore", 1));
}

#[test]
fn quantity_gates_consumption() {
    let budget = budget();
    assert!(budget.can_consume(SourceKind::Blocks, "iron_ore", 5));
    assert!(!budget.can_consume(SourceKind::Blocks, "iron_ore", 6));
}

#[test]
fn distance_gate_overrides_quantity() {
    let mut budget = budget().with_distance_threshold(32.0);
    budget.note_distance("iron_ore", 48.0);
    // Stock exists, but the closest instance is out of reach.
    assert!(!budget.can_consume(SourceKind::Blocks, "iron_ore", 1));

    // A closer observation re-enables the name.
    budget.note_distance("iron_ore", 16.0);
    assert!(budget.can_consume(SourceKind::Blocks, "iron_ore", 1));

    // Names without metadata are unaffected by the threshold.
    assert!(budget.can_consume(SourceKind::Blocks, "coal_ore", 1));
}

#[test]
fn consume_floors_at_zero() {
    let mut budget = budget();
    budget.consume(SourceKind::Blocks, "iron_ore", 3);
    assert_eq!(budget.available(SourceKind::Blocks, "iron_ore"), 2);
    budget.consume(SourceKind::Blocks, "iron_ore", 10);
    assert_eq!(budget.available(SourceKind::Blocks, "iron_ore"), 0);
}

#[test]
fn sum_spans_the_name_set() {
    let budget = budget();
    assert_eq!(
        budget.sum_available(SourceKind::Blocks, &["iron_ore", "coal_ore", "gold_ore"]),
        17
    );
}

#[test]
fn reservation_drains_most_stocked_first() {
    let mut budget = WorldBudget::new();
    budget.add_source(SourceKind::Blocks, "oak_log", 4);
    budget.add_source(SourceKind::Blocks, "birch_log", 9);
    budget.add_source(SourceKind::Blocks, "spruce_log", 4);

    let reserved =
        budget.reserve_from_sources(SourceKind::Blocks, &["oak_log", "birch_log", "spruce_log"], 11);
    assert_eq!(reserved, 11);
    // birch (9) drains fully first, then the tie between oak and spruce breaks by list order.
    assert_eq!(budget.available(SourceKind::Blocks, "birch_log"), 0);
    assert_eq!(budget.available(SourceKind::Blocks, "oak_log"), 2);
    assert_eq!(budget.available(SourceKind::Blocks, "spruce_log"), 4);
}

#[test]
fn reservation_reports_shortfall() {
    let mut budget = WorldBudget::new();
    budget.add_source(SourceKind::Blocks, "oak_log", 4);
    let reserved = budget.reserve_from_sources(SourceKind::Blocks, &["oak_log", "birch_log"], 10);
    assert_eq!(reserved, 4);
    assert_eq!(budget.available(SourceKind::Blocks, "oak_log"), 0);
}
