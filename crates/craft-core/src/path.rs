#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{ActionKind, IngredientSpec, InputSpec, ResultSpec};

/// A flattened, concrete instruction: one unit of an `ActionPath`.
///
/// Steps are "dumb data" so they can be serialized, simulated, and rewritten by the
/// optimizers without touching the tree they came from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionStep {
    pub action: ActionKind,
    /// Mined block / hunted entity name, or the craft station (`inventory` / `table`).
    pub what: String,
    pub count: u32,
    pub result: Option<ResultSpec>,
    pub ingredients: Vec<IngredientSpec>,
    pub input: Option<InputSpec>,
    pub fuel: Option<String>,
    pub drop_chance: Option<f64>,
    pub tool: Option<String>,
    pub target_item: Option<String>,
}

impl ActionStep {
    /// The item this step puts into supply, if any.
    ///
    /// Mine/hunt produce their resolved target item (falling back to the block/entity
    /// name); craft/smelt produce their result item. Grouping kinds produce nothing.
    pub fn produced_item(&self) -> Option<&str> {
        match self.action {
            ActionKind::Mine | ActionKind::Hunt => {
                Some(self.target_item.as_deref().unwrap_or(self.what.as_str()))
            }
            ActionKind::Craft | ActionKind::Smelt => {
                self.result.as_ref().map(|r| r.item.as_str())
            }
            ActionKind::Root | ActionKind::Require => None,
        }
    }
}

/// One fully ordered, concrete plan: the sole artifact handed to execution.
///
/// Steps are in dependency order; the simulator (not construction) enforces that a step
/// never consumes an item before enough of it has been produced.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionPath {
    pub steps: Vec<ActionStep>,
}

impl ActionPath {
    pub fn new(steps: Vec<ActionStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionStep> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn steps_serialize_with_snake_case_kinds() {
        let step = ActionStep {
            action: ActionKind::Mine,
            what: "iron_ore".into(),
            count: 2,
            ..ActionStep::default()
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["action"], "mine");
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn mine_produces_target_item_over_block_name() {
        let step = ActionStep {
            action: ActionKind::Mine,
            what: "iron_ore".into(),
            count: 1,
            target_item: Some("raw_iron".into()),
            ..ActionStep::default()
        };
        assert_eq!(step.produced_item(), Some("raw_iron"));
    }

    #[test]
    fn craft_produces_its_result() {
        let step = ActionStep {
            action: ActionKind::Craft,
            what: "inventory".into(),
            count: 1,
            result: Some(ResultSpec {
                item: "stick".into(),
                count: 4,
            }),
            ..ActionStep::default()
        };
        assert_eq!(step.produced_item(), Some("stick"));
    }
}
