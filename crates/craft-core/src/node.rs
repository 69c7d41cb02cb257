use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::ActionStep;
use crate::variant::Variants;

/// What a node contributes to a plan when it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    #[default]
    Root,
    Require,
    Craft,
    Smelt,
    Mine,
    Hunt,
}

/// How a node's children combine. Meaningful only when `children` is non-empty.
///
/// `And`: every child must contribute (Cartesian combination, followed by the node's own
/// step when it is a producing kind). `Or`: any one child satisfies the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operator {
    And,
    Or,
}

/// Units produced per craft/smelt action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultSpec {
    pub item: String,
    pub count: u32,
}

/// Units of one ingredient consumed per craft action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IngredientSpec {
    pub item: String,
    pub count: u32,
}

/// Units of the smelt input consumed per smelt action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputSpec {
    pub item: String,
    pub count: u32,
}

/// Rejected shapes of a machine-built tree.
///
/// Validation is opt-in and runs once at ingestion; planners themselves degrade
/// gracefully on malformed nodes (empty contribution, never a panic).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    #[error("variant field `{field}` on a {kind:?} node has no alternatives")]
    EmptyVariants { kind: ActionKind, field: &'static str },

    #[error("hunt drop chance {value} outside (0, 1]")]
    DropChanceOutOfRange { value: f64 },

    #[error("{kind:?} leaf is missing its `{field}` field")]
    MissingField { kind: ActionKind, field: &'static str },
}

/// One node of the recipe tree.
///
/// Trees are built once per planning request by an external builder and are read-only to
/// this core. Children are `Arc`-shared so a sub-tree may appear under several alternative
/// branches without being copied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionNode {
    pub kind: ActionKind,
    pub operator: Operator,
    pub children: Vec<Arc<ActionNode>>,

    /// Mined block / hunted entity name, or the craft station (`inventory` / `table`).
    pub what: Option<Variants<String>>,
    pub result: Option<Variants<ResultSpec>>,
    pub ingredients: Option<Variants<Vec<IngredientSpec>>>,
    pub input: Option<Variants<InputSpec>>,
    pub fuel: Option<Variants<String>>,

    /// Units required of this node's product.
    pub count: u32,
    /// Per-kill drop probability, hunt only, in (0, 1].
    pub drop_chance: Option<f64>,
    pub tool: Option<String>,
    pub target_item: Option<String>,
}

impl ActionNode {
    pub fn new(kind: ActionKind) -> Self {
        let operator = match kind {
            ActionKind::Root => Operator::Or,
            _ => Operator::And,
        };
        Self {
            kind,
            operator,
            children: Vec::new(),
            what: None,
            result: None,
            ingredients: None,
            input: None,
            fuel: None,
            count: 1,
            drop_chance: None,
            tool: None,
            target_item: None,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_child(mut self, child: impl Into<Arc<ActionNode>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Arc<ActionNode>>) -> Self {
        self.children = children;
        self
    }

    pub fn with_what(mut self, what: Variants<String>) -> Self {
        self.what = Some(what);
        self
    }

    pub fn with_result(mut self, result: Variants<ResultSpec>) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_ingredients(mut self, ingredients: Variants<Vec<IngredientSpec>>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    pub fn with_input(mut self, input: Variants<InputSpec>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_fuel(mut self, fuel: Variants<String>) -> Self {
        self.fuel = Some(fuel);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_drop_chance(mut self, drop_chance: f64) -> Self {
        self.drop_chance = Some(drop_chance);
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_target_item(mut self, target_item: impl Into<String>) -> Self {
        self.target_item = Some(target_item.into());
        self
    }

    /// True for kinds that contribute a step of their own (everything but grouping nodes).
    pub fn is_producer(&self) -> bool {
        !matches!(self.kind, ActionKind::Root | ActionKind::Require)
    }

    /// This node's own flattened step, ignoring any sub-tree. `None` for grouping nodes.
    ///
    /// Variant fields resolve to their primary alternative; recursive fields are dropped.
    pub fn production_step(&self) -> Option<ActionStep> {
        if !self.is_producer() {
            return None;
        }
        Some(ActionStep {
            action: self.kind,
            what: self
                .what
                .as_ref()
                .map(|v| v.primary().clone())
                .unwrap_or_default(),
            count: self.count,
            result: self.result.as_ref().map(|v| v.primary().clone()),
            ingredients: self
                .ingredients
                .as_ref()
                .map(|v| v.primary().clone())
                .unwrap_or_default(),
            input: self.input.as_ref().map(|v| v.primary().clone()),
            fuel: self.fuel.as_ref().map(|v| v.primary().clone()),
            drop_chance: self.drop_chance,
            tool: self.tool.clone(),
            target_item: self.target_item.clone(),
        })
    }

    /// Terminal step for a leaf producer: craft/smelt with no sub-tree, or mine/hunt.
    ///
    /// A craft/smelt node that still carries children is not a leaf (its step only appears
    /// after its combinations), so this returns `None` for it.
    pub fn leaf_step(&self) -> Option<ActionStep> {
        match self.kind {
            ActionKind::Craft | ActionKind::Smelt if !self.children.is_empty() => None,
            _ => self.production_step(),
        }
    }

    /// One-time ingestion check so downstream components can assume well-formed steps.
    pub fn validate(&self) -> Result<(), TreeError> {
        non_empty(self.kind, "what", self.what.as_ref().map(Variants::len))?;
        non_empty(self.kind, "result", self.result.as_ref().map(Variants::len))?;
        non_empty(
            self.kind,
            "ingredients",
            self.ingredients.as_ref().map(Variants::len),
        )?;
        non_empty(self.kind, "input", self.input.as_ref().map(Variants::len))?;
        non_empty(self.kind, "fuel", self.fuel.as_ref().map(Variants::len))?;

        if let Some(value) = self.drop_chance {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TreeError::DropChanceOutOfRange { value });
            }
        }

        match self.kind {
            ActionKind::Craft => {
                if self.result.is_none() {
                    return Err(TreeError::MissingField {
                        kind: self.kind,
                        field: "result",
                    });
                }
                if self.ingredients.is_none() {
                    return Err(TreeError::MissingField {
                        kind: self.kind,
                        field: "ingredients",
                    });
                }
            }
            ActionKind::Smelt => {
                if self.input.is_none() {
                    return Err(TreeError::MissingField {
                        kind: self.kind,
                        field: "input",
                    });
                }
            }
            ActionKind::Mine | ActionKind::Hunt => {
                if self.what.is_none() {
                    return Err(TreeError::MissingField {
                        kind: self.kind,
                        field: "what",
                    });
                }
            }
            ActionKind::Root | ActionKind::Require => {}
        }

        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}

fn non_empty(kind: ActionKind, field: &'static str, len: Option<usize>) -> Result<(), TreeError> {
    match len {
        Some(0) => Err(TreeError::EmptyVariants { kind, field }),
        _ => Ok(()),
    }
}
