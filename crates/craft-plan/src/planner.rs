//! The wiring layer: streams + simulator + optimizers + world budget.
//!
//! A `Planner` owns one planning request end to end: compile the tree once, pull
//! candidates cheapest-first, prune the ones the observed world cannot supply, and
//! deplete the budget as choices are committed.

use std::collections::BTreeMap;
use std::rc::Rc;

use craft_core::{count_action_paths, tree_max_depth, ActionKind, ActionNode, ActionPath};
use craft_opt::{dedup_persistent, hoist_mining, is_persistent_name, step_weight};
use craft_sim::{simulate, FuelError, SimOptions, SourceKind, Supply, WorldBudget};

use crate::compile::compile;
use crate::stream::{PathStream, RankedPath, StreamHooks};

/// Caller-supplied knobs for one planning request. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Gate `table` crafts and smelts on station presence during validation.
    pub require_stations: bool,
    /// Reach limit applied to the world budget when one is supplied.
    pub distance_threshold: Option<f64>,
    /// Pass-through context for the external tree builder.
    pub prefer_minimal_tools: bool,
    /// Pass-through context for the external tree builder.
    pub max_depth: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            require_stations: true,
            distance_threshold: None,
            prefer_minimal_tools: false,
            max_depth: 16,
        }
    }
}

type FuelYield = Rc<dyn Fn(&str) -> Result<u32, FuelError>>;

pub struct Planner<'t> {
    tree: &'t ActionNode,
    supply: Supply,
    fuel_yield: Option<FuelYield>,
    world: Option<WorldBudget>,
    config: PlannerConfig,
    stream: Option<PathStream>,
}

impl<'t> Planner<'t> {
    pub fn new(tree: &'t ActionNode) -> Self {
        Self {
            tree,
            supply: Supply::new(),
            fuel_yield: None,
            world: None,
            config: PlannerConfig::default(),
            stream: None,
        }
    }

    /// Inventory already held when the plan starts executing.
    pub fn with_supply(mut self, supply: Supply) -> Self {
        self.supply = supply;
        self
    }

    pub fn with_fuel_yield(
        mut self,
        fuel_yield: impl Fn(&str) -> Result<u32, FuelError> + 'static,
    ) -> Self {
        self.fuel_yield = Some(Rc::new(fuel_yield));
        self
    }

    pub fn with_world_budget(mut self, world: WorldBudget) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn world_budget(&self) -> Option<&WorldBudget> {
        self.world.as_ref()
    }

    /// Next valid, world-feasible candidate, cheapest first. `None` once the tree is
    /// exhausted — the normal terminal state, never an error.
    ///
    /// Combinations are validated inside the stream engine; the check is repeated here so
    /// single-step candidates that never passed through an AND node are held to the same
    /// constraint.
    pub fn next_path(&mut self) -> Option<RankedPath> {
        self.ensure_stream();
        loop {
            let candidate = self.stream.as_mut()?.next()?;
            if !self.validate(&candidate.path) {
                tracing::debug!(score = candidate.score, "candidate rejected by simulator");
                continue;
            }
            if !world_feasible(self.world.as_ref(), &candidate.path) {
                tracing::debug!(score = candidate.score, "candidate pruned by world budget");
                continue;
            }
            return Some(candidate);
        }
    }

    fn validate(&self, path: &ActionPath) -> bool {
        simulate(
            path,
            &SimOptions {
                initial_supply: &self.supply,
                fuel_yield: self.fuel_yield.as_deref(),
                require_stations: self.config.require_stations,
            },
        )
    }

    /// Deplete the world budget to reflect a chosen path.
    ///
    /// Call between fully committed selections only, never while another path is being
    /// generated from the same budget.
    pub fn commit(&mut self, path: &ActionPath) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        for step in path.iter() {
            let Some(kind) = source_kind(step.action) else {
                continue;
            };
            let needed = u64::from(step.count);
            let reserved = world.reserve_from_sources(kind, &[step.what.as_str()], needed);
            if reserved < needed {
                tracing::debug!(
                    what = %step.what,
                    needed,
                    reserved,
                    "world reservation fell short"
                );
            }
        }
    }

    fn ensure_stream(&mut self) {
        if self.stream.is_some() {
            return;
        }
        if let (Some(threshold), Some(world)) =
            (self.config.distance_threshold, self.world.as_mut())
        {
            world.set_distance_threshold(threshold);
        }
        let depth = tree_max_depth(Some(self.tree));
        let upper_bound = count_action_paths(Some(self.tree));
        tracing::debug!(depth, upper_bound, "compiling plan stream");
        let hooks = Rc::new(self.build_hooks());
        self.stream = Some(compile(self.tree, &hooks));
    }

    fn build_hooks(&self) -> StreamHooks {
        let supply = self.supply.clone();
        let fuel_yield = self.fuel_yield.clone();
        let require_stations = self.config.require_stations;
        StreamHooks {
            score_step: Box::new(step_weight),
            sanitize: Box::new(|path| dedup_persistent(&hoist_mining(path), is_persistent_name)),
            is_valid: Box::new(move |path| {
                simulate(
                    path,
                    &SimOptions {
                        initial_supply: &supply,
                        fuel_yield: fuel_yield.as_deref(),
                        require_stations,
                    },
                )
            }),
            finalize: Box::new(|path| path),
        }
    }
}

fn source_kind(action: ActionKind) -> Option<SourceKind> {
    match action {
        ActionKind::Mine => Some(SourceKind::Blocks),
        ActionKind::Hunt => Some(SourceKind::Entities),
        _ => None,
    }
}

/// Aggregate each path's raw-material demand per `(pool, name)` and check it against the
/// budget, distance gate included.
fn world_feasible(budget: Option<&WorldBudget>, path: &ActionPath) -> bool {
    let Some(budget) = budget else {
        return true;
    };
    let mut demand: BTreeMap<(SourceKind, &str), u64> = BTreeMap::new();
    for step in path.iter() {
        let Some(kind) = source_kind(step.action) else {
            continue;
        };
        *demand.entry((kind, step.what.as_str())).or_insert(0) += u64::from(step.count);
    }
    demand
        .iter()
        .all(|((kind, name), amount)| budget.can_consume(*kind, name, *amount))
}
