//! Externally observed, spatially bounded resource availability.
//!
//! A budget is aggregated from a world snapshot by an external producer; this module only
//! answers availability questions and tracks depletion as paths are chosen. Absence of a
//! budget (or of a pool) always reads as "unconstrained": no world knowledge must never
//! block planning.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which world pool a name is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceKind {
    Blocks,
    Entities,
}

/// Count reported when no budget or pool was supplied.
pub const UNBOUNDED: u64 = u64::MAX;

/// Per-kind pools of name → remaining count, with optional closest-distance metadata and
/// a global reach threshold.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldBudget {
    pools: BTreeMap<SourceKind, BTreeMap<String, u64>>,
    closest: BTreeMap<String, f64>,
    distance_threshold: Option<f64>,
}

impl WorldBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = Some(threshold);
        self
    }

    pub fn distance_threshold(&self) -> Option<f64> {
        self.distance_threshold
    }

    pub fn set_distance_threshold(&mut self, threshold: f64) {
        self.distance_threshold = Some(threshold);
    }

    /// Accumulate observed stock for a name.
    pub fn add_source(&mut self, kind: SourceKind, name: impl Into<String>, count: u64) {
        *self
            .pools
            .entry(kind)
            .or_default()
            .entry(name.into())
            .or_insert(0) += count;
    }

    /// Record the distance of an observed instance; the closest one wins.
    pub fn note_distance(&mut self, name: impl Into<String>, distance: f64) {
        let name = name.into();
        match self.closest.get_mut(&name) {
            Some(best) if *best <= distance => {}
            Some(best) => *best = distance,
            None => {
                self.closest.insert(name, distance);
            }
        }
    }

    pub fn available(&self, kind: SourceKind, name: &str) -> u64 {
        self.pools
            .get(&kind)
            .and_then(|pool| pool.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// Out-of-reach names are unavailable regardless of stock. Names with no distance
    /// metadata, and budgets with no threshold, are always in reach.
    fn within_reach(&self, name: &str) -> bool {
        match (self.closest.get(name), self.distance_threshold) {
            (Some(distance), Some(threshold)) => *distance <= threshold,
            _ => true,
        }
    }

    /// Can `amount` units of `name` be drawn from the world?
    pub fn can_consume(&self, kind: SourceKind, name: &str, amount: u64) -> bool {
        if amount == 0 {
            return true;
        }
        let Some(pool) = self.pools.get(&kind) else {
            // No knowledge of this pool: assume unconstrained.
            return true;
        };
        if !self.within_reach(name) {
            return false;
        }
        pool.get(name).copied().unwrap_or(0) >= amount
    }

    /// Deduct `amount` from the pool, floored at zero; no-op when inapplicable.
    pub fn consume(&mut self, kind: SourceKind, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        if let Some(stock) = self.pools.get_mut(&kind).and_then(|pool| pool.get_mut(name)) {
            *stock = stock.saturating_sub(amount);
        }
    }

    /// Total stock across a name set; [`UNBOUNDED`] when the pool is unknown.
    pub fn sum_available(&self, kind: SourceKind, names: &[&str]) -> u64 {
        let Some(pool) = self.pools.get(&kind) else {
            return UNBOUNDED;
        };
        names
            .iter()
            .map(|name| pool.get(*name).copied().unwrap_or(0))
            .fold(0u64, u64::saturating_add)
    }

    /// Greedily reserve up to `amount` units across acceptable source names, draining the
    /// most-stocked name first (stable tie-break by list order). Returns the amount
    /// actually reserved, which may fall short.
    pub fn reserve_from_sources(
        &mut self,
        kind: SourceKind,
        names: &[&str],
        amount: u64,
    ) -> u64 {
        let Some(pool) = self.pools.get_mut(&kind) else {
            return 0;
        };

        let mut ranked: Vec<(u64, usize)> = names
            .iter()
            .enumerate()
            .map(|(index, name)| (pool.get(*name).copied().unwrap_or(0), index))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let mut remaining = amount;
        let mut reserved = 0u64;
        for (stock, index) in ranked {
            if remaining == 0 || stock == 0 {
                break;
            }
            let taken = stock.min(remaining);
            if let Some(entry) = pool.get_mut(names[index]) {
                *entry -= taken;
            }
            remaining -= taken;
            reserved += taken;
        }
        tracing::trace!(requested = amount, reserved, "world reservation");
        reserved
    }
}

/// [`WorldBudget::can_consume`] with absent-budget semantics: no budget, no constraint.
pub fn can_consume_world(
    budget: Option<&WorldBudget>,
    kind: SourceKind,
    name: &str,
    amount: u64,
) -> bool {
    budget.map_or(true, |b| b.can_consume(kind, name, amount))
}

/// [`WorldBudget::consume`] tolerating an absent budget.
pub fn consume_world(budget: Option<&mut WorldBudget>, kind: SourceKind, name: &str, amount: u64) {
    if let Some(budget) = budget {
        budget.consume(kind, name, amount);
    }
}

/// [`WorldBudget::sum_available`] with absent-budget semantics ([`UNBOUNDED`]).
pub fn sum_available(
    budget: Option<&WorldBudget>,
    kind: SourceKind,
    names: &[&str],
) -> u64 {
    budget.map_or(UNBOUNDED, |b| b.sum_available(kind, names))
}
