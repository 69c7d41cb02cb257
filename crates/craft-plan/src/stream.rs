//! The priority stream combinators.
//!
//! Both combinators are single-pass, pull-based lazy sequences: all intermediate state
//! (read-ahead buffers, the frontier, the visited set) lives inside the combinator and is
//! touched only when the consumer asks for the next item. Dropping a stream abandons it;
//! no cleanup is needed because no external resources are held.

use core::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};
use std::rc::Rc;

use craft_core::{ActionPath, ActionStep};

/// One stream item: a candidate path and the score it was ordered by (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPath {
    pub score: u64,
    pub path: ActionPath,
}

/// A finite, single-pass sequence of candidate paths in non-decreasing score order.
pub type PathStream = Box<dyn Iterator<Item = RankedPath>>;

/// Caller-supplied hooks shared by every combinator in one compiled tree.
///
/// Hooks are plain closures; anything they panic with propagates to the consumer — the
/// engine never swallows a callback failure.
pub struct StreamHooks {
    /// Score of a single step; used for leaf streams and AND parent steps.
    pub score_step: Box<dyn Fn(&ActionStep) -> u64>,
    /// Rewrite applied to each AND combination before validation.
    pub sanitize: Box<dyn Fn(&ActionPath) -> ActionPath>,
    /// Feasibility check applied to each AND combination.
    pub is_valid: Box<dyn Fn(&ActionPath) -> bool>,
    /// Final rewrite applied to a combination that passed validation.
    pub finalize: Box<dyn Fn(ActionPath) -> ActionPath>,
}

impl Default for StreamHooks {
    fn default() -> Self {
        Self {
            score_step: Box::new(craft_opt::step_weight),
            sanitize: Box::new(ActionPath::clone),
            is_valid: Box::new(|_| true),
            finalize: Box::new(|path| path),
        }
    }
}

/// The empty stream: how structural infeasibility propagates (never an error).
pub fn empty_stream() -> PathStream {
    Box::new(std::iter::empty())
}

/// A stream of exactly one single-step path.
pub fn singleton_stream(step: ActionStep, hooks: &StreamHooks) -> PathStream {
    let score = (hooks.score_step)(&step);
    Box::new(std::iter::once(RankedPath {
        score,
        path: ActionPath::new(vec![step]),
    }))
}

struct OrEntry {
    score: u64,
    child: usize,
    item: RankedPath,
}

impl PartialEq for OrEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.child == other.child
    }
}

impl Eq for OrEntry {}

impl Ord for OrEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; each child holds at
        // most one slot, so (score, child) is a total deterministic key.
        (other.score, other.child).cmp(&(self.score, self.child))
    }
}

impl PartialOrd for OrEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// K-way merge of alternative branches: repeatedly yield the globally cheapest next item
/// across all children, then refill that child's slot. O(log N) per yield.
pub struct OrMerge {
    children: Vec<PathStream>,
    frontier: BinaryHeap<OrEntry>,
}

impl OrMerge {
    pub fn new(children: Vec<PathStream>) -> Self {
        let mut children = children;
        let mut frontier = BinaryHeap::with_capacity(children.len());
        for (index, child) in children.iter_mut().enumerate() {
            if let Some(item) = child.next() {
                frontier.push(OrEntry {
                    score: item.score,
                    child: index,
                    item,
                });
            }
        }
        Self { children, frontier }
    }
}

impl Iterator for OrMerge {
    type Item = RankedPath;

    fn next(&mut self) -> Option<RankedPath> {
        let entry = self.frontier.pop()?;
        if let Some(item) = self.children[entry.child].next() {
            self.frontier.push(OrEntry {
                score: item.score,
                child: entry.child,
                item,
            });
        }
        Some(entry.item)
    }
}

struct BufferedChild {
    stream: PathStream,
    buffer: Vec<RankedPath>,
    exhausted: bool,
}

impl BufferedChild {
    fn new(stream: PathStream) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            exhausted: false,
        }
    }

    /// Pull until `buffer[index]` exists; false once the child runs dry first.
    fn realize(&mut self, index: usize) -> bool {
        while self.buffer.len() <= index && !self.exhausted {
            match self.stream.next() {
                Some(item) => self.buffer.push(item),
                None => self.exhausted = true,
            }
        }
        index < self.buffer.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComboEntry {
    score: u64,
    indices: Vec<usize>,
}

impl Ord for ComboEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; the index tuple
        // breaks score ties deterministically.
        (other.score, &other.indices).cmp(&(self.score, &self.indices))
    }
}

impl PartialOrd for ComboEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Frontier search over the Cartesian product of child streams, cheapest combination
/// first, without reading any child's full output in advance.
///
/// A combination is a tuple of per-child buffer indices; its score is the sum of the
/// selected items' scores plus the optional parent step's score. Expanding a popped
/// tuple increments exactly one index (realizing that position on demand); a visited set
/// keyed by the tuple keeps each combination queued at most once. Because every child
/// yields in non-decreasing order, neighbors never score below their parent, so pops are
/// non-decreasing too.
pub struct AndCombine {
    children: Vec<BufferedChild>,
    frontier: BinaryHeap<ComboEntry>,
    visited: BTreeSet<Vec<usize>>,
    parent_step: Option<ActionStep>,
    parent_score: u64,
    hooks: Rc<StreamHooks>,
}

impl AndCombine {
    pub fn new(
        children: Vec<PathStream>,
        parent_step: Option<ActionStep>,
        hooks: Rc<StreamHooks>,
    ) -> Self {
        let parent_score = parent_step
            .as_ref()
            .map(|step| (hooks.score_step)(step))
            .unwrap_or(0);
        let mut children: Vec<BufferedChild> =
            children.into_iter().map(BufferedChild::new).collect();
        let mut frontier = BinaryHeap::new();
        let mut visited = BTreeSet::new();

        // Seed with the all-zero tuple; any empty child means no combination exists.
        if children.iter_mut().all(|child| child.realize(0)) {
            let origin = vec![0usize; children.len()];
            let score = combo_score(&children, &origin, parent_score);
            visited.insert(origin.clone());
            frontier.push(ComboEntry {
                score,
                indices: origin,
            });
        }

        Self {
            children,
            frontier,
            visited,
            parent_step,
            parent_score,
            hooks,
        }
    }

    fn expand(&mut self, indices: &[usize]) {
        for dim in 0..self.children.len() {
            let mut neighbor = indices.to_vec();
            neighbor[dim] += 1;
            if self.visited.contains(&neighbor) {
                continue;
            }
            if !self.children[dim].realize(neighbor[dim]) {
                continue;
            }
            let score = combo_score(&self.children, &neighbor, self.parent_score);
            self.visited.insert(neighbor.clone());
            self.frontier.push(ComboEntry {
                score,
                indices: neighbor,
            });
        }
    }

    fn assemble(&self, indices: &[usize]) -> ActionPath {
        let mut steps = Vec::new();
        for (dim, index) in indices.iter().enumerate() {
            steps.extend(self.children[dim].buffer[*index].path.steps.iter().cloned());
        }
        if let Some(step) = &self.parent_step {
            steps.push(step.clone());
        }
        ActionPath::new(steps)
    }
}

impl Iterator for AndCombine {
    type Item = RankedPath;

    fn next(&mut self) -> Option<RankedPath> {
        while let Some(entry) = self.frontier.pop() {
            // Neighbors are expanded even when this combination ends up rejected, so the
            // grid walk keeps moving.
            self.expand(&entry.indices);

            let raw = self.assemble(&entry.indices);
            let sanitized = (self.hooks.sanitize)(&raw);
            let path = if (self.hooks.is_valid)(&sanitized) {
                Some(sanitized)
            } else if (self.hooks.is_valid)(&raw) {
                // Sanitization itself made the path invalid; yield the raw concatenation.
                Some(raw)
            } else {
                None
            };

            match path {
                Some(path) => {
                    return Some(RankedPath {
                        score: entry.score,
                        path: (self.hooks.finalize)(path),
                    });
                }
                // Both variants failed validation: skip silently.
                None => continue,
            }
        }
        None
    }
}

fn combo_score(children: &[BufferedChild], indices: &[usize], parent_score: u64) -> u64 {
    indices
        .iter()
        .enumerate()
        .fold(parent_score, |acc, (dim, index)| {
            acc.saturating_add(children[dim].buffer[*index].score)
        })
}
