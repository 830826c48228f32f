use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::distance::{edge_cost, straight_line_distance, Heuristic};
use crate::grid::{Grid, Node};
use crate::neighbours::collect_traversable_neighbours;
use crate::visibility::has_line_of_sight;

/// An ordered sequence of lattice points from start to goal.
///
/// Consecutive nodes are either lattice neighbours (grid-constrained
/// searches) or mutually visible points (any-angle and smoothed searches).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Node>);

impl Path {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Node> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Node> {
        self.0.last().copied()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Sum of the Euclidean lengths of all segments.
    pub fn length(&self) -> f64 {
        self.segments()
            .map(|(a, b)| straight_line_distance(a, b))
            .sum()
    }
}

impl From<Vec<Node>> for Path {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

/// How a neighbour's tentative cost is derived from the node being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// Cost through the expanded node; expanded nodes are closed for good.
    Plain,
    /// Theta*-style: when the expanded node's parent sees the neighbour, the
    /// neighbour hangs directly off that parent. Nothing is ever closed.
    AnyAngle,
}

/// A (heuristic, relaxation) pair driving [`find_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStrategy {
    pub heuristic: Heuristic,
    pub relaxation: Relaxation,
}

impl SearchStrategy {
    pub const UNIFORM_COST: Self = Self {
        heuristic: Heuristic::Zero,
        relaxation: Relaxation::Plain,
    };
    pub const OCTILE: Self = Self {
        heuristic: Heuristic::Octile,
        relaxation: Relaxation::Plain,
    };
    pub const ANY_ANGLE: Self = Self {
        heuristic: Heuristic::StraightLine,
        relaxation: Relaxation::AnyAngle,
    };
}

/// Result of a single search: the path, if the goal was reached, and the
/// number of node expansions performed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub expanded: usize,
}

/// Per-call bookkeeping for [`find_path`]. Never shared between searches.
#[derive(Debug, Default)]
pub struct SearchState {
    g: HashMap<Node, f64>,
    parent: HashMap<Node, Node>,
    /// Node -> sequence number of its live frontier entry.
    open: HashMap<Node, u64>,
    closed: HashSet<Node>,
    frontier: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    expanded: usize,
}

impl SearchState {
    fn new(start: Node, start_estimate: f64) -> Self {
        let mut state = Self::default();
        state.g.insert(start, 0.0);
        state.parent.insert(start, start);
        state.push(start, 0.0, start_estimate);
        state
    }

    /// Best known cost from the start; `+inf` if `node` was never reached.
    pub fn g_score(&self, node: Node) -> f64 {
        self.g.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn parent_of(&self, node: Node) -> Option<Node> {
        self.parent.get(&node).copied()
    }

    fn push(&mut self, node: Node, cost: f64, heuristic: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        // Any older entry for `node` goes stale.
        self.open.insert(node, seq);
        self.frontier.push(FrontierEntry::new(node, cost, heuristic, seq));
    }

    fn pop(&mut self) -> Option<Node> {
        while let Some(entry) = self.frontier.pop() {
            if self.open.get(&entry.node) == Some(&entry.seq) {
                self.open.remove(&entry.node);
                return Some(entry.node);
            }
            trace!(node = %entry.node, "skipping stale frontier entry");
        }
        None
    }

    fn relax(&mut self, node: Node, parent: Node, cost: f64, heuristic: f64) -> bool {
        if cost < self.g_score(node) {
            self.g.insert(node, cost);
            self.parent.insert(node, parent);
            self.push(node, cost, heuristic);
            true
        } else {
            false
        }
    }
}

/// Best-first search from `start` to `goal` over the lattice of `grid`.
///
/// Both endpoints must be vertices of `grid`; callers validate this. An
/// unreachable goal yields `path: None`.
pub fn find_path(grid: &Grid, start: Node, goal: Node, strategy: SearchStrategy) -> SearchOutcome {
    debug!(%start, %goal, ?strategy, "starting search");

    let heuristic = strategy.heuristic;
    let mut state = SearchState::new(start, heuristic.estimate(start, goal));
    let mut neighbours = Vec::with_capacity(8);

    while let Some(current) = state.pop() {
        if current == goal {
            let path = reconstruct_path(&state.parent, start, goal);
            debug!(
                expanded = state.expanded,
                cost = state.g_score(goal),
                nodes = path.len(),
                "search reached goal"
            );
            return SearchOutcome {
                path: Some(path),
                expanded: state.expanded,
            };
        }

        state.expanded += 1;
        if strategy.relaxation == Relaxation::Plain {
            state.closed.insert(current);
        }
        let current_cost = state.g_score(current);

        collect_traversable_neighbours(grid, current, &mut neighbours);
        for &next in &neighbours {
            let (parent, cost) = match strategy.relaxation {
                Relaxation::Plain => {
                    if state.closed.contains(&next) {
                        continue;
                    }
                    (current, current_cost + edge_cost(current, next))
                }
                Relaxation::AnyAngle => {
                    let grandparent = state.parent[&current];
                    if has_line_of_sight(grid, grandparent, next) {
                        // Never costlier than going through `current`: g[current]
                        // already includes the straight leg from `grandparent`.
                        let direct =
                            state.g_score(grandparent) + straight_line_distance(grandparent, next);
                        (grandparent, direct)
                    } else {
                        (current, current_cost + edge_cost(current, next))
                    }
                }
            };
            state.relax(next, parent, cost, heuristic.estimate(next, goal));
        }
    }

    debug!(expanded = state.expanded, "frontier exhausted without reaching goal");
    SearchOutcome {
        path: None,
        expanded: state.expanded,
    }
}

/// Walk `parents` back from `goal` to `start`.
///
/// # Panics
///
/// Panics when a node on the chain has no parent, when the chain loops, or
/// when the result does not run from `start` to `goal`. Each of these means
/// the search state is corrupt.
pub fn reconstruct_path(parents: &HashMap<Node, Node>, start: Node, goal: Node) -> Path {
    let mut nodes = vec![goal];
    let mut current = goal;
    while current != start {
        current = match parents.get(&current) {
            Some(&parent) if parent != current => parent,
            Some(_) => panic!("parent chain loops at {current} before reaching start {start}"),
            None => panic!("broken parent chain: {current} has no parent"),
        };
        nodes.push(current);
        if nodes.len() > parents.len() + 1 {
            panic!("parent chain from {goal} never reaches start {start}");
        }
    }
    nodes.reverse();

    assert_eq!(nodes.first(), Some(&start), "first path node was not start");
    assert_eq!(nodes.last(), Some(&goal), "last path node was not goal");
    Path(nodes)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: Node,
    cost: FloatOrd,
    estimate: FloatOrd,
    seq: u64,
}

impl FrontierEntry {
    fn new(node: Node, cost: f64, heuristic: f64, seq: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            seq,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: lowest f first, then deepest g, then newest entry.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
