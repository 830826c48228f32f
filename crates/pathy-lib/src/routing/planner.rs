//! Path planning strategies implementing the Strategy pattern.
//!
//! Every planner is a thin pairing of a heuristic with an edge relaxation
//! rule, optionally followed by post-smoothing. `plan_path` only ever talks
//! to the [`PathPlanner`] trait.

use crate::grid::{Grid, Node};
use crate::path::{find_path, SearchOutcome, SearchStrategy};
use crate::smoothing::smooth_path;

use super::PathAlgorithm;

/// Trait for path planning strategies.
///
/// Implementations must be stateless between calls: each call builds its own
/// search state, so one planner may serve concurrent searches.
pub trait PathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> PathAlgorithm;

    /// Search `grid` from `start` to `goal`. Both must be grid vertices.
    fn find_path(&self, grid: &Grid, start: Node, goal: Node) -> SearchOutcome;
}

/// Dijkstra: plain relaxation, zero heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostPlanner;

impl PathPlanner for UniformCostPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::UniformCost
    }

    fn find_path(&self, grid: &Grid, start: Node, goal: Node) -> SearchOutcome {
        find_path(grid, start, goal, SearchStrategy::UNIFORM_COST)
    }
}

/// A*: plain relaxation guided by the octile distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPlanner;

impl PathPlanner for HeuristicPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Heuristic
    }

    fn find_path(&self, grid: &Grid, start: Node, goal: Node) -> SearchOutcome {
        find_path(grid, start, goal, SearchStrategy::OCTILE)
    }
}

/// Theta*: any-angle relaxation guided by the straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAnglePlanner;

impl PathPlanner for AnyAnglePlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::AnyAngle
    }

    fn find_path(&self, grid: &Grid, start: Node, goal: Node) -> SearchOutcome {
        find_path(grid, start, goal, SearchStrategy::ANY_ANGLE)
    }
}

/// A* followed by greedy line-of-sight smoothing of its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothedHeuristicPlanner;

impl PathPlanner for SmoothedHeuristicPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::SmoothedHeuristic
    }

    fn find_path(&self, grid: &Grid, start: Node, goal: Node) -> SearchOutcome {
        let outcome = HeuristicPlanner.find_path(grid, start, goal);
        SearchOutcome {
            path: outcome.path.map(|path| smooth_path(grid, &path)),
            expanded: outcome.expanded,
        }
    }
}

/// Select the planner for `algorithm`.
pub fn select_planner(algorithm: PathAlgorithm) -> Box<dyn PathPlanner> {
    match algorithm {
        PathAlgorithm::UniformCost => Box::new(UniformCostPlanner),
        PathAlgorithm::Heuristic => Box::new(HeuristicPlanner),
        PathAlgorithm::AnyAngle => Box::new(AnyAnglePlanner),
        PathAlgorithm::SmoothedHeuristic => Box::new(SmoothedHeuristicPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in PathAlgorithm::ALL {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }

    #[test]
    fn smoothed_planner_keeps_search_statistics() {
        let grid = Grid::new(5, 5);
        let (start, goal) = (Node::new(0, 0), Node::new(5, 2));
        let raw = HeuristicPlanner.find_path(&grid, start, goal);
        let smoothed = SmoothedHeuristicPlanner.find_path(&grid, start, goal);
        assert_eq!(raw.expanded, smoothed.expanded);
        assert_eq!(smoothed.path.unwrap().nodes(), &[start, goal]);
        assert!(raw.path.unwrap().len() > 2);
    }

    #[test]
    fn unreachable_goal_stays_unreachable_after_smoothing() {
        let grid = Grid::with_blocked(3, 1, [(1, 0)]);
        let outcome = SmoothedHeuristicPlanner.find_path(&grid, Node::new(0, 0), Node::new(3, 1));
        assert!(outcome.path.is_none());
    }
}
