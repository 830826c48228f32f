//! Path planning over occupancy grids.
//!
//! This module provides:
//! - [`PathAlgorithm`] - The four supported searches
//! - [`PathRequest`] - A start/goal pair plus the algorithm to run
//! - [`PathPlan`] - The planned path and search statistics
//! - [`plan_path`] - Main entry point for computing paths
//! - One convenience function per algorithm ([`uniform_cost_search`],
//!   [`heuristic_search`], [`any_angle_search`], [`smoothed_heuristic_search`])
//!
//! # Strategy Pattern
//!
//! Each algorithm is a [`PathPlanner`] implementation wrapping a
//! [`SearchStrategy`](crate::path::SearchStrategy); [`select_planner`] maps the
//! closed [`PathAlgorithm`] enum to its planner.
//!
//! # Example
//!
//! ```ignore
//! use pathy_lib::{load_map, plan_path, Node, PathAlgorithm, PathRequest};
//!
//! let grid = load_map("arena.map".as_ref())?;
//! let request = PathRequest::new(Node::new(1, 11), Node::new(1, 12), PathAlgorithm::AnyAngle);
//! let plan = plan_path(&grid, &request)?;
//! println!("{} hops, length {:.2}", plan.hop_count(), plan.length().unwrap_or_default());
//! ```

mod planner;

pub use planner::{
    select_planner, AnyAnglePlanner, HeuristicPlanner, PathPlanner, SmoothedHeuristicPlanner,
    UniformCostPlanner,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Grid, Node};
use crate::path::Path;

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PathAlgorithm {
    /// Dijkstra: octile moves, no heuristic.
    #[serde(rename = "dijkstra")]
    UniformCost,
    /// A*: octile moves guided by the octile distance.
    #[serde(rename = "astar")]
    Heuristic,
    /// Theta*: any-angle segments guided by the straight-line distance.
    #[default]
    #[serde(rename = "thetastar")]
    AnyAngle,
    /// A* followed by greedy line-of-sight post-smoothing.
    #[serde(rename = "astar-ps")]
    SmoothedHeuristic,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::UniformCost,
        PathAlgorithm::Heuristic,
        PathAlgorithm::AnyAngle,
        PathAlgorithm::SmoothedHeuristic,
    ];

    /// Canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            PathAlgorithm::UniformCost => "dijkstra",
            PathAlgorithm::Heuristic => "astar",
            PathAlgorithm::AnyAngle => "thetastar",
            PathAlgorithm::SmoothedHeuristic => "astar-ps",
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PathAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "uniform-cost" => Ok(PathAlgorithm::UniformCost),
            "astar" | "a-star" | "a*" => Ok(PathAlgorithm::Heuristic),
            "thetastar" | "theta-star" | "theta*" => Ok(PathAlgorithm::AnyAngle),
            "astar-ps" | "a-star-ps" => Ok(PathAlgorithm::SmoothedHeuristic),
            _ => Err(Error::UnknownAlgorithm {
                name: value.to_string(),
            }),
        }
    }
}

/// High-level path planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRequest {
    pub start: Node,
    pub goal: Node,
    pub algorithm: PathAlgorithm,
}

impl PathRequest {
    pub fn new(start: Node, goal: Node, algorithm: PathAlgorithm) -> Self {
        Self {
            start,
            goal,
            algorithm,
        }
    }
}

/// Planned path returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPlan {
    pub algorithm: PathAlgorithm,
    pub start: Node,
    pub goal: Node,
    /// `None` when the goal is unreachable.
    pub path: Option<Path>,
    /// Nodes expanded by the underlying search.
    pub expanded: usize,
}

impl PathPlan {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Euclidean length of the path, if one was found.
    pub fn length(&self) -> Option<f64> {
        self.path.as_ref().map(Path::length)
    }

    /// Number of segments in the path.
    pub fn hop_count(&self) -> usize {
        self.path
            .as_ref()
            .map_or(0, |path| path.len().saturating_sub(1))
    }
}

/// Plan a path for `request` over `grid`.
///
/// Fails only when the start or goal is not a vertex of `grid`. An
/// unreachable goal is reported through [`PathPlan::path`] being `None`.
pub fn plan_path(grid: &Grid, request: &PathRequest) -> Result<PathPlan> {
    ensure_vertex(grid, request.start)?;
    ensure_vertex(grid, request.goal)?;

    let planner = select_planner(request.algorithm);
    let outcome = planner.find_path(grid, request.start, request.goal);
    if outcome.path.is_none() {
        tracing::info!(
            algorithm = %request.algorithm,
            start = %request.start,
            goal = %request.goal,
            "no path between start and goal"
        );
    }

    Ok(PathPlan {
        algorithm: request.algorithm,
        start: request.start,
        goal: request.goal,
        path: outcome.path,
        expanded: outcome.expanded,
    })
}

/// Dijkstra search with unit cardinal and √2 diagonal steps.
pub fn uniform_cost_search(grid: &Grid, start: Node, goal: Node) -> Result<Option<Path>> {
    run(grid, start, goal, PathAlgorithm::UniformCost)
}

/// A* search with the octile heuristic.
pub fn heuristic_search(grid: &Grid, start: Node, goal: Node) -> Result<Option<Path>> {
    run(grid, start, goal, PathAlgorithm::Heuristic)
}

/// Theta* search producing any-angle paths.
pub fn any_angle_search(grid: &Grid, start: Node, goal: Node) -> Result<Option<Path>> {
    run(grid, start, goal, PathAlgorithm::AnyAngle)
}

/// A* search followed by post-smoothing.
pub fn smoothed_heuristic_search(grid: &Grid, start: Node, goal: Node) -> Result<Option<Path>> {
    run(grid, start, goal, PathAlgorithm::SmoothedHeuristic)
}

fn run(grid: &Grid, start: Node, goal: Node, algorithm: PathAlgorithm) -> Result<Option<Path>> {
    plan_path(grid, &PathRequest::new(start, goal, algorithm)).map(|plan| plan.path)
}

fn ensure_vertex(grid: &Grid, node: Node) -> Result<()> {
    if grid.contains_vertex(node) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            node,
            width: grid.width(),
            height: grid.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip_through_display() {
        for algorithm in PathAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<PathAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn algorithm_parsing_accepts_aliases_and_case() {
        assert_eq!("A-Star".parse::<PathAlgorithm>().unwrap(), PathAlgorithm::Heuristic);
        assert_eq!("Theta-Star".parse::<PathAlgorithm>().unwrap(), PathAlgorithm::AnyAngle);
        assert_eq!(" DIJKSTRA ".parse::<PathAlgorithm>().unwrap(), PathAlgorithm::UniformCost);
        let err = "bfs".parse::<PathAlgorithm>().unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm { ref name } if name == "bfs"));
    }

    #[test]
    fn algorithm_serializes_with_cli_names() {
        assert_eq!(
            serde_json::to_string(&PathAlgorithm::SmoothedHeuristic).unwrap(),
            "\"astar-ps\""
        );
        let parsed: PathAlgorithm = serde_json::from_str("\"dijkstra\"").unwrap();
        assert_eq!(parsed, PathAlgorithm::UniformCost);
    }

    #[test]
    fn plan_rejects_out_of_bounds_endpoints() {
        let grid = Grid::new(3, 3);
        let request = PathRequest::new(Node::new(0, 0), Node::new(4, 1), PathAlgorithm::Heuristic);
        let err = plan_path(&grid, &request).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                node: Node { x: 4, y: 1 },
                width: 3,
                height: 3
            }
        ));
        assert!(uniform_cost_search(&grid, Node::new(-1, 0), Node::new(1, 1)).is_err());
    }

    #[test]
    fn far_boundary_vertices_are_reachable() {
        let grid = Grid::new(3, 3);
        let path = heuristic_search(&grid, Node::new(0, 0), Node::new(3, 3))
            .unwrap()
            .unwrap();
        assert_eq!(path.last(), Some(Node::new(3, 3)));
    }

    #[test]
    fn path_plan_hop_count() {
        let plan = PathPlan {
            algorithm: PathAlgorithm::Heuristic,
            start: Node::new(0, 0),
            goal: Node::new(2, 0),
            path: Some(Path::new(vec![Node::new(0, 0), Node::new(1, 0), Node::new(2, 0)])),
            expanded: 2,
        };
        assert!(plan.is_found());
        assert_eq!(plan.hop_count(), 2);
        assert_eq!(plan.length(), Some(2.0));
    }

    #[test]
    fn path_plan_without_path() {
        let plan = PathPlan {
            algorithm: PathAlgorithm::AnyAngle,
            start: Node::new(0, 0),
            goal: Node::new(1, 1),
            path: None,
            expanded: 7,
        };
        assert!(!plan.is_found());
        assert_eq!(plan.hop_count(), 0);
        assert_eq!(plan.length(), None);
    }
}
