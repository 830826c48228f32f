//! Pathy library entry points.
//!
//! This crate finds paths between grid-corner vertices of a boolean occupancy
//! grid with four searches: Dijkstra, A*, Theta* and post-smoothed A*. It also
//! reads MovingAI benchmark maps and scenarios and measures the resulting
//! paths. Higher-level consumers (the CLI, benchmarks) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!
//! Every search call owns its own state; a [`Grid`] is immutable and may be
//! shared between threads.

#![deny(warnings)]

pub mod distance;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod movingai;
pub mod neighbours;
pub mod output;
pub mod path;
pub mod routing;
pub mod smoothing;
pub mod visibility;

pub use distance::{octile_distance, straight_line_distance, Heuristic};
pub use error::{Error, Result};
pub use grid::{Grid, Node};
pub use metrics::PathMetrics;
pub use movingai::{load_map, load_scenarios, parse_map, parse_scenarios, select_evenly, Scenario};
pub use neighbours::traversable_neighbours;
pub use output::{PathStep, PathSummary};
pub use path::{find_path, Path, SearchOutcome, SearchStrategy};
pub use routing::{
    any_angle_search, heuristic_search, plan_path, select_planner, smoothed_heuristic_search,
    uniform_cost_search, PathAlgorithm, PathPlan, PathPlanner, PathRequest,
};
pub use smoothing::smooth_path;
pub use visibility::has_line_of_sight;
