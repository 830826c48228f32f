use serde::Serialize;

use crate::grid::Node;
use crate::metrics::PathMetrics;
use crate::routing::{PathAlgorithm, PathPlan};

/// Node visited along a planned path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PathStep {
    pub index: usize,
    pub x: i32,
    pub y: i32,
}

impl PathStep {
    pub fn node(&self) -> Node {
        Node::new(self.x, self.y)
    }
}

/// Structured representation of a planned path that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub algorithm: PathAlgorithm,
    pub start: Node,
    pub goal: Node,
    pub found: bool,
    pub hops: usize,
    pub expanded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PathMetrics>,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Convert a [`PathPlan`] into a summary with measured metrics.
    pub fn from_plan(plan: &PathPlan) -> Self {
        let steps = plan
            .path
            .iter()
            .flat_map(|path| path.nodes())
            .enumerate()
            .map(|(index, node)| PathStep {
                index,
                x: node.x,
                y: node.y,
            })
            .collect();

        Self {
            algorithm: plan.algorithm,
            start: plan.start,
            goal: plan.goal,
            found: plan.is_found(),
            hops: plan.hop_count(),
            expanded: plan.expanded,
            metrics: plan.path.as_ref().map(PathMetrics::measure),
            steps,
        }
    }

    /// One-line statistics in the benchmark's traditional format.
    pub fn stats_line(&self) -> String {
        match &self.metrics {
            Some(metrics) => format!(
                "{} turn(s), length {:.1}, avg angle {:.1} rad ({:.1} deg)",
                metrics.turns,
                metrics.length,
                metrics.average_turn_angle,
                metrics.degrees()
            ),
            None => "no path".to_string(),
        }
    }
}
