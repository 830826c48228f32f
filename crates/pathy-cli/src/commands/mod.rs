//! Command handlers for the CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches here; each module owns one
//! subcommand.

pub mod draw;
pub mod los;
pub mod multiple;
pub mod single;

use std::path::Path;
use std::time::Instant;

use pathy_lib::{plan_path, Grid, Node, PathPlan, PathRequest};

/// Parse an `X,Y` vertex argument.
pub fn parse_node(value: &str) -> Result<Node, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let coordinate = |part: &str, axis: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid {axis}-coordinate '{}': {err}", part.trim()))
    };
    Ok(Node::new(coordinate(x, "x")?, coordinate(y, "y")?))
}

/// Parse a positive scenario count.
pub fn parse_count(value: &str) -> Result<usize, String> {
    let count = value
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid count '{value}': {err}"))?;
    if count == 0 {
        return Err("count must be at least 1".to_string());
    }
    Ok(count)
}

/// Timed result of running one request repeatedly.
#[derive(Debug, Clone)]
pub struct Benchmark {
    /// The plan produced by the last trial.
    pub plan: PathPlan,
    /// Mean wall time per trial in milliseconds.
    pub mean_runtime_ms: f64,
}

/// Plan `request` `trials` times (at least once) and average the runtime.
pub fn benchmark(grid: &Grid, request: &PathRequest, trials: u32) -> pathy_lib::Result<Benchmark> {
    let trials = trials.max(1);
    let (mut plan, mut total_ms) = timed_plan(grid, request)?;
    for _ in 1..trials {
        let (next, elapsed_ms) = timed_plan(grid, request)?;
        plan = next;
        total_ms += elapsed_ms;
    }

    let mean_runtime_ms = total_ms / f64::from(trials);
    tracing::debug!(
        algorithm = %request.algorithm,
        trials,
        mean_runtime_ms,
        "benchmark finished"
    );
    Ok(Benchmark {
        plan,
        mean_runtime_ms,
    })
}

fn timed_plan(grid: &Grid, request: &PathRequest) -> pathy_lib::Result<(PathPlan, f64)> {
    let started = Instant::now();
    let plan = plan_path(grid, request)?;
    Ok((plan, started.elapsed().as_secs_f64() * 1000.0))
}

/// File name used to label a map in reports.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
