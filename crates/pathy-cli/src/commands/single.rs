//! `single` command: benchmark one start/goal pair on a map.

use std::path::PathBuf;

use anyhow::{Context, Result};

use pathy_lib::{load_map, Node, PathAlgorithm, PathRequest, PathSummary};

use crate::commands::{benchmark, display_name};
use crate::output::SingleReport;
use crate::render::write_path_image;

/// Arguments for the single command.
#[derive(Debug, Clone)]
pub struct SingleArgs {
    /// MovingAI map file.
    pub map: PathBuf,
    pub from: Node,
    pub to: Node,
    pub algorithm: PathAlgorithm,
    /// Number of timed runs to average.
    pub trials: u32,
    /// Where to write the rendered path, if anywhere.
    pub image: Option<PathBuf>,
    /// Pixels per cell in the rendered image.
    pub scale: u32,
}

impl SingleArgs {
    pub fn to_request(&self) -> PathRequest {
        PathRequest::new(self.from, self.to, self.algorithm)
    }
}

/// Load the map, run the timed trials and build the report.
pub fn handle_single(args: &SingleArgs) -> Result<SingleReport> {
    let grid = load_map(&args.map)
        .with_context(|| format!("failed to load map from {}", args.map.display()))?;
    tracing::debug!(
        map = %args.map.display(),
        width = grid.width(),
        height = grid.height(),
        "map loaded"
    );

    let result = benchmark(&grid, &args.to_request(), args.trials)
        .with_context(|| format!("failed to plan a path from {} to {}", args.from, args.to))?;

    let image = match &args.image {
        Some(out) => {
            write_path_image(&grid, result.plan.path.as_ref(), args.scale, out)
                .with_context(|| format!("failed to render {}", out.display()))?;
            Some(out.display().to_string())
        }
        None => None,
    };

    Ok(SingleReport {
        map: display_name(&args.map),
        trials: args.trials.max(1),
        mean_runtime_ms: result.mean_runtime_ms,
        summary: PathSummary::from_plan(&result.plan),
        image,
    })
}
