//! `multiple` command: benchmark an evenly spread sample of a scenario file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use pathy_lib::movingai::shared_map_name;
use pathy_lib::{load_map, load_scenarios, select_evenly, PathAlgorithm, PathRequest, PathSummary};

use crate::commands::benchmark;
use crate::output::{AverageStats, MultipleReport, ScenarioReport};
use crate::render::{scenario_image_name, write_path_image};

/// Arguments for the multiple command.
#[derive(Debug, Clone)]
pub struct MultipleArgs {
    /// MovingAI `.scen` file; its map is resolved next to it.
    pub scenarios: PathBuf,
    pub algorithm: PathAlgorithm,
    /// Number of scenarios to sample from the file.
    pub count: usize,
    /// Number of timed runs per scenario.
    pub trials: u32,
    /// Directory that receives one rendered image per scenario.
    pub image_dir: Option<PathBuf>,
    /// Pixels per cell in the rendered images.
    pub scale: u32,
}

pub fn handle_multiple(args: &MultipleArgs) -> Result<MultipleReport> {
    let scenarios = load_scenarios(&args.scenarios).with_context(|| {
        format!(
            "failed to load scenarios from {}",
            args.scenarios.display()
        )
    })?;
    let map_name = shared_map_name(&scenarios)
        .with_context(|| format!("unusable scenario file {}", args.scenarios.display()))?
        .to_string();

    let map_path = scenarios[0].map_path(&args.scenarios);
    let grid = load_map(&map_path)
        .with_context(|| format!("failed to load map from {}", map_path.display()))?;

    let selected = select_evenly(&scenarios, args.count);
    tracing::info!(
        map = %map_name,
        available = scenarios.len(),
        selected = selected.len(),
        algorithm = %args.algorithm,
        "running scenarios"
    );

    if let Some(dir) = &args.image_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create image directory {}", dir.display()))?;
    }

    let mut reports = Vec::with_capacity(selected.len());
    for scenario in selected {
        let request = PathRequest::new(scenario.start, scenario.goal, args.algorithm);
        let result = benchmark(&grid, &request, args.trials).with_context(|| {
            format!(
                "scenario {} -> {} does not fit {}",
                scenario.start, scenario.goal, map_name
            )
        })?;

        let image = match &args.image_dir {
            Some(dir) => {
                let out = dir.join(scenario_image_name(&map_name, scenario.start, scenario.goal));
                write_path_image(&grid, result.plan.path.as_ref(), args.scale, &out)
                    .with_context(|| format!("failed to render {}", out.display()))?;
                Some(out.display().to_string())
            }
            None => None,
        };

        reports.push(ScenarioReport {
            bucket: scenario.bucket,
            optimal_length: scenario.optimal_length,
            mean_runtime_ms: result.mean_runtime_ms,
            summary: PathSummary::from_plan(&result.plan),
            image,
        });
    }

    Ok(MultipleReport {
        map: map_name,
        algorithm: args.algorithm,
        trials: args.trials.max(1),
        average: AverageStats::from_scenarios(&reports),
        scenarios: reports,
    })
}
