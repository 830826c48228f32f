//! Report types and renderers for the benchmark commands.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use pathy_lib::{Node, PathAlgorithm, PathSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// A report that can be printed as text or serialized as JSON.
pub trait Report: Serialize {
    fn render_text(&self, palette: &ColorPalette) -> String;
}

/// Result of the `single` command.
#[derive(Debug, Clone, Serialize)]
pub struct SingleReport {
    pub map: String,
    pub trials: u32,
    pub mean_runtime_ms: f64,
    pub summary: PathSummary,
    /// Rendered path image, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One scenario of the `multiple` command.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub bucket: u32,
    pub optimal_length: f64,
    pub mean_runtime_ms: f64,
    pub summary: PathSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Averages over the scenarios of one `multiple` run.
///
/// Path statistics cover only the scenarios where a path was found; the
/// runtime covers every scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageStats {
    pub found: usize,
    pub total: usize,
    pub turns: f64,
    pub length: f64,
    pub average_turn_angle: f64,
    pub runtime_ms: f64,
}

impl AverageStats {
    pub fn from_scenarios(scenarios: &[ScenarioReport]) -> Self {
        let total = scenarios.len();
        if total == 0 {
            return Self::default();
        }

        let mut stats = Self {
            total,
            ..Self::default()
        };
        for scenario in scenarios {
            stats.runtime_ms += scenario.mean_runtime_ms;
            if let Some(metrics) = &scenario.summary.metrics {
                stats.found += 1;
                stats.turns += metrics.turns as f64;
                stats.length += metrics.length;
                stats.average_turn_angle += metrics.average_turn_angle;
            }
        }

        stats.runtime_ms /= total as f64;
        if stats.found > 0 {
            let found = stats.found as f64;
            stats.turns /= found;
            stats.length /= found;
            stats.average_turn_angle /= found;
        }
        stats
    }
}

/// Result of the `multiple` command.
#[derive(Debug, Clone, Serialize)]
pub struct MultipleReport {
    pub map: String,
    pub algorithm: PathAlgorithm,
    pub trials: u32,
    pub scenarios: Vec<ScenarioReport>,
    pub average: AverageStats,
}

/// Result of the `draw` command.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReport {
    pub map: String,
    pub image: String,
    pub width: u32,
    pub height: u32,
}

/// Result of the `los` command.
#[derive(Debug, Clone, Serialize)]
pub struct SightReport {
    pub map: String,
    pub from: Node,
    pub to: Node,
    pub visible: bool,
    pub distance: f64,
}

fn runtime(ms: f64) -> String {
    format!("{ms:.3}ms")
}

impl Report for SingleReport {
    fn render_text(&self, palette: &ColorPalette) -> String {
        let mut buffer = String::new();
        let summary = &self.summary;
        let status = if summary.found {
            format!("{}found{}", palette.good, palette.reset)
        } else {
            format!("{}no path{}", palette.bad, palette.reset)
        };
        let _ = writeln!(
            buffer,
            "{}{}{} {} -> {} on {} ({})",
            palette.heading,
            summary.algorithm,
            palette.reset,
            summary.start,
            summary.goal,
            self.map,
            status
        );
        let _ = writeln!(
            buffer,
            "Stats: {}{}{}, runtime {}{}{} (mean of {} trial(s)), {} expanded",
            palette.value,
            summary.stats_line(),
            palette.reset,
            palette.value,
            runtime(self.mean_runtime_ms),
            palette.reset,
            self.trials,
            format_with_separators(summary.expanded as u64)
        );
        for step in &summary.steps {
            let _ = writeln!(
                buffer,
                "{}{:>4}: {}{}",
                palette.muted,
                step.index,
                step.node(),
                palette.reset
            );
        }
        if let Some(image) = &self.image {
            let _ = writeln!(buffer, "Image: {image}");
        }
        buffer
    }
}

impl Report for MultipleReport {
    fn render_text(&self, palette: &ColorPalette) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{}{}{} on {}: {} scenario(s), {} trial(s) each",
            palette.heading,
            self.algorithm,
            palette.reset,
            self.map,
            self.scenarios.len(),
            self.trials
        );
        for scenario in &self.scenarios {
            let summary = &scenario.summary;
            let colour = if summary.found {
                palette.value
            } else {
                palette.bad
            };
            let _ = writeln!(
                buffer,
                "{} -> {} stats: {}{}{}, runtime {} (optimal {:.1})",
                summary.start,
                summary.goal,
                colour,
                summary.stats_line(),
                palette.reset,
                runtime(scenario.mean_runtime_ms),
                scenario.optimal_length
            );
            if let Some(image) = &scenario.image {
                let _ = writeln!(buffer, "{}  image {}{}", palette.muted, image, palette.reset);
            }
        }

        let avg = &self.average;
        let _ = writeln!(buffer);
        let _ = writeln!(
            buffer,
            "{}Avg stats:{} {:.2} turn(s), length {:.2}, avg angle {:.2} rad ({:.1} deg), runtime {} ({}/{} found)",
            palette.heading,
            palette.reset,
            avg.turns,
            avg.length,
            avg.average_turn_angle,
            avg.average_turn_angle.to_degrees(),
            runtime(avg.runtime_ms),
            avg.found,
            avg.total
        );
        buffer
    }
}

impl Report for DrawReport {
    fn render_text(&self, _palette: &ColorPalette) -> String {
        format!(
            "{} drawn to {} ({}x{})\n",
            self.map, self.image, self.width, self.height
        )
    }
}

impl Report for SightReport {
    fn render_text(&self, palette: &ColorPalette) -> String {
        let verdict = if self.visible {
            format!("{}visible{}", palette.good, palette.reset)
        } else {
            format!("{}blocked{}", palette.bad, palette.reset)
        };
        format!(
            "{} -> {} on {}: {} (distance {:.3})\n",
            self.from, self.to, self.map, verdict, self.distance
        )
    }
}

/// Print `report` to stdout in the requested format.
pub fn emit<R: Report>(report: &R, format: OutputFormat, palette: &ColorPalette) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.render_text(palette).as_bytes())
        }
        OutputFormat::Json => render_json(report),
    }
}

/// Render any serializable value as pretty-printed JSON on stdout.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    writeln!(stdout)
}

/// Print the elapsed wall time below text output.
pub fn print_footer(elapsed: Duration, palette: &ColorPalette) {
    println!(
        "{}Completed in {}ms{}",
        palette.muted,
        format_with_separators(elapsed.as_millis() as u64),
        palette.reset
    );
}
