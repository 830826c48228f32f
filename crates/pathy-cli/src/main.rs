use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pathy_lib::{Node, PathAlgorithm};

use pathy_cli::commands::draw::{handle_draw, DrawArgs};
use pathy_cli::commands::los::{handle_los, LosArgs};
use pathy_cli::commands::multiple::{handle_multiple, MultipleArgs};
use pathy_cli::commands::{parse_count, parse_node};
use pathy_cli::commands::single::{handle_single, SingleArgs};
use pathy_cli::output::{emit, print_footer, OutputFormat};
use pathy_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid any-angle pathfinding benchmarks")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark a single start/goal pair on a MovingAI map.
    Single {
        /// MovingAI map file.
        #[arg(long)]
        map: PathBuf,
        /// Start vertex as X,Y.
        #[arg(long = "from", value_parser = parse_node)]
        from: Node,
        /// Goal vertex as X,Y.
        #[arg(long = "to", value_parser = parse_node)]
        to: Node,
        /// Search algorithm (dijkstra, astar, thetastar, astar-ps).
        #[arg(long, default_value = "thetastar")]
        algorithm: PathAlgorithm,
        /// Number of timed runs to average.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        trials: u32,
        /// Write the map with the path drawn on it to this file.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Pixels per map cell in the image.
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
    },
    /// Benchmark evenly spread scenarios from a MovingAI scenario file.
    Multiple {
        /// MovingAI `.scen` file; its map must sit in the same directory.
        #[arg(long)]
        scenarios: PathBuf,
        /// Search algorithm (dijkstra, astar, thetastar, astar-ps).
        #[arg(long, default_value = "thetastar")]
        algorithm: PathAlgorithm,
        /// Number of scenarios to run.
        #[arg(long, default_value = "10", value_parser = parse_count)]
        count: usize,
        /// Number of timed runs per scenario.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        trials: u32,
        /// Directory for one `<map>_<sx>_<sy>_<gx>_<gy>.jpg` image per scenario.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Pixels per map cell in the images.
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
    },
    /// Render a MovingAI map to an image file.
    Draw {
        /// MovingAI map file.
        #[arg(long)]
        map: PathBuf,
        /// Output image (.jpg or .png).
        #[arg(long)]
        out: PathBuf,
        /// Pixels per map cell.
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
    },
    /// Check line of sight between two vertices of a map.
    Los {
        /// MovingAI map file.
        #[arg(long)]
        map: PathBuf,
        /// First vertex as X,Y.
        #[arg(long = "from", value_parser = parse_node)]
        from: Node,
        /// Second vertex as X,Y.
        #[arg(long = "to", value_parser = parse_node)]
        to: Node,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let palette = ColorPalette::detect();
    let started = Instant::now();

    match cli.command {
        Command::Single {
            map,
            from,
            to,
            algorithm,
            trials,
            image,
            scale,
        } => {
            let report = handle_single(&SingleArgs {
                map,
                from,
                to,
                algorithm,
                trials,
                image,
                scale,
            })?;
            emit(&report, cli.format, &palette)?;
        }
        Command::Multiple {
            scenarios,
            algorithm,
            count,
            trials,
            image,
            scale,
        } => {
            let report = handle_multiple(&MultipleArgs {
                scenarios,
                algorithm,
                count,
                trials,
                image_dir: image,
                scale,
            })?;
            emit(&report, cli.format, &palette)?;
        }
        Command::Draw { map, out, scale } => {
            let report = handle_draw(&DrawArgs { map, out, scale })?;
            emit(&report, cli.format, &palette)?;
        }
        Command::Los { map, from, to } => {
            let report = handle_los(&LosArgs { map, from, to })?;
            emit(&report, cli.format, &palette)?;
        }
    }

    if cli.format == OutputFormat::Text {
        print_footer(started.elapsed(), &palette);
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
