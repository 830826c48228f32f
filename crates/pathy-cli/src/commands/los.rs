//! `los` command: line-of-sight query between two vertices.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use pathy_lib::{has_line_of_sight, load_map, straight_line_distance, Node};

use crate::commands::display_name;
use crate::output::SightReport;

/// Arguments for the los command.
#[derive(Debug, Clone)]
pub struct LosArgs {
    pub map: PathBuf,
    pub from: Node,
    pub to: Node,
}

pub fn handle_los(args: &LosArgs) -> Result<SightReport> {
    let grid = load_map(&args.map)
        .with_context(|| format!("failed to load map from {}", args.map.display()))?;
    for node in [args.from, args.to] {
        if !grid.contains_vertex(node) {
            bail!(pathy_lib::Error::OutOfBounds {
                node,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }

    Ok(SightReport {
        map: display_name(&args.map),
        from: args.from,
        to: args.to,
        visible: has_line_of_sight(&grid, args.from, args.to),
        distance: straight_line_distance(args.from, args.to),
    })
}
