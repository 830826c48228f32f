//! `draw` command: render a map to an image file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use pathy_lib::load_map;

use crate::commands::display_name;
use crate::output::DrawReport;
use crate::render::{map_image, save_image};

/// Arguments for the draw command.
#[derive(Debug, Clone)]
pub struct DrawArgs {
    /// MovingAI map file.
    pub map: PathBuf,
    /// Output image; the extension picks the format.
    pub out: PathBuf,
    /// Pixels per cell.
    pub scale: u32,
}

pub fn handle_draw(args: &DrawArgs) -> Result<DrawReport> {
    let grid = load_map(&args.map)
        .with_context(|| format!("failed to load map from {}", args.map.display()))?;
    let image = map_image(&grid, args.scale)?;
    save_image(&image, &args.out)?;

    Ok(DrawReport {
        map: display_name(&args.map),
        image: args.out.display().to_string(),
        width: image.width(),
        height: image.height(),
    })
}
