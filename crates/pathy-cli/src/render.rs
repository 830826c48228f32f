//! Map and path images.
//!
//! Open cells are white and blocked cells black, each cell drawn as a
//! `scale x scale` block. Paths are red segments between vertices with a
//! small blue diamond on every node.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path as FsPath;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use pathy_lib::{Grid, Node, Path};

pub const OPEN: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLOCKED: Rgb<u8> = Rgb([0, 0, 0]);
pub const SEGMENT: Rgb<u8> = Rgb([255, 0, 0]);
pub const MARKER: Rgb<u8> = Rgb([0, 0, 255]);

/// Half-diagonal of a node marker, in cells.
const MARKER_SIZE: f32 = 0.2;

/// Render `grid` with every cell scaled to `scale` pixels.
pub fn map_image(grid: &Grid, scale: u32) -> Result<RgbImage> {
    let dimension = |cells: usize, axis: &str| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(scale))
            .with_context(|| format!("map {axis} of {cells} cells at scale {scale} is too large"))
    };
    let width = dimension(grid.width(), "width")?;
    let height = dimension(grid.height(), "height")?;

    let scale = scale.max(1);
    Ok(RgbImage::from_fn(width, height, |x, y| {
        if grid.is_blocked((x / scale) as i32, (y / scale) as i32) {
            BLOCKED
        } else {
            OPEN
        }
    }))
}

/// Draw `path` onto an image produced by [`map_image`] at the same `scale`.
pub fn draw_path(image: &mut RgbImage, path: &Path, scale: u32) {
    let scale = scale.max(1) as f32;
    let line_width = (scale / 4.0).ceil().max(1.0) as i32;
    let point = |node: Node| (node.x as f32 * scale, node.y as f32 * scale);

    for (a, b) in path.segments() {
        let (start, end) = (point(a), point(b));
        // Thick lines are stacked one-pixel segments around the centre line.
        for step in 0..line_width {
            let offset = (step - (line_width - 1) / 2) as f32;
            draw_line_segment_mut(
                image,
                (start.0 + offset, start.1),
                (end.0 + offset, end.1),
                SEGMENT,
            );
            draw_line_segment_mut(
                image,
                (start.0, start.1 + offset),
                (end.0, end.1 + offset),
                SEGMENT,
            );
        }
    }

    let size = MARKER_SIZE * scale;
    for &node in path.nodes() {
        let (x, y) = point(node);
        let corners = [(x, y - size), (x + size, y), (x, y + size), (x - size, y)];
        for (i, &corner) in corners.iter().enumerate() {
            draw_line_segment_mut(image, corner, corners[(i + 1) % corners.len()], MARKER);
        }
    }
}

/// Write `image` to `out`; the format follows the file extension.
///
/// JPEG output is encoded at full quality.
pub fn save_image(image: &RgbImage, out: &FsPath) -> Result<()> {
    let format = ImageFormat::from_path(out)
        .with_context(|| format!("unsupported image extension for {}", out.display()))?;
    match format {
        ImageFormat::Jpeg => {
            let file = File::create(out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), 100);
            image
                .write_with_encoder(encoder)
                .with_context(|| format!("failed to encode {}", out.display()))?;
        }
        _ => image
            .save_with_format(out, format)
            .with_context(|| format!("failed to write {}", out.display()))?,
    }
    tracing::debug!(path = %out.display(), width = image.width(), height = image.height(), "image written");
    Ok(())
}

/// Image file name for one scenario: `<map stem>_<sx>_<sy>_<gx>_<gy>.jpg`.
pub fn scenario_image_name(map_name: &str, start: Node, goal: Node) -> String {
    let stem = FsPath::new(map_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| map_name.to_string());
    format!(
        "{stem}_{}_{}_{}_{}.jpg",
        start.x, start.y, goal.x, goal.y
    )
}

/// Render `grid`, overlay `path` if there is one, and save to `out`.
pub fn write_path_image(grid: &Grid, path: Option<&Path>, scale: u32, out: &FsPath) -> Result<()> {
    let mut image = map_image(grid, scale)?;
    if let Some(path) = path {
        draw_path(&mut image, path, scale);
    }
    save_image(&image, out)
}
