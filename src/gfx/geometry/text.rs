//! Extruded 3D text
//!
//! Glyphs are rasterized with `fontdue`, covered cells are merged into
//! rectangles, and each rectangle becomes a box extruded along +Z. The
//! result sits on the baseline starting at the origin and spans
//! `0..depth` in Z; call [`GeometryData::center`] to centre it.

use std::{ops::Deref, path::Path};

use super::{primitives::push_box, GeometryData};
use crate::error::{EvergreenError, Result};

/// Cells at or above this coverage count as solid
const COVERAGE_THRESHOLD: u8 = 128;

/// DejaVu Sans, compiled in so the text renders without any system fonts
pub const BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometryOptions {
    /// Em size in world units
    pub size: f32,
    /// Extrusion depth in world units
    pub depth: f32,
    /// Pixels per em used when rasterizing
    pub pixel_resolution: f32,
}

impl Default for TextGeometryOptions {
    fn default() -> Self {
        Self {
            size: 0.4,
            depth: 0.2,
            pixel_resolution: 96.0,
        }
    }
}

/// Reads and parses a TrueType/OpenType font
pub fn load_font(path: impl AsRef<Path>, pixel_resolution: f32) -> Result<fontdue::Font> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| EvergreenError::FontIo {
        path: path.display().to_string(),
        source,
    })?;

    parse_font(bytes, pixel_resolution, &path.display().to_string())
}

/// Parses [`BUNDLED_FONT`]
pub fn bundled_font(pixel_resolution: f32) -> Result<fontdue::Font> {
    parse_font(BUNDLED_FONT, pixel_resolution, "<bundled DejaVu Sans>")
}

fn parse_font<D: Deref<Target = [u8]>>(
    bytes: D,
    pixel_resolution: f32,
    source: &str,
) -> Result<fontdue::Font> {
    let settings = fontdue::FontSettings {
        scale: pixel_resolution,
        ..Default::default()
    };
    fontdue::Font::from_bytes(bytes, settings).map_err(|reason| EvergreenError::FontParse {
        path: source.to_string(),
        reason: reason.to_string(),
    })
}

/// Builds extruded geometry for a single line of text
pub fn generate_text(
    font: &fontdue::Font,
    text: &str,
    options: &TextGeometryOptions,
) -> GeometryData {
    let px = options.pixel_resolution.max(1.0);
    let cell = options.size / px;

    let mut data = GeometryData::new();
    let mut pen_x = 0.0f32;
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if let Some(prev) = previous {
            pen_x += font.horizontal_kern(prev, ch, px).unwrap_or(0.0);
        }

        let (metrics, bitmap) = font.rasterize(ch, px);
        let origin_x = pen_x + metrics.xmin as f32;
        let origin_y = metrics.ymin as f32;

        for rect in coverage_rects(&bitmap, metrics.width, metrics.height) {
            // Bitmap rows run top to bottom; world Y runs up from the baseline
            let x0 = origin_x + rect.col_start as f32;
            let x1 = origin_x + rect.col_end as f32;
            let y0 = origin_y + (metrics.height - rect.row_end) as f32;
            let y1 = origin_y + (metrics.height - rect.row_start) as f32;

            push_box(
                &mut data,
                [x0 * cell, y0 * cell, 0.0],
                [x1 * cell, y1 * cell, options.depth],
            );
        }

        pen_x += metrics.advance_width;
        previous = Some(ch);
    }

    log::debug!(
        "Text '{}' built with {} vertices, {} triangles",
        text,
        data.vertex_count(),
        data.triangle_count()
    );

    data
}

/// A solid rectangle of bitmap cells, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageRect {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

/// Merges the solid cells of a coverage bitmap into rectangles
///
/// Each row is split into runs of solid cells. A run that spans exactly the
/// same columns as a rectangle ending on the previous row extends it.
pub fn coverage_rects(bitmap: &[u8], width: usize, height: usize) -> Vec<CoverageRect> {
    let mut finished = Vec::new();
    let mut open: Vec<CoverageRect> = Vec::new();

    for row in 0..height {
        let line = &bitmap[row * width..(row + 1) * width];
        let mut next_open = Vec::new();

        for (col_start, col_end) in row_runs(line) {
            match open
                .iter()
                .position(|r| r.col_start == col_start && r.col_end == col_end)
            {
                Some(index) => {
                    let mut rect = open.swap_remove(index);
                    rect.row_end = row + 1;
                    next_open.push(rect);
                }
                None => next_open.push(CoverageRect {
                    row_start: row,
                    row_end: row + 1,
                    col_start,
                    col_end,
                }),
            }
        }

        finished.append(&mut open);
        open = next_open;
    }

    finished.append(&mut open);
    finished
}

fn row_runs(line: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (col, &coverage) in line.iter().enumerate() {
        let solid = coverage >= COVERAGE_THRESHOLD;
        match (solid, start) {
            (true, None) => start = Some(col),
            (false, Some(s)) => {
                runs.push((s, col));
                start = None;
            }
            _ => (),
        }
    }
    if let Some(s) = start {
        runs.push((s, line.len()));
    }

    runs
}
