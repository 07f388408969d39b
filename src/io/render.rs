//! Drawing tile assignments and their overlays onto canvas layers

use crate::analysis::palette::{Color, Palette};
use crate::analysis::statistics::TileStatistics;
use crate::io::canvas::{Canvas, LayerId};
use crate::io::configuration::{MIN_STATISTICS_ROW, STATISTICS_COLUMNS};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::assignment::TileAssignment;
use crate::spatial::geometry::{Grid, Rect};

const WHITE: Color = Color::new(255, 255, 255);
const BLACK: Color = Color::new(0, 0, 0);

fn color_of(palette: &Palette, index: usize) -> Result<Color> {
    palette.get(index).ok_or_else(|| {
        invalid_parameter(
            "gene",
            &index,
            &format!("palette has {} colors", palette.len()),
        )
    })
}

/// Paint every tile of `assignment` with its palette color
///
/// # Errors
///
/// Returns an error if a gene is outside the palette or a canvas call fails
pub fn render_assignment<C: Canvas + ?Sized>(
    canvas: &mut C,
    layer: LayerId,
    grid: &Grid,
    palette: &Palette,
    assignment: &TileAssignment,
) -> Result<()> {
    for (x, y, index) in assignment.cells() {
        canvas.fill_rect(layer, grid.tile_rect(x, y), color_of(palette, index)?)?;
    }
    Ok(())
}

/// Write each tile's 1-based palette number on it in the inverted tile color
///
/// # Errors
///
/// Returns an error if a gene is outside the palette or a canvas call fails
pub fn render_numbering<C: Canvas + ?Sized>(
    canvas: &mut C,
    layer: LayerId,
    grid: &Grid,
    palette: &Palette,
    assignment: &TileAssignment,
) -> Result<()> {
    let size = 3 * grid.tile_side / 4;
    for (x, y, index) in assignment.cells() {
        let color = color_of(palette, index)?;
        let rect = grid.tile_rect(x, y);
        canvas.annotate_text(
            layer,
            rect.x,
            rect.y,
            &(index + 1).to_string(),
            size,
            color.inverted(),
        )?;
    }
    Ok(())
}

/// Row height of the statistics table for a tile side
pub fn statistics_row_height(tile_side: u32) -> u32 {
    tile_side.max(MIN_STATISTICS_ROW)
}

/// Size of a statistics layer able to hold one row per palette color
pub fn statistics_layer_size(palette: &Palette, tile_side: u32) -> (u32, u32) {
    let row = statistics_row_height(tile_side);
    let rows = u32::try_from(palette.len()).unwrap_or(u32::MAX);
    (STATISTICS_COLUMNS * row, rows.saturating_mul(row))
}

/// Draw the statistics table: swatch, number, tile count and RGB value per color
///
/// # Errors
///
/// Returns an error if a canvas call fails
pub fn render_statistics<C: Canvas + ?Sized>(
    canvas: &mut C,
    layer: LayerId,
    palette: &Palette,
    statistics: &TileStatistics,
    tile_side: u32,
) -> Result<()> {
    let (width, height) = canvas.dimensions(layer)?;
    canvas.fill_rect(layer, Rect::new(0, 0, width, height), WHITE)?;

    let size = statistics_row_height(tile_side);
    let text_size = size / 2;

    for (y, row) in (0u32..).zip(statistics.rows(palette)) {
        let top = y.saturating_mul(size);
        canvas.fill_rect(layer, Rect::new(0, top, size, size), row.color)?;
        canvas.annotate_text(layer, size, top, &row.number.to_string(), text_size, BLACK)?;
        canvas.annotate_text(layer, 2 * size, top, &row.count.to_string(), text_size, BLACK)?;
        canvas.annotate_text(layer, 4 * size, top, &row.color.to_string(), text_size, BLACK)?;
    }
    Ok(())
}
