//! Greedy nearest-color tile matching

use crate::analysis::palette::{Color, Palette};
use crate::io::canvas::{Canvas, LayerId};
use crate::io::error::Result;
use crate::math::distance::squared_euclidean_rgb;
use crate::spatial::assignment::TileAssignment;
use crate::spatial::geometry::Grid;

impl Palette {
    /// Index of the palette color closest to `sample` in RGB space
    ///
    /// Ties resolve to the earliest palette entry.
    pub fn nearest_index(&self, sample: Color) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, &candidate) in self.iter().enumerate() {
            // Squared distance preserves the ordering of the Euclidean one
            let distance = squared_euclidean_rgb(candidate, sample);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    /// Palette color closest to `sample` in RGB space
    pub fn nearest(&self, sample: Color) -> Color {
        self.get(self.nearest_index(sample)).unwrap_or(sample)
    }
}

/// Assign every tile the palette color nearest to the average color of its
/// region in `original`
///
/// # Errors
///
/// Returns an error if sampling the original layer fails
pub fn match_tiles<C: Canvas + ?Sized>(
    canvas: &C,
    original: LayerId,
    grid: &Grid,
    palette: &Palette,
) -> Result<TileAssignment> {
    let mut indices = Vec::with_capacity(grid.tile_count());
    for x in 0..grid.columns {
        for y in 0..grid.rows {
            let average = canvas.sample_average_color(original, grid.tile_rect(x, y))?;
            indices.push(palette.nearest_index(average));
        }
    }
    TileAssignment::from_indices(grid, indices)
}
