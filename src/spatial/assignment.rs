//! Per-tile palette assignments in column-major order
//!
//! The assignment is stored as an `Array2` with shape `(columns, rows)` in
//! standard layout, so the logical iteration order is `x` outer, `y` inner
//! and the linear position of tile `(x, y)` is `x * rows + y`. Rendering,
//! numbering and statistics all walk the same order.

use crate::analysis::palette::{Color, Palette};
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::geometry::Grid;
use ndarray::Array2;
use rand::Rng;

/// One candidate color for every tile of a grid, stored as palette indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAssignment {
    genes: Array2<usize>,
}

impl TileAssignment {
    /// Assignment filling every tile with palette index `index`
    pub fn uniform(grid: &Grid, index: usize) -> Self {
        Self {
            genes: Array2::from_elem(shape(grid), index),
        }
    }

    /// Assignment built by evaluating `f(x, y)` for every tile
    pub fn from_fn<F>(grid: &Grid, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> usize,
    {
        Self {
            genes: Array2::from_shape_fn(shape(grid), |(x, y)| f(x as u32, y as u32)),
        }
    }

    /// Assignment with every gene drawn uniformly from a palette of `palette_len` colors
    pub fn random<R: Rng>(grid: &Grid, palette_len: usize, rng: &mut R) -> Self {
        Self::from_fn(grid, |_, _| rng.random_range(0..palette_len.max(1)))
    }

    /// Build from palette indices listed in column-major order
    ///
    /// # Errors
    ///
    /// Returns an error if `indices` does not contain exactly one entry per tile
    pub fn from_indices(grid: &Grid, indices: Vec<usize>) -> Result<Self> {
        let expected = grid.tile_count();
        let provided = indices.len();
        Array2::from_shape_vec(shape(grid), indices)
            .map(|genes| Self { genes })
            .map_err(|_shape_error| {
                invalid_parameter(
                    "indices",
                    &provided,
                    &format!("expected {expected} genes for the grid"),
                )
            })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the grid has no tiles
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of tile columns
    pub fn columns(&self) -> usize {
        self.genes.nrows()
    }

    /// Number of tile rows
    pub fn rows(&self) -> usize {
        self.genes.ncols()
    }

    /// Palette index of the tile at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        self.genes.get((x, y)).copied()
    }

    /// Overwrite the palette index of the tile at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns an error if the tile lies outside the grid
    pub fn set(&mut self, x: usize, y: usize, index: usize) -> Result<()> {
        let (columns, rows) = (self.columns(), self.rows());
        let gene = self.genes.get_mut((x, y)).ok_or_else(|| {
            invalid_parameter(
                "tile",
                &format!("({x}, {y})"),
                &format!("grid is {columns}x{rows}"),
            )
        })?;
        *gene = index;
        Ok(())
    }

    /// Genes in column-major order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes.iter().copied()
    }

    /// Mutable genes in column-major order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut usize> + '_ {
        self.genes.iter_mut()
    }

    /// Tiles as `(x, y, palette index)` in column-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, usize)> + '_ {
        self.genes
            .indexed_iter()
            .map(|((x, y), &index)| (x as u32, y as u32, index))
    }

    /// Resolve every gene to its palette color, in column-major order
    ///
    /// # Errors
    ///
    /// Returns an error if a gene does not index into `palette`
    pub fn colors(&self, palette: &Palette) -> Result<Vec<Color>> {
        self.iter()
            .map(|index| {
                palette.get(index).ok_or_else(|| {
                    invalid_parameter(
                        "gene",
                        &index,
                        &format!("palette has {} colors", palette.len()),
                    )
                })
            })
            .collect()
    }

    /// Check that the assignment covers `grid` and only references `palette`
    ///
    /// # Errors
    ///
    /// Returns an error describing the first mismatch found
    pub fn validate(&self, grid: &Grid, palette: &Palette) -> Result<()> {
        if self.genes.dim() != shape(grid) {
            return Err(TilingError::InvalidParameter {
                parameter: "assignment",
                value: format!("{}x{}", self.columns(), self.rows()),
                reason: format!("grid is {}x{}", grid.columns, grid.rows),
            });
        }
        self.colors(palette).map(|_| ())
    }
}

const fn shape(grid: &Grid) -> (usize, usize) {
    (grid.columns as usize, grid.rows as usize)
}
