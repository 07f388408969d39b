//! Per-color tile counts of a finished assignment

use crate::analysis::palette::{Color, Palette};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::assignment::TileAssignment;

/// How many tiles use each palette color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileStatistics {
    counts: Vec<usize>,
}

/// One row of the statistics table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsRow {
    /// 1-based palette number as shown on tiles
    pub number: usize,
    /// Palette color
    pub color: Color,
    /// Number of tiles painted with the color
    pub count: usize,
}

impl TileStatistics {
    /// Count tiles per palette color
    ///
    /// # Errors
    ///
    /// Returns an error if a gene does not index into `palette`
    pub fn tally(palette: &Palette, assignment: &TileAssignment) -> Result<Self> {
        let mut counts = vec![0; palette.len()];
        for index in assignment.iter() {
            let count = counts.get_mut(index).ok_or_else(|| {
                invalid_parameter(
                    "gene",
                    &index,
                    &format!("palette has {} colors", palette.len()),
                )
            })?;
            *count += 1;
        }
        Ok(Self { counts })
    }

    /// Tile count of the color at palette index `index`
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Counts in palette order
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of tiles counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of palette colors used by at least one tile
    pub fn colors_used(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Table rows in palette order
    pub fn rows<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = StatisticsRow> + 'a {
        palette
            .iter()
            .zip(self.counts.iter())
            .enumerate()
            .map(|(index, (&color, &count))| StatisticsRow {
                number: index + 1,
                color,
                count,
            })
    }
}
