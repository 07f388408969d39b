//! Tile grid geometry derived from image size and a requested tile count
//!
//! Tiles are square. The side length is the smallest integer whose square is at
//! least the ideal tile area, so the actual tile count may exceed the request.

use crate::io::error::{Result, TilingError};

/// Tile grid dimensions and the side length of a single square tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of tiles horizontally
    pub columns: u32,
    /// Number of tiles vertically
    pub rows: u32,
    /// Side length of a tile in pixels
    pub tile_side: u32,
}

/// Target image size so that every tile is a full square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Number of tiles actually produced (`columns * rows`)
    pub actual_tiles: usize,
    /// Width in pixels after resizing
    pub width: u32,
    /// Height in pixels after resizing
    pub height: u32,
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clip the rectangle to a `width x height` surface
    ///
    /// Returns `None` when nothing of the rectangle lies on the surface.
    pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);
        (self.x < right && self.y < bottom).then(|| Self {
            x: self.x,
            y: self.y,
            width: right - self.x,
            height: bottom - self.y,
        })
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Grid {
    /// Total number of tiles in the grid
    pub const fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Pixel rectangle covered by the tile at column `x`, row `y`
    pub const fn tile_rect(&self, x: u32, y: u32) -> Rect {
        Rect::new(
            x * self.tile_side,
            y * self.tile_side,
            self.tile_side,
            self.tile_side,
        )
    }

    /// Size the source image must be resized to before tiling
    pub const fn resize_plan(&self) -> ResizePlan {
        plan_resize(self.columns, self.rows, self.tile_side)
    }
}

/// Derive the tile grid for a `width x height` image split into roughly
/// `requested_tiles` square tiles
///
/// # Errors
///
/// Returns [`TilingError::InvalidGeometry`] if any argument is zero
pub fn plan_grid(width: u32, height: u32, requested_tiles: u32) -> Result<Grid> {
    if width == 0 || height == 0 || requested_tiles == 0 {
        return Err(TilingError::InvalidGeometry {
            width,
            height,
            tiles: requested_tiles,
        });
    }

    let tile_area = f64::from(width) * f64::from(height) / f64::from(requested_tiles);
    let pixels = u128::from(width) * u128::from(height);
    let covers = |side: u128| side * side * u128::from(requested_tiles) >= pixels;

    // Floating point rounding near perfect squares is corrected to the exact ceiling
    let mut tile_side = u128::from(tile_area.sqrt().ceil().max(1.0) as u32);
    while tile_side > 1 && covers(tile_side - 1) {
        tile_side -= 1;
    }
    while !covers(tile_side) {
        tile_side += 1;
    }

    let tile_side = tile_side as u32;
    Ok(Grid {
        columns: width.div_ceil(tile_side),
        rows: height.div_ceil(tile_side),
        tile_side,
    })
}

/// Resize target for a grid of `columns x rows` tiles of side `tile_side`
pub const fn plan_resize(columns: u32, rows: u32, tile_side: u32) -> ResizePlan {
    ResizePlan {
        actual_tiles: columns as usize * rows as usize,
        width: columns * tile_side,
        height: rows * tile_side,
    }
}
