//! Approximate a raster image with a grid of solid square tiles drawn from a fixed palette
//!
//! The image is split into square tiles sized from a requested tile count, a
//! palette is read from a color map, and every tile gets a palette color either
//! greedily (nearest color to the tile's average) or by a genetic search that
//! scores candidates by rendering them and diffing against the original.

#![forbid(unsafe_code)]

/// Tile color strategies: greedy matching, fitness evaluation and genetic search
pub mod algorithm;
/// Palette extraction and tile statistics
pub mod analysis;
/// Canvas capabilities, rendering, file I/O, CLI and error handling
pub mod io;
/// Color distance and probability helpers
pub mod math;
/// Grid geometry and tile assignments
pub mod spatial;

pub use io::error::{Result, TilingError};
