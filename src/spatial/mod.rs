//! Spatial data structures for the tile grid
//!
//! This module contains spatial-related functionality including:
//! - Grid geometry planning and resize targets
//! - Column-major tile assignments

/// Per-tile palette assignments
pub mod assignment;
/// Grid geometry planning
pub mod geometry;

pub use assignment::TileAssignment;
pub use geometry::{Grid, Rect};
