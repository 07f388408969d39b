//! Host-facing plumbing: canvas capabilities, rendering, files and the command line

/// Drawing capability trait and in-memory layered image
pub mod canvas;
/// Command-line interface and batch file processing
pub mod cli;
/// Defaults and constants
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Bitmap font for text annotations
pub mod glyphs;
/// PNG loading and layer export
pub mod image;
/// Progress display for genetic runs
pub mod progress;
/// Tile, numbering and statistics rendering
pub mod render;
