/// Palette extraction and color types
pub mod palette;
/// Tile counts per palette color
pub mod statistics;
