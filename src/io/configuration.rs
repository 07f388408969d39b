//! Conversion constants and runtime configuration defaults

// Defaults mirror the options offered by the conversion dialog
/// Default number of requested tiles
pub const DEFAULT_TILES: u32 = 1;
/// Default number of genetic algorithm generations
pub const DEFAULT_GENERATIONS: usize = 0;
/// Default genetic algorithm population size
pub const DEFAULT_POPULATION_SIZE: usize = 3;
/// Default probability of performing crossover in an iteration
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.95;
/// Default per-gene mutation probability
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;

/// Selection draws this many distinct individuals per iteration
pub const SELECTION_GROUP_SIZE: usize = 3;

/// Fixed seed for reproducible conversion
pub const DEFAULT_SEED: u64 = 42;

// Layer names used inside a layered document
/// Layer holding the source image
pub const ORIGINAL_LAYER: &str = "Original Image";
/// Layer holding the palette source pixels
pub const COLOR_MAP_LAYER: &str = "Color Map";
/// Layer receiving the rendered tiles
pub const APPROXIMATED_LAYER: &str = "Approximated Image";
/// Layer receiving the tile statistics table
pub const STATISTICS_LAYER: &str = "Tiles Statistics";
/// Scratch layer receiving difference images during fitness evaluation
pub const DIFFERENCE_LAYER: &str = "Difference";

// Statistics text should be big enough to read
/// Minimum row height of the statistics table in pixels
pub const MIN_STATISTICS_ROW: u32 = 20;
/// Width of the statistics table measured in rows heights
pub const STATISTICS_COLUMNS: u32 = 10;

// Output settings
/// Suffix added to approximated image filenames
pub const OUTPUT_SUFFIX: &str = "_tiles";
/// Suffix added to statistics image filenames
pub const STATISTICS_SUFFIX: &str = "_statistics";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
