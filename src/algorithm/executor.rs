use crate::{
    algorithm::fitness::{EvaluationLayers, Fitness, RenderedDifference},
    algorithm::genetic::{GeneticConfig, GeneticOptimizer, IterationReport},
    algorithm::matching::match_tiles,
    analysis::palette::{Palette, extract_palette},
    analysis::statistics::TileStatistics,
    io::canvas::{Canvas, Interpolation, LayerId, LayerSource},
    io::configuration::{
        APPROXIMATED_LAYER, COLOR_MAP_LAYER, DEFAULT_TILES, DIFFERENCE_LAYER, ORIGINAL_LAYER,
        STATISTICS_LAYER,
    },
    io::error::{Result, render_failure},
    io::render::{render_assignment, render_numbering, render_statistics, statistics_layer_size},
    spatial::assignment::TileAssignment,
    spatial::geometry::{Grid, plan_grid},
};
use log::{info, warn};
use rand::Rng;
use std::ops::ControlFlow;

/// Strategy used to pick tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OptimizerKind {
    /// Nearest palette color to each tile's average color
    #[default]
    Simple,
    /// Genetic search against the rendered difference
    Genetic,
}

/// Parameters of one image-to-tiles conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionConfig {
    /// Desired number of tiles; the actual count may be higher
    pub requested_tiles: u32,
    /// Tile color strategy
    pub optimizer: OptimizerKind,
    /// Parameters of the genetic strategy
    pub genetic: GeneticConfig,
    /// Write palette numbers on the tiles
    pub numbering: bool,
    /// Draw the per-color statistics layer
    pub statistics: bool,
    /// Resize the original so every tile is a full square
    pub resize: bool,
    /// Resampling filter used by the resize
    pub interpolation: Interpolation,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            requested_tiles: DEFAULT_TILES,
            optimizer: OptimizerKind::default(),
            genetic: GeneticConfig::default(),
            numbering: false,
            statistics: false,
            resize: true,
            interpolation: Interpolation::default(),
        }
    }
}

/// Finished conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Grid the image was split into
    pub grid: Grid,
    /// Palette extracted from the color map
    pub palette: Palette,
    /// Palette index of every tile
    pub assignment: TileAssignment,
    /// Tile counts per palette color
    pub statistics: TileStatistics,
    /// Fitness of the assignment when the genetic strategy produced it
    pub fitness: Option<Fitness>,
    /// Layer holding the rendered tiles
    pub approximated_layer: LayerId,
    /// Layer holding the statistics table, when requested
    pub statistics_layer: Option<LayerId>,
}

/// Converts the original layer of a canvas into palette tiles
///
/// Steps run in order: plan the grid, resize the original, extract the
/// palette, choose tile colors, render the tiles and draw the requested
/// overlays. Geometry and palette problems surface before the original is
/// touched by any optimization work.
pub struct TileConverter<R: Rng> {
    config: ConversionConfig,
    rng: R,
}

impl<R: Rng> TileConverter<R> {
    /// Create a converter drawing all randomness from `rng`
    pub const fn new(config: ConversionConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Configuration in use
    pub const fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run a conversion, observing genetic iterations with `observer`
    ///
    /// The observer is only called by the genetic strategy and may stop the
    /// search early with [`ControlFlow::Break`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The original or color map layer is missing
    /// - The original cannot be split into a grid
    /// - The color map yields no colors
    /// - The genetic parameters are invalid
    /// - Any canvas operation fails
    pub fn convert<C, O>(&mut self, canvas: &mut C, observer: O) -> Result<Conversion>
    where
        C: Canvas + ?Sized,
        O: FnMut(&IterationReport) -> ControlFlow<()>,
    {
        let original = find_layer(canvas, ORIGINAL_LAYER)?;
        let color_map = find_layer(canvas, COLOR_MAP_LAYER)?;

        let (width, height) = canvas.dimensions(original)?;
        let grid = plan_grid(width, height, self.config.requested_tiles)?;
        let plan = grid.resize_plan();

        if self.config.optimizer == OptimizerKind::Genetic {
            self.config.genetic.validate()?;
        }

        if self.config.resize {
            canvas.resize(original, plan.width, plan.height, self.config.interpolation)?;
        }

        let palette = extract_palette(&LayerSource::new(&*canvas, color_map)?)?;
        if palette.len() == 1 {
            warn!("Color map has a single color; every tile will use it");
        }

        info!(
            "Tiling {width}x{height} into {}x{} tiles of {} px ({} tiles, {} colors)",
            grid.columns,
            grid.rows,
            grid.tile_side,
            plan.actual_tiles,
            palette.len()
        );

        let (surface_width, surface_height) = canvas.dimensions(original)?;
        let approximated =
            working_layer(canvas, APPROXIMATED_LAYER, surface_width, surface_height)?;

        let (assignment, fitness) = match self.config.optimizer {
            OptimizerKind::Simple => (match_tiles(&*canvas, original, &grid, &palette)?, None),
            OptimizerKind::Genetic => {
                let difference =
                    working_layer(canvas, DIFFERENCE_LAYER, surface_width, surface_height)?;
                let layers = EvaluationLayers {
                    original,
                    approximation: approximated,
                    difference,
                };
                let mut evaluator = RenderedDifference::new(canvas, layers, grid, &palette);
                let outcome =
                    GeneticOptimizer::new(self.config.genetic, grid, &palette, &mut self.rng)
                        .run(&mut evaluator, observer)?;
                if !outcome.completed {
                    warn!(
                        "Genetic search stopped after {} iterations",
                        outcome.iterations
                    );
                }
                (outcome.assignment, Some(outcome.fitness))
            }
        };

        render_assignment(canvas, approximated, &grid, &palette, &assignment)?;
        if self.config.numbering {
            render_numbering(canvas, approximated, &grid, &palette, &assignment)?;
        }

        let statistics = TileStatistics::tally(&palette, &assignment)?;
        info!(
            "Assignment uses {} of {} colors",
            statistics.colors_used(),
            palette.len()
        );

        let statistics_layer = if self.config.statistics {
            let (table_width, table_height) = statistics_layer_size(&palette, grid.tile_side);
            let layer = working_layer(canvas, STATISTICS_LAYER, table_width, table_height)?;
            render_statistics(canvas, layer, &palette, &statistics, grid.tile_side)?;
            Some(layer)
        } else {
            None
        };

        Ok(Conversion {
            grid,
            palette,
            assignment,
            statistics,
            fitness,
            approximated_layer: approximated,
            statistics_layer,
        })
    }
}

fn find_layer<C: Canvas + ?Sized>(canvas: &C, name: &str) -> Result<LayerId> {
    canvas
        .layer_by_name(name)
        .ok_or_else(|| render_failure("find layer", &format!("no layer named '{name}'")))
}

// Reused layers are resampled so they always match the requested size
fn working_layer<C: Canvas + ?Sized>(
    canvas: &mut C,
    name: &str,
    width: u32,
    height: u32,
) -> Result<LayerId> {
    let layer = canvas.get_or_create_layer(name, width, height)?;
    if canvas.dimensions(layer)? != (width, height) {
        canvas.resize(layer, width, height, Interpolation::Nearest)?;
    }
    Ok(layer)
}
