//! Command-line interface for batch converting PNG files into tile images

use crate::algorithm::executor::{ConversionConfig, OptimizerKind, TileConverter};
use crate::algorithm::genetic::{GeneticConfig, ResultPolicy};
use crate::io::canvas::Interpolation;
use crate::io::configuration::{
    COLOR_MAP_LAYER, DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE,
    DEFAULT_POPULATION_SIZE, DEFAULT_SEED, DEFAULT_TILES, ORIGINAL_LAYER, OUTPUT_SUFFIX,
    STATISTICS_SUFFIX,
};
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::io::image::{export_layer, load_document};
use crate::io::progress::ProgressManager;
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "imagetiles")]
#[command(
    author,
    version,
    about = "Convert raster images into tiles of a fixed color palette"
)]
/// Command-line arguments for the tiles converter
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// PNG whose distinct pixel colors form the tile palette
    #[arg(short, long, value_name = "PNG")]
    pub color_map: PathBuf,

    /// Desired number of tiles
    #[arg(short, long, default_value_t = DEFAULT_TILES)]
    pub tiles: u32,

    /// Strategy used to choose tile colors
    #[arg(short, long, value_enum, default_value_t = OptimizerKind::Simple)]
    pub optimizer: OptimizerKind,

    /// Number of genetic algorithm generations
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Genetic algorithm population size
    #[arg(short, long, default_value_t = DEFAULT_POPULATION_SIZE)]
    pub population: usize,

    /// Genetic algorithm crossover rate
    #[arg(long, default_value_t = DEFAULT_CROSSOVER_RATE)]
    pub crossover_rate: f64,

    /// Genetic algorithm mutation rate
    #[arg(long, default_value_t = DEFAULT_MUTATION_RATE)]
    pub mutation_rate: f64,

    /// Return the individual nominated before the search instead of the best one found
    #[arg(long)]
    pub return_nominated: bool,

    /// Write palette numbers on the tiles
    #[arg(short, long)]
    pub numbering: bool,

    /// Export a per-color statistics table
    #[arg(short = 'S', long)]
    pub statistics: bool,

    /// Keep the original size instead of resizing to fit whole tiles
    #[arg(long)]
    pub no_resize: bool,

    /// Random seed for reproducible conversion
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Conversion parameters described by the arguments
    pub const fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig {
            requested_tiles: self.tiles,
            optimizer: self.optimizer,
            genetic: GeneticConfig {
                generations: self.generations,
                population_size: self.population,
                crossover_rate: self.crossover_rate,
                mutation_rate: self.mutation_rate,
                result_policy: if self.return_nominated {
                    ResultPolicy::Nominated
                } else {
                    ResultPolicy::BestEvaluated
                },
            },
            numbering: self.numbering,
            statistics: self.statistics,
            resize: !self.no_resize,
            interpolation: Interpolation::Lanczos,
        }
    }
}

/// Orchestrates batch conversion of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.tiles == 0 {
            return Err(invalid_parameter(
                "tiles",
                &self.cli.tiles,
                &"at least one tile is required",
            ));
        }
        if self.cli.optimizer == OptimizerKind::Genetic {
            self.cli.conversion_config().genetic.validate()?;
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let read_error = |source: std::io::Error| TilingError::FileSystem {
                path: self.cli.target.clone(),
                operation: "read directory",
                source,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if is_png(&path) && !self.is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    // Outputs of earlier runs and the color map itself are not inputs.
    // A suffixed name only marks an output while its source is still present.
    fn is_generated(&self, path: &Path) -> bool {
        same_file(path, &self.cli.color_map)
            || [OUTPUT_SUFFIX, STATISTICS_SUFFIX]
                .iter()
                .filter_map(|suffix| source_path(path, suffix))
                .any(|source| source.is_file())
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.conversion_config();

        let iterations = match config.optimizer {
            OptimizerKind::Simple => 0,
            OptimizerKind::Genetic => config.genetic.iterations()?,
        };
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, iterations);
        }

        let mut document = load_document(
            input_path,
            &self.cli.color_map,
            ORIGINAL_LAYER,
            COLOR_MAP_LAYER,
        )?;

        let mut converter = TileConverter::new(config, StdRng::seed_from_u64(self.cli.seed));
        let progress = self.progress_manager.as_ref();
        let conversion = converter.convert(&mut document, |report| {
            if let Some(pm) = progress {
                pm.update_iteration(report);
            }
            ControlFlow::Continue(())
        })?;

        export_layer(
            &document,
            conversion.approximated_layer,
            &Self::get_output_path(input_path),
        )?;

        if let Some(layer) = conversion.statistics_layer {
            export_layer(&document, layer, &Self::get_statistics_path(input_path))?;
        }

        info!(
            "Converted {} into {} tiles in {:.2?}",
            input_path.display(),
            conversion.assignment.len(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    /// Path of the approximated image written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX)
    }

    /// Path of the statistics image written for `input_path`
    pub fn get_statistics_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, STATISTICS_SUFFIX)
    }

    fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            suffix,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Input that would have produced `path` as its `suffix` output
fn source_path(path: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let source_stem = stem.strip_suffix(suffix)?;
    let extension = path.extension()?.to_str()?;
    Some(path.with_file_name(format!("{source_stem}.{extension}")))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
