//! Tests for command-line parsing and file processing

#[cfg(test)]
mod tests {
    use crate::{RED, solid_image};
    use clap::Parser;
    use imagetiles::TilingError;
    use imagetiles::algorithm::executor::OptimizerKind;
    use imagetiles::algorithm::genetic::ResultPolicy;
    use imagetiles::io::canvas::Interpolation;
    use imagetiles::io::cli::{Cli, FileProcessor};
    use imagetiles::io::configuration::{
        DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_POPULATION_SIZE, DEFAULT_SEED,
        DEFAULT_TILES,
    };
    use std::ffi::OsStr;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Tests CLI parsing with only the required arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.png", "--color-map", "colors.png"]);

        assert_eq!(cli.target, PathBuf::from("photo.png"));
        assert_eq!(cli.color_map, PathBuf::from("colors.png"));
        assert_eq!(cli.tiles, DEFAULT_TILES);
        assert_eq!(cli.optimizer, OptimizerKind::Simple);
        assert_eq!(cli.generations, DEFAULT_GENERATIONS);
        assert_eq!(cli.population, DEFAULT_POPULATION_SIZE);
        assert!((cli.crossover_rate - DEFAULT_CROSSOVER_RATE).abs() < f64::EPSILON);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with every option set
    // Verified by swapping short flags between options
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "images",
            "-c",
            "map.png",
            "-t",
            "120",
            "-o",
            "genetic",
            "-g",
            "15",
            "-p",
            "12",
            "--crossover-rate",
            "0.5",
            "--mutation-rate",
            "0.2",
            "--return-nominated",
            "-n",
            "-S",
            "--no-resize",
            "-s",
            "9",
            "-q",
            "--no-skip",
        ]);

        let config = cli.conversion_config();
        assert_eq!(config.requested_tiles, 120);
        assert_eq!(config.optimizer, OptimizerKind::Genetic);
        assert_eq!(config.genetic.generations, 15);
        assert_eq!(config.genetic.population_size, 12);
        assert!((config.genetic.crossover_rate - 0.5).abs() < f64::EPSILON);
        assert!((config.genetic.mutation_rate - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.genetic.result_policy, ResultPolicy::Nominated);
        assert!(config.numbering);
        assert!(config.statistics);
        assert!(!config.resize);
        assert_eq!(config.interpolation, Interpolation::Lanczos);
        assert_eq!(cli.seed, 9);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
    }

    // Tests the color map is required and the optimizer is validated
    // Verified by giving the color map a default value
    #[test]
    fn test_cli_parse_errors() {
        assert!(Cli::try_parse_from(["program", "photo.png"]).is_err());
        assert!(
            Cli::try_parse_from(["program", "photo.png", "-c", "map.png", "-o", "annealing"])
                .is_err()
        );
    }

    // Tests output names keep the directory and extension
    // Verified by dropping the parent directory
    #[test]
    fn test_output_paths() {
        let input = Path::new("some/dir/photo.png");

        assert_eq!(
            FileProcessor::get_output_path(input),
            PathBuf::from("some/dir/photo_tiles.png")
        );
        assert_eq!(
            FileProcessor::get_statistics_path(input),
            PathBuf::from("some/dir/photo_statistics.png")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("photo.png")),
            PathBuf::from("photo_tiles.png")
        );
    }

    // Tests a zero tile count is rejected before any file is read
    // Verified by removing the tile count check
    #[test]
    fn test_process_rejects_zero_tiles() {
        let cli = Cli::parse_from(["program", "missing.png", "-c", "map.png", "-t", "0", "-q"]);

        let result = FileProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(TilingError::InvalidParameter {
                parameter: "tiles",
                ..
            })
        ));
    }

    // Tests genetic parameters are validated up front
    // Verified by validating only when files are processed
    #[test]
    fn test_process_rejects_small_population() {
        let cli = Cli::parse_from([
            "program", "missing.png", "-c", "map.png", "-o", "genetic", "-p", "2", "-q",
        ]);

        let result = FileProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(TilingError::PopulationTooSmall { size: 2 })
        ));
    }

    // Tests non-PNG and missing targets are rejected
    // Verified by treating every file as an image
    #[test]
    fn test_process_rejects_invalid_target() {
        let dir = TempDir::new().expect("temp dir");
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "not an image").expect("write file");
        let missing = dir.path().join("missing.png");

        for target in [&text, &missing] {
            let cli = Cli::parse_from([
                OsStr::new("program"),
                target.as_os_str(),
                OsStr::new("-c"),
                OsStr::new("map.png"),
                OsStr::new("-q"),
            ]);
            assert!(FileProcessor::new(cli).process().is_err());
        }
    }

    // Tests a single file is converted next to its input
    // Verified by writing the output into the working directory
    #[test]
    fn test_process_single_file() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("photo.png");
        let colors = dir.path().join("map.png");
        solid_image(6, 6, RED).save(&input).expect("save png");
        solid_image(1, 1, RED).save(&colors).expect("save png");

        let cli = Cli::parse_from([
            OsStr::new("program"),
            input.as_os_str(),
            OsStr::new("-c"),
            colors.as_os_str(),
            OsStr::new("-q"),
        ]);
        FileProcessor::new(cli).process().expect("conversion succeeds");

        assert!(dir.path().join("photo_tiles.png").exists());
        assert!(!dir.path().join("photo_statistics.png").exists());
    }
}
