//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use imagetiles::io::configuration::{
        APPROXIMATED_LAYER, COLOR_MAP_LAYER, DEFAULT_CROSSOVER_RATE, DEFAULT_MUTATION_RATE,
        DEFAULT_POPULATION_SIZE, DEFAULT_TILES, DIFFERENCE_LAYER, MIN_STATISTICS_ROW,
        ORIGINAL_LAYER, OUTPUT_SUFFIX, SELECTION_GROUP_SIZE, STATISTICS_LAYER, STATISTICS_SUFFIX,
    };
    use std::collections::HashSet;

    // Tests defaults form a runnable configuration
    // Verified by lowering the default population below the group size
    #[test]
    fn test_defaults_are_runnable() {
        assert!(DEFAULT_TILES > 0);
        assert!(DEFAULT_POPULATION_SIZE >= SELECTION_GROUP_SIZE);
        assert!((0.0..=1.0).contains(&DEFAULT_CROSSOVER_RATE));
        assert!((0.0..=1.0).contains(&DEFAULT_MUTATION_RATE));
        assert!(MIN_STATISTICS_ROW > 0);
    }

    // Tests layer names and output suffixes do not collide
    // Verified by reusing a layer name
    #[test]
    fn test_names_are_distinct() {
        let layers: HashSet<_> = [
            ORIGINAL_LAYER,
            COLOR_MAP_LAYER,
            APPROXIMATED_LAYER,
            STATISTICS_LAYER,
            DIFFERENCE_LAYER,
        ]
        .into_iter()
        .collect();

        assert_eq!(layers.len(), 5);
        assert_ne!(OUTPUT_SUFFIX, STATISTICS_SUFFIX);
    }
}
