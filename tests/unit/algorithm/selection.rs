//! Tests for distinct selection and elitist role assignment

#[cfg(test)]
mod tests {
    use imagetiles::TilingError;
    use imagetiles::algorithm::fitness::Fitness;
    use imagetiles::algorithm::selection::{Selection, select, select_distinct};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn evaluated(costs: &[f64]) -> Vec<Fitness> {
        costs.iter().copied().map(Fitness::Evaluated).collect()
    }

    // Tests the best individual moves into the parent roles
    // Verified by comparing the child against parent2 first
    #[test]
    fn test_elitism_child_best() {
        let fitness = evaluated(&[1.0, 2.0, 3.0]);
        let selection = Selection {
            child: 0,
            parent1: 1,
            parent2: 2,
        };

        let adjusted = selection.with_elitism(&fitness);

        assert_eq!(
            adjusted,
            Selection {
                child: 2,
                parent1: 0,
                parent2: 1
            }
        );
    }

    // Tests an already worst child keeps all roles
    // Verified by swapping on ties
    #[test]
    fn test_elitism_child_worst() {
        let fitness = evaluated(&[9.0, 2.0, 3.0]);
        let selection = Selection {
            child: 0,
            parent1: 1,
            parent2: 2,
        };

        assert_eq!(selection.with_elitism(&fitness), selection);
    }

    // Tests ties and unevaluated individuals keep roles
    // Verified by using <= in the fitness comparison
    #[test]
    fn test_elitism_ties() {
        let tied = evaluated(&[5.0, 5.0, 5.0]);
        let unevaluated = vec![Fitness::Unevaluated; 3];
        let selection = Selection {
            child: 0,
            parent1: 1,
            parent2: 2,
        };

        assert_eq!(selection.with_elitism(&tied), selection);
        assert_eq!(selection.with_elitism(&unevaluated), selection);
    }

    // Tests an evaluated child swaps with the first unevaluated parent only
    // Verified by swapping with every parent that is not strictly worse
    #[test]
    fn test_elitism_unevaluated_parents() {
        let fitness = vec![
            Fitness::Evaluated(1.0),
            Fitness::Unevaluated,
            Fitness::Unevaluated,
        ];
        let selection = Selection {
            child: 0,
            parent1: 1,
            parent2: 2,
        };

        let adjusted = selection.with_elitism(&fitness);

        assert_eq!(adjusted.child, 1);
        assert_eq!(adjusted.parent1, 0);
        assert_eq!(adjusted.parent2, 2);
        assert_eq!(fitness[adjusted.child], Fitness::Unevaluated);
    }

    // Tests drawn indices are distinct and inside the population
    // Verified by drawing three independent indices
    #[test]
    fn test_select_distinct() {
        let mut rng = StdRng::seed_from_u64(11);

        for size in [3, 4, 10] {
            for _ in 0..200 {
                let selection = select_distinct(size, &mut rng).expect("large enough");
                let picked = [selection.child, selection.parent1, selection.parent2];

                assert!(picked.iter().all(|&index| index < size));
                assert_ne!(picked[0], picked[1]);
                assert_ne!(picked[0], picked[2]);
                assert_ne!(picked[1], picked[2]);
            }
        }
    }

    // Tests populations below three are rejected
    // Verified by lowering the group size constant
    #[test]
    fn test_select_distinct_too_small() {
        let mut rng = StdRng::seed_from_u64(0);

        for size in 0..3 {
            assert!(matches!(
                select_distinct(size, &mut rng),
                Err(TilingError::PopulationTooSmall { size: reported }) if reported == size
            ));
        }
    }

    // Tests the child is never fitter than either parent
    // Verified by skipping elitism in select
    #[test]
    fn test_select_child_is_weakest() {
        let mut rng = StdRng::seed_from_u64(5);
        let fitness = evaluated(&[4.0, 1.0, 7.0, 3.0, 0.5, 9.0]);

        for _ in 0..200 {
            let selection = select(&fitness, &mut rng).expect("large enough");
            let child = fitness[selection.child];

            assert!(!child.is_better_than(fitness[selection.parent1]));
            assert!(!child.is_better_than(fitness[selection.parent2]));
        }
    }
}
