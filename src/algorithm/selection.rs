//! Parent and child selection with elitist role assignment

use crate::algorithm::fitness::Fitness;
use crate::io::configuration::SELECTION_GROUP_SIZE;
use crate::io::error::{Result, TilingError};
use rand::Rng;
use rand::seq::index::sample;

/// Population indices chosen for one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Individual that will be overwritten by the offspring
    pub child: usize,
    /// First parent
    pub parent1: usize,
    /// Second parent
    pub parent2: usize,
}

impl Selection {
    /// Reassign roles so the child is never strictly the fittest of the three
    ///
    /// Whenever the child is better than a parent the two swap roles; the
    /// child is compared against `parent1` first and then against `parent2`.
    /// Equal fitness, including two unevaluated individuals, keeps roles.
    #[must_use]
    pub fn with_elitism(mut self, fitness: &[Fitness]) -> Self {
        let fitness_of = |index: usize| fitness.get(index).copied().unwrap_or_default();

        if fitness_of(self.child).is_better_than(fitness_of(self.parent1)) {
            std::mem::swap(&mut self.child, &mut self.parent1);
        }
        if fitness_of(self.child).is_better_than(fitness_of(self.parent2)) {
            std::mem::swap(&mut self.child, &mut self.parent2);
        }
        self
    }
}

/// Draw three pairwise-distinct individuals uniformly at random
///
/// # Errors
///
/// Returns [`TilingError::PopulationTooSmall`] for populations below three
pub fn select_distinct<R: Rng>(population_size: usize, rng: &mut R) -> Result<Selection> {
    if population_size < SELECTION_GROUP_SIZE {
        return Err(TilingError::PopulationTooSmall {
            size: population_size,
        });
    }

    let picked = sample(rng, population_size, SELECTION_GROUP_SIZE);
    Ok(Selection {
        child: picked.index(0),
        parent1: picked.index(1),
        parent2: picked.index(2),
    })
}

/// Select three individuals and assign roles by elitism
///
/// # Errors
///
/// Returns [`TilingError::PopulationTooSmall`] for populations below three
pub fn select<R: Rng>(fitness: &[Fitness], rng: &mut R) -> Result<Selection> {
    Ok(select_distinct(fitness.len(), rng)?.with_elitism(fitness))
}
