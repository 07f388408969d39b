//! Steady-state genetic search over tile assignments
//!
//! Each iteration picks three distinct individuals, lets the two fitter ones
//! act as parents and overwrites the weakest with their offspring after
//! crossover, mutation and re-evaluation. A run performs
//! `generations * population_size` iterations.

use crate::algorithm::fitness::{Fitness, FitnessEvaluator};
use crate::algorithm::selection::select;
use crate::algorithm::variation::{crossover, mutate};
use crate::analysis::palette::Palette;
use crate::io::configuration::{
    DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE, DEFAULT_POPULATION_SIZE,
    SELECTION_GROUP_SIZE,
};
use crate::io::error::{Result, TilingError, WithContext, computation_error, invalid_parameter};
use crate::spatial::assignment::TileAssignment;
use crate::spatial::geometry::Grid;
use log::{debug, info};
use rand::Rng;
use std::ops::ControlFlow;

/// Which individual a finished run returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPolicy {
    /// The lowest-cost individual evaluated during the run
    #[default]
    BestEvaluated,
    /// The individual picked at random before the run started, in its final
    /// state, regardless of cost
    Nominated,
}

/// Genetic algorithm parameters
///
/// Rates are used directly as probabilities; values outside `[0, 1]` behave
/// as never or always.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticConfig {
    /// Number of generations; each generation is `population_size` iterations
    pub generations: usize,
    /// Number of individuals, at least three
    pub population_size: usize,
    /// Probability that an iteration performs crossover
    pub crossover_rate: f64,
    /// Per-gene probability of mutation
    pub mutation_rate: f64,
    /// Which individual to return
    pub result_policy: ResultPolicy,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            result_policy: ResultPolicy::default(),
        }
    }
}

impl GeneticConfig {
    /// Total number of iterations of a run
    ///
    /// # Errors
    ///
    /// Returns an error if `generations * population_size` overflows
    pub fn iterations(&self) -> Result<usize> {
        self.generations
            .checked_mul(self.population_size)
            .ok_or_else(|| {
                invalid_parameter(
                    "generations",
                    &self.generations,
                    &format!(
                        "iteration count overflows with population size {}",
                        self.population_size
                    ),
                )
            })
    }

    /// Check the parameters before any work is done
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::PopulationTooSmall`] below three individuals, or
    /// an error if the iteration count overflows
    pub fn validate(&self) -> Result<()> {
        if self.population_size < SELECTION_GROUP_SIZE {
            return Err(TilingError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        self.iterations().map(|_| ())
    }
}

/// Candidate assignments and their fitness, index-aligned
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<TileAssignment>,
    fitness: Vec<Fitness>,
}

impl Population {
    /// `size` random individuals, all unevaluated
    pub fn random<R: Rng>(size: usize, grid: &Grid, palette_len: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| TileAssignment::random(grid, palette_len, rng))
            .collect();
        Self {
            individuals,
            fitness: vec![Fitness::Unevaluated; size],
        }
    }

    /// Number of individuals
    pub const fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty
    pub const fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individual at `index`
    pub fn individual(&self, index: usize) -> Option<&TileAssignment> {
        self.individuals.get(index)
    }

    /// Fitness of the individual at `index`
    pub fn fitness(&self, index: usize) -> Option<Fitness> {
        self.fitness.get(index).copied()
    }

    /// Fitness values in population order
    pub fn fitness_values(&self) -> &[Fitness] {
        &self.fitness
    }

    /// Overwrite the individual at `index` and its fitness
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is outside the population
    pub fn replace(
        &mut self,
        index: usize,
        individual: TileAssignment,
        fitness: Fitness,
    ) -> Result<()> {
        let size = self.len();
        match (self.individuals.get_mut(index), self.fitness.get_mut(index)) {
            (Some(slot), Some(score)) => {
                *slot = individual;
                *score = fitness;
                Ok(())
            }
            _ => Err(invalid_parameter(
                "index",
                &index,
                &format!("population has {size} individuals"),
            )),
        }
    }

    /// Index and fitness of the currently fittest individual
    ///
    /// Ties resolve to the lowest index.
    pub fn fittest(&self) -> Option<(usize, Fitness)> {
        self.fitness
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (index, fitness)| match best {
                Some((_, best_fitness)) if !fitness.is_better_than(best_fitness) => best,
                _ => Some((index, fitness)),
            })
    }
}

/// Progress of a run after one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Zero-based iteration that just finished
    pub iteration: usize,
    /// Total iterations of the run
    pub total: usize,
    /// Population index that was overwritten
    pub child: usize,
    /// Fitness of the new child
    pub fitness: Fitness,
    /// Lowest cost evaluated so far
    pub best: Fitness,
}

/// Result of a genetic run
#[derive(Debug, Clone)]
pub struct GeneticOutcome {
    /// Assignment chosen by the result policy
    pub assignment: TileAssignment,
    /// Fitness of the returned assignment
    pub fitness: Fitness,
    /// Lowest cost evaluated during the run
    pub best_fitness: Fitness,
    /// Iterations actually performed
    pub iterations: usize,
    /// False when an observer stopped the run early
    pub completed: bool,
}

/// Genetic optimizer over a fixed grid and palette
pub struct GeneticOptimizer<'a, R: Rng> {
    config: GeneticConfig,
    grid: Grid,
    palette: &'a Palette,
    rng: &'a mut R,
}

impl<'a, R: Rng> GeneticOptimizer<'a, R> {
    /// Create an optimizer drawing all randomness from `rng`
    pub const fn new(
        config: GeneticConfig,
        grid: Grid,
        palette: &'a Palette,
        rng: &'a mut R,
    ) -> Self {
        Self {
            config,
            grid,
            palette,
            rng,
        }
    }

    /// Run every iteration without observing progress
    ///
    /// # Errors
    ///
    /// See [`GeneticOptimizer::run`]
    pub fn run_to_completion<E: FitnessEvaluator + ?Sized>(
        &mut self,
        evaluator: &mut E,
    ) -> Result<GeneticOutcome> {
        self.run(evaluator, |_| ControlFlow::Continue(()))
    }

    /// Evolve a random population and return the individual selected by the
    /// configured [`ResultPolicy`]
    ///
    /// `observer` is called after every iteration and may stop the run early
    /// by returning [`ControlFlow::Break`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population has fewer than three individuals
    /// - The iteration count overflows
    /// - The evaluator fails; the run is aborted without a result
    /// - The evaluator returns a negative or non-finite cost
    pub fn run<E, O>(&mut self, evaluator: &mut E, mut observer: O) -> Result<GeneticOutcome>
    where
        E: FitnessEvaluator + ?Sized,
        O: FnMut(&IterationReport) -> ControlFlow<()>,
    {
        self.config.validate()?;
        let total = self.config.iterations()?;
        let size = self.config.population_size;
        let palette_len = self.palette.len();

        let mut population = Population::random(size, &self.grid, palette_len, self.rng);
        let nominated = self.rng.random_range(0..size);
        let mut best: Option<(TileAssignment, Fitness)> = None;

        info!(
            "Genetic search: {size} individuals, {total} iterations, {} genes, {palette_len} colors",
            self.grid.tile_count()
        );

        let mut performed = 0;
        let mut completed = true;
        for iteration in 0..total {
            let selection = select(population.fitness_values(), self.rng)?;

            let mut offspring = population
                .individual(selection.child)
                .cloned()
                .ok_or_else(|| computation_error("selection", &"child index out of range"))?;
            let (Some(parent1), Some(parent2)) = (
                population.individual(selection.parent1),
                population.individual(selection.parent2),
            ) else {
                return Err(computation_error("selection", &"parent index out of range"));
            };

            crossover(
                self.config.crossover_rate,
                &mut offspring,
                parent1,
                parent2,
                self.rng,
            );
            mutate(self.config.mutation_rate, palette_len, &mut offspring, self.rng);

            let cost = evaluator.evaluate(&offspring).with_iteration(iteration)?;
            let fitness = checked_fitness(cost, iteration)?;

            if fitness.is_better_than(best_of(best.as_ref())) {
                best = Some((offspring.clone(), fitness));
            }
            population.replace(selection.child, offspring, fitness)?;
            performed += 1;

            let best_fitness = best_of(best.as_ref());
            if performed % size == 0 {
                let current = population
                    .fittest()
                    .map_or(Fitness::Unevaluated, |(_, found)| found);
                debug!(
                    "Generation {} finished, best cost {best_fitness}, population best {current}",
                    performed / size
                );
            }

            let report = IterationReport {
                iteration,
                total,
                child: selection.child,
                fitness,
                best: best_fitness,
            };
            if observer(&report).is_break() {
                completed = false;
                break;
            }
        }

        let best_fitness = best_of(best.as_ref());
        let (assignment, fitness) = if let (ResultPolicy::BestEvaluated, Some(found)) =
            (self.config.result_policy, best)
        {
            found
        } else {
            let assignment = population
                .individual(nominated)
                .cloned()
                .ok_or_else(|| computation_error("result", &"nominated index out of range"))?;
            (assignment, population.fitness(nominated).unwrap_or_default())
        };

        info!("Genetic search finished after {performed} iterations, returning cost {fitness}");
        Ok(GeneticOutcome {
            assignment,
            fitness,
            best_fitness,
            iterations: performed,
            completed,
        })
    }
}

fn best_of(best: Option<&(TileAssignment, Fitness)>) -> Fitness {
    best.map_or(Fitness::Unevaluated, |(_, fitness)| *fitness)
}

// Costs outside [0, inf) would break the ordering elitism relies on
fn checked_fitness(cost: f64, iteration: usize) -> Result<Fitness> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(Fitness::Evaluated(cost))
    } else {
        Err(computation_error(
            "fitness evaluation",
            &format!("iteration {iteration} produced cost {cost}"),
        ))
    }
}
