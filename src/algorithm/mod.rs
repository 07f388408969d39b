/// Conversion pipeline from original layer to rendered tiles
pub mod executor;
/// Fitness values and rendered-difference evaluation
pub mod fitness;
/// Genetic search over tile assignments
pub mod genetic;
/// Greedy nearest-color matching
pub mod matching;
/// Triple selection with elitist role assignment
pub mod selection;
/// Crossover and mutation operators
pub mod variation;
