//! Uniform crossover and per-gene mutation of tile assignments

use crate::math::probability::{bernoulli, fair_coin};
use crate::spatial::assignment::TileAssignment;
use rand::Rng;

/// Uniform crossover applied with probability `rate`
///
/// A single trial decides whether crossover happens at all. When it does,
/// every gene of `child` is replaced by the gene at the same position of
/// `parent1` or `parent2`, chosen by a fair coin per position. Returns
/// whether crossover took place.
pub fn crossover<R: Rng>(
    rate: f64,
    child: &mut TileAssignment,
    parent1: &TileAssignment,
    parent2: &TileAssignment,
    rng: &mut R,
) -> bool {
    if !bernoulli(rng, rate) {
        return false;
    }

    for ((gene, first), second) in child.iter_mut().zip(parent1.iter()).zip(parent2.iter()) {
        *gene = if fair_coin(rng) { first } else { second };
    }
    true
}

/// Replace each gene with probability `rate` by a uniformly random palette index
///
/// Returns the number of genes that were redrawn.
pub fn mutate<R: Rng>(
    rate: f64,
    palette_len: usize,
    child: &mut TileAssignment,
    rng: &mut R,
) -> usize {
    if palette_len == 0 {
        return 0;
    }

    let mut redrawn = 0;
    for gene in child.iter_mut() {
        if bernoulli(rng, rate) {
            *gene = rng.random_range(0..palette_len);
            redrawn += 1;
        }
    }
    redrawn
}
