use rand::Rng;

/// Single Bernoulli trial succeeding with probability `probability`
///
/// Rates outside `[0, 1]` are not rejected: values at or below zero (and NaN)
/// never succeed, values at or above one always succeed.
pub fn bernoulli<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Fair coin flip
pub fn fair_coin<R: Rng>(rng: &mut R) -> bool {
    rng.random::<bool>()
}
