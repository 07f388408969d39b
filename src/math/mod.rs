//! Mathematical utilities for color matching and stochastic operators

/// Color distances in RGB space
pub mod distance;
/// Bernoulli trials with lenient probability handling
pub mod probability;
