//! Fitness of candidate tile assignments
//!
//! Cost is the mean of the per-channel average intensities of the difference
//! between the original layer and a rendering of the candidate. Lower is
//! better and a pixel-perfect match costs zero.

use crate::analysis::palette::Palette;
use crate::io::canvas::{Canvas, LayerId};
use crate::io::error::{Result, computation_error};
use crate::io::render::render_assignment;
use crate::spatial::assignment::TileAssignment;
use crate::spatial::geometry::{Grid, Rect};
use std::fmt;

/// Fitness of one individual
///
/// `Unevaluated` orders above every evaluated cost, so an individual that was
/// never scored is always the worst candidate during selection. Two
/// unevaluated individuals compare as equal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub enum Fitness {
    /// Cost returned by the evaluator
    Evaluated(f64),
    /// Not scored yet
    #[default]
    Unevaluated,
}

impl Fitness {
    /// Cost if the individual was evaluated
    pub const fn cost(self) -> Option<f64> {
        match self {
            Self::Evaluated(cost) => Some(cost),
            Self::Unevaluated => None,
        }
    }

    /// Whether `self` is strictly better (lower) than `other`
    pub fn is_better_than(self, other: Self) -> bool {
        self < other
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluated(cost) => write!(f, "{cost:.4}"),
            Self::Unevaluated => write!(f, "unevaluated"),
        }
    }
}

/// Scores candidate assignments
///
/// Evaluation may be slow and may block on an external surface; callers
/// invoke it synchronously, one candidate at a time.
pub trait FitnessEvaluator {
    /// Cost of `candidate`, never negative
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or diffing fails
    fn evaluate(&mut self, candidate: &TileAssignment) -> Result<f64>;
}

impl<F> FitnessEvaluator for F
where
    F: FnMut(&TileAssignment) -> Result<f64>,
{
    fn evaluate(&mut self, candidate: &TileAssignment) -> Result<f64> {
        self(candidate)
    }
}

/// Layers used by [`RenderedDifference`]
#[derive(Debug, Clone, Copy)]
pub struct EvaluationLayers {
    /// Source image the candidate should resemble
    pub original: LayerId,
    /// Layer the candidate is rendered onto
    pub approximation: LayerId,
    /// Scratch layer receiving the difference image
    pub difference: LayerId,
}

/// Fitness evaluator that renders candidates onto a canvas and diffs them
/// against the original layer
pub struct RenderedDifference<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    layers: EvaluationLayers,
    grid: Grid,
    palette: &'a Palette,
    evaluations: usize,
}

impl<'a, C: Canvas + ?Sized> RenderedDifference<'a, C> {
    /// Evaluator drawing on `canvas` with a fixed grid and palette
    pub const fn new(
        canvas: &'a mut C,
        layers: EvaluationLayers,
        grid: Grid,
        palette: &'a Palette,
    ) -> Self {
        Self {
            canvas,
            layers,
            grid,
            palette,
            evaluations: 0,
        }
    }

    /// Number of candidates evaluated so far
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl<C: Canvas + ?Sized> FitnessEvaluator for RenderedDifference<'_, C> {
    fn evaluate(&mut self, candidate: &TileAssignment) -> Result<f64> {
        let EvaluationLayers {
            original,
            approximation,
            difference,
        } = self.layers;

        render_assignment(
            &mut *self.canvas,
            approximation,
            &self.grid,
            self.palette,
            candidate,
        )?;
        self.canvas
            .compose_difference(original, approximation, difference)?;

        let (width, height) = self.canvas.dimensions(difference)?;
        let means = self
            .canvas
            .channel_means(difference, Rect::new(0, 0, width, height))?;
        self.evaluations += 1;

        let cost = means.iter().sum::<f64>() / 3.0;
        if !cost.is_finite() || cost < 0.0 {
            return Err(computation_error(
                "fitness evaluation",
                &format!("difference image produced cost {cost}"),
            ));
        }
        Ok(cost)
    }
}
