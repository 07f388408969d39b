use crate::analysis::palette::Color;

/// Squared Euclidean distance between two colors in RGB space
///
/// Ranks colors exactly like the Euclidean distance without the square root.
pub fn squared_euclidean_rgb(a: Color, b: Color) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(&x, &y)| {
            let delta = f64::from(x) - f64::from(y);
            delta * delta
        })
        .sum()
}
