//! Palette extraction from a color map source
//!
//! Colors are deduplicated in first-seen order of a row-major scan, so the
//! palette (and the 1-based numbers shown to users) is reproducible for
//! identical color maps.

use crate::io::error::{Result, TilingError, render_failure};
use image::{Rgb, RgbImage};
use std::collections::HashSet;
use std::fmt;

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise complement, used for text drawn on top of a tile
    #[must_use]
    pub const fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Channels as an array in RGB order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.channels())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Anything that can be read pixel by pixel over a rectangular region
pub trait ColorSource {
    /// Width and height of the readable region
    fn dimensions(&self) -> (u32, u32);

    /// Color of the pixel at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel cannot be read
    fn color_at(&self, x: u32, y: u32) -> Result<Color>;
}

impl ColorSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn color_at(&self, x: u32, y: u32) -> Result<Color> {
        self.get_pixel_checked(x, y)
            .copied()
            .map(Color::from)
            .ok_or_else(|| {
                render_failure("read pixel", &format!("({x}, {y}) is outside the image"))
            })
    }
}

/// Ordered set of distinct tile colors
///
/// Never empty and never contains the same color twice. Indices into the
/// palette are the genes of a [`crate::spatial::assignment::TileAssignment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette from colors, keeping the first occurrence of duplicates
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::EmptyPalette`] if `colors` yields nothing
    pub fn from_colors<I>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut seen = HashSet::new();
        let colors: Vec<Color> = colors
            .into_iter()
            .filter(|color| seen.insert(*color))
            .collect();

        if colors.is_empty() {
            return Err(TilingError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Number of distinct colors
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors; never true after construction
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at palette index `index`
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Colors in palette order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Iterate colors in palette order
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Scan every pixel of `source` once and collect its distinct colors
///
/// # Errors
///
/// Returns an error if a pixel read fails or the source has no pixels
pub fn extract_palette<S: ColorSource + ?Sized>(source: &S) -> Result<Palette> {
    let (width, height) = source.dimensions();
    let mut colors = Vec::new();
    let mut seen = HashSet::new();

    for y in 0..height {
        for x in 0..width {
            let color = source.color_at(x, y)?;
            if seen.insert(color) {
                colors.push(color);
            }
        }
    }

    Palette::from_colors(colors)
}
