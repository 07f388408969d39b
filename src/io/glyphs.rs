//! Minimal bitmap font for tile numbers and statistics labels
//!
//! Glyphs are 3x5 cells scaled by an integer factor. Only the characters
//! needed for numbers and `(r, g, b)` tuples are defined; anything else
//! advances the cursor without drawing.

use crate::analysis::palette::Color;
use image::{Rgb, RgbImage};

/// Glyph width in font units
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in font units
pub const GLYPH_HEIGHT: u32 = 5;
// One unit of spacing between glyphs and below the baseline
const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;
const CELL_HEIGHT: u32 = GLYPH_HEIGHT + 1;

/// Bit rows of a glyph, most significant of the low three bits is the left column
pub const fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0b000; 5],
        _ => return None,
    };
    Some(rows)
}

/// Pixel size of one font unit for a requested text height
pub fn scale_for(size: u32) -> u32 {
    (size / CELL_HEIGHT).max(1)
}

/// Draw `text` with its top-left corner at `(x, y)`, clipped to the image
pub fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, size: u32, color: Color) {
    let scale = scale_for(size);
    let fill = Rgb::from(color);
    let mut cursor = x;

    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, bits) in (0u32..).zip(rows) {
                for column in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - column)) != 0 {
                        fill_block(
                            image,
                            cursor.saturating_add(column * scale),
                            y.saturating_add(row * scale),
                            scale,
                            fill,
                        );
                    }
                }
            }
        }
        cursor = cursor.saturating_add(CELL_WIDTH * scale);
    }
}

fn fill_block(image: &mut RgbImage, x: u32, y: u32, scale: u32, fill: Rgb<u8>) {
    let right = x.saturating_add(scale).min(image.width());
    let bottom = y.saturating_add(scale).min(image.height());
    for py in y..bottom {
        for px in x..right {
            image.put_pixel(px, py, fill);
        }
    }
}
