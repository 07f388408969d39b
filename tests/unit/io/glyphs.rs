//! Tests for the bitmap font

#[cfg(test)]
mod tests {
    use crate::{RED, solid_image};
    use imagetiles::analysis::palette::Color;
    use imagetiles::io::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_text, glyph, scale_for};

    const WHITE: Color = Color::new(255, 255, 255);

    // Tests every character of numbers and color tuples has a glyph
    // Verified by removing the comma glyph
    #[test]
    fn test_glyph_coverage() {
        for ch in "0123456789(), .-".chars() {
            let rows = glyph(ch).expect("defined glyph");
            assert!(rows.iter().all(|&row| row < 1 << GLYPH_WIDTH));
        }
        assert_eq!(glyph('x'), None);
        assert_eq!(GLYPH_HEIGHT, 5);
    }

    // Tests the font unit grows with the requested height
    // Verified by rounding the scale up
    #[test]
    fn test_scale_and_width() {
        assert_eq!(scale_for(0), 1);
        assert_eq!(scale_for(6), 1);
        assert_eq!(scale_for(12), 2);
        assert_eq!(scale_for(15), 2);
    }

    // Tests glyph pixels land where the bitmap says
    // Verified by mirroring glyph columns
    #[test]
    fn test_draw_text_pixels() {
        let mut image = solid_image(10, 10, WHITE);

        draw_text(&mut image, 0, 0, "1", 6, RED);

        assert_eq!(Color::from(*image.get_pixel(1, 0)), RED);
        assert_eq!(Color::from(*image.get_pixel(0, 0)), WHITE);
        assert_eq!(Color::from(*image.get_pixel(0, 1)), RED);
        assert_eq!(Color::from(*image.get_pixel(2, 4)), RED);
        assert_eq!(Color::from(*image.get_pixel(1, 5)), WHITE);
    }

    // Tests scaled glyphs and the cursor advance
    // Verified by advancing one font unit per glyph
    #[test]
    fn test_draw_text_scaled() {
        let mut image = solid_image(20, 12, WHITE);

        draw_text(&mut image, 0, 0, "11", 12, RED);

        // Second glyph starts at 4 units of 2 pixels
        assert_eq!(Color::from(*image.get_pixel(2, 0)), RED);
        assert_eq!(Color::from(*image.get_pixel(3, 1)), RED);
        assert_eq!(Color::from(*image.get_pixel(10, 0)), RED);
        assert_eq!(Color::from(*image.get_pixel(8, 0)), WHITE);
    }

    // Tests drawing past the image edge is clipped
    // Verified by writing pixels without bounds checks and observing a panic
    #[test]
    fn test_draw_text_clipped() {
        let mut image = solid_image(4, 4, WHITE);

        draw_text(&mut image, 3, 3, "888", 24, RED);
        draw_text(&mut image, 100, 100, "1", 6, RED);

        assert_eq!(Color::from(*image.get_pixel(3, 3)), RED);
        assert_eq!(Color::from(*image.get_pixel(0, 0)), WHITE);
    }
}
