//! Tests for RGB distance metrics

#[cfg(test)]
mod tests {
    use imagetiles::analysis::palette::Color;
    use imagetiles::math::distance::squared_euclidean_rgb;

    // Tests a 3-4-0 channel offset gives squared distance twenty-five
    // Verified by taking the square root
    #[test]
    fn test_squared_euclidean_rgb() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(13, 24, 30);

        assert!((squared_euclidean_rgb(a, b) - 25.0).abs() < 1e-12);
    }

    // Tests symmetry and identity
    // Verified by subtracting with saturation in one direction only
    #[test]
    fn test_distance_symmetry() {
        let a = Color::new(0, 255, 100);
        let b = Color::new(255, 0, 50);

        assert!((squared_euclidean_rgb(a, b) - squared_euclidean_rgb(b, a)).abs() < 1e-12);
        assert!(squared_euclidean_rgb(a, a).abs() < 1e-12);
        assert!((squared_euclidean_rgb(a, b) - 132_550.0).abs() < 1e-9);
    }
}
