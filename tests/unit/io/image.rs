//! Tests for loading documents and exporting layers

#[cfg(test)]
mod tests {
    use crate::{BLUE, RED, solid_image, strip_image};
    use imagetiles::TilingError;
    use imagetiles::io::canvas::{Canvas, LayeredImage};
    use imagetiles::io::image::{export_layer, load_document, load_rgb};
    use tempfile::TempDir;

    // Tests a saved image loads back as RGB
    // Verified by loading the alpha channel into the red channel
    #[test]
    fn test_load_rgb() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("red.png");
        solid_image(3, 2, RED).save(&path).expect("save png");

        let image = load_rgb(&path).expect("load png");

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 0, 0]);
    }

    // Tests missing files report the path
    // Verified by mapping load failures to file system errors
    #[test]
    fn test_load_rgb_missing() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing.png");

        let result = load_rgb(&path);

        assert!(matches!(
            &result,
            Err(TilingError::ImageLoad { path: reported, .. }) if reported == &path
        ));
    }

    // Tests a document holds both named layers
    // Verified by swapping the layer names
    #[test]
    fn test_load_document() {
        let dir = TempDir::new().expect("temp dir");
        let original = dir.path().join("original.png");
        let colors = dir.path().join("colors.png");
        solid_image(4, 4, BLUE).save(&original).expect("save png");
        strip_image(&[RED, BLUE]).save(&colors).expect("save png");

        let document = load_document(&original, &colors, "Original", "Colors").expect("load");

        let original_layer = document.layer_by_name("Original").expect("original layer");
        let color_layer = document.layer_by_name("Colors").expect("color layer");
        assert_eq!(document.dimensions(original_layer).expect("layer exists"), (4, 4));
        assert_eq!(document.dimensions(color_layer).expect("layer exists"), (2, 1));
    }

    // Tests export creates missing directories
    // Verified by removing the directory creation
    #[test]
    fn test_export_layer() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("nested").join("deeper").join("out.png");
        let mut document = LayeredImage::new();
        let layer = document.insert_layer("a", solid_image(2, 2, RED));

        export_layer(&document, layer, &output).expect("export succeeds");

        assert!(output.exists());
        assert_eq!(load_rgb(&output).expect("reload").get_pixel(1, 1).0, [255, 0, 0]);
    }

    // Tests exporting to an unsupported format fails
    // Verified by silently ignoring save errors
    #[test]
    fn test_export_layer_unsupported_format() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("out.unknownformat");
        let mut document = LayeredImage::new();
        let layer = document.insert_layer("a", solid_image(2, 2, RED));

        assert!(matches!(
            export_layer(&document, layer, &output),
            Err(TilingError::ImageExport { .. })
        ));
    }
}
