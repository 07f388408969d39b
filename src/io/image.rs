//! PNG loading into layers and layer export

use crate::io::canvas::{LayerId, LayeredImage};
use crate::io::error::{Result, TilingError, render_failure};
use image::RgbImage;
use std::path::Path;

/// Load an image file as 8-bit RGB, dropping any alpha channel
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| TilingError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Build a layer stack from an original image and a color map image
///
/// # Errors
///
/// Returns an error if either file cannot be loaded
pub fn load_document(
    original: &Path,
    color_map: &Path,
    original_layer: &str,
    color_map_layer: &str,
) -> Result<LayeredImage> {
    let mut document = LayeredImage::new();
    document.insert_layer(original_layer, load_rgb(original)?);
    document.insert_layer(color_map_layer, load_rgb(color_map)?);
    Ok(document)
}

/// Export a layer as an image file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The layer does not exist
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layer(document: &LayeredImage, layer: LayerId, output_path: &Path) -> Result<()> {
    let pixels = document
        .image(layer)
        .ok_or_else(|| render_failure("export layer", &format!("unknown layer {}", layer.index())))?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    pixels
        .save(output_path)
        .map_err(|e| TilingError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
