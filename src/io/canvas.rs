//! Drawing capabilities the tiling engine needs from a host image model
//!
//! [`Canvas`] is the narrow, fallible interface the optimizers talk to.
//! [`LayeredImage`] implements it in memory on top of `image` buffers and is
//! what the command-line tool uses.

use crate::analysis::palette::{Color, ColorSource};
use crate::io::error::{Result, render_failure};
use crate::io::glyphs::draw_text;
use crate::spatial::geometry::Rect;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Handle of a layer inside a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    /// Position of the layer in its canvas stack
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Resampling filter used when resizing a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbour
    Nearest,
    /// Bilinear
    Linear,
    /// Catmull-Rom bicubic
    Cubic,
    /// Lanczos with window 3
    #[default]
    Lanczos,
}

impl Interpolation {
    /// Matching `image` resampling filter
    pub const fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Linear => FilterType::Triangle,
            Self::Cubic => FilterType::CatmullRom,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Layered drawing surface provided by the host
///
/// Every operation may fail; failures are reported as
/// [`crate::TilingError::RenderFailure`] and are fatal to a conversion run.
pub trait Canvas {
    /// Find a layer by its logical name
    fn layer_by_name(&self, name: &str) -> Option<LayerId>;

    /// Find a layer by name, creating a white `width x height` layer if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the layer cannot be created
    fn get_or_create_layer(&mut self, name: &str, width: u32, height: u32) -> Result<LayerId>;

    /// Width and height of a layer in pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist
    fn dimensions(&self, layer: LayerId) -> Result<(u32, u32)>;

    /// Resample a layer to a new size
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the size is empty
    fn resize(
        &mut self,
        layer: LayerId,
        width: u32,
        height: u32,
        interpolation: Interpolation,
    ) -> Result<()>;

    /// Read a single pixel
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the pixel is outside it
    fn pixel(&self, layer: LayerId, x: u32, y: u32) -> Result<Color>;

    /// Mean intensity of each RGB channel over a rectangle
    ///
    /// The rectangle is clipped to the layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the clipped rectangle is empty
    fn channel_means(&self, layer: LayerId, rect: Rect) -> Result<[f64; 3]>;

    /// Average color of a rectangle, each channel truncated to an integer
    ///
    /// # Errors
    ///
    /// Propagates failures of [`Canvas::channel_means`]
    fn sample_average_color(&self, layer: LayerId, rect: Rect) -> Result<Color> {
        let [r, g, b] = self.channel_means(layer, rect)?;
        Ok(Color::new(r as u8, g as u8, b as u8))
    }

    /// Paint a rectangle with a solid color, clipped to the layer
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist
    fn fill_rect(&mut self, layer: LayerId, rect: Rect, color: Color) -> Result<()>;

    /// Write the per-channel absolute difference of `a` and `b` into `target`
    ///
    /// `target` takes the size of `a`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer does not exist or `a` and `b` differ in size
    fn compose_difference(&mut self, a: LayerId, b: LayerId, target: LayerId) -> Result<()>;

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist
    fn annotate_text(
        &mut self,
        layer: LayerId,
        x: u32,
        y: u32,
        text: &str,
        size: u32,
        color: Color,
    ) -> Result<()>;
}

/// Read-only view of one canvas layer as a [`ColorSource`]
pub struct LayerSource<'a, C: Canvas + ?Sized> {
    canvas: &'a C,
    layer: LayerId,
    dimensions: (u32, u32),
}

impl<'a, C: Canvas + ?Sized> LayerSource<'a, C> {
    /// View `layer` of `canvas`
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist
    pub fn new(canvas: &'a C, layer: LayerId) -> Result<Self> {
        let dimensions = canvas.dimensions(layer)?;
        Ok(Self {
            canvas,
            layer,
            dimensions,
        })
    }
}

impl<C: Canvas + ?Sized> ColorSource for LayerSource<'_, C> {
    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn color_at(&self, x: u32, y: u32) -> Result<Color> {
        self.canvas.pixel(self.layer, x, y)
    }
}

#[derive(Debug, Clone)]
struct Layer {
    name: String,
    pixels: RgbImage,
}

/// In-memory stack of named RGB layers
#[derive(Debug, Clone, Default)]
pub struct LayeredImage {
    layers: Vec<Layer>,
}

impl LayeredImage {
    /// Create an empty layer stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, replacing the pixels of an existing layer with the same name
    pub fn insert_layer(&mut self, name: &str, pixels: RgbImage) -> LayerId {
        if let Some(id) = self.layer_by_name(name) {
            if let Some(layer) = self.layers.get_mut(id.0) {
                layer.pixels = pixels;
            }
            return id;
        }
        self.layers.push(Layer {
            name: name.to_string(),
            pixels,
        });
        LayerId(self.layers.len() - 1)
    }

    /// Pixels of a layer
    pub fn image(&self, layer: LayerId) -> Option<&RgbImage> {
        self.layers.get(layer.0).map(|l| &l.pixels)
    }

    fn pixels(&self, layer: LayerId, operation: &'static str) -> Result<&RgbImage> {
        self.image(layer)
            .ok_or_else(|| render_failure(operation, &format!("unknown layer {}", layer.0)))
    }

    fn pixels_mut(&mut self, layer: LayerId, operation: &'static str) -> Result<&mut RgbImage> {
        self.layers
            .get_mut(layer.0)
            .map(|l| &mut l.pixels)
            .ok_or_else(|| render_failure(operation, &format!("unknown layer {}", layer.0)))
    }
}

impl Canvas for LayeredImage {
    fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.layers
            .iter()
            .position(|layer| layer.name == name)
            .map(LayerId)
    }

    fn get_or_create_layer(&mut self, name: &str, width: u32, height: u32) -> Result<LayerId> {
        if let Some(id) = self.layer_by_name(name) {
            return Ok(id);
        }
        if width == 0 || height == 0 {
            return Err(render_failure(
                "create layer",
                &format!("'{name}' would be {width}x{height}"),
            ));
        }
        Ok(self.insert_layer(
            name,
            RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
        ))
    }

    fn dimensions(&self, layer: LayerId) -> Result<(u32, u32)> {
        self.pixels(layer, "layer dimensions")
            .map(RgbImage::dimensions)
    }

    fn resize(
        &mut self,
        layer: LayerId,
        width: u32,
        height: u32,
        interpolation: Interpolation,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(render_failure(
                "resize layer",
                &format!("target size {width}x{height} is empty"),
            ));
        }
        let pixels = self.pixels_mut(layer, "resize layer")?;
        if pixels.dimensions() != (width, height) {
            *pixels = imageops::resize(pixels, width, height, interpolation.filter());
        }
        Ok(())
    }

    fn pixel(&self, layer: LayerId, x: u32, y: u32) -> Result<Color> {
        self.pixels(layer, "read pixel")?
            .get_pixel_checked(x, y)
            .copied()
            .map(Color::from)
            .ok_or_else(|| render_failure("read pixel", &format!("({x}, {y}) is outside the layer")))
    }

    fn channel_means(&self, layer: LayerId, rect: Rect) -> Result<[f64; 3]> {
        let pixels = self.pixels(layer, "sample average color")?;
        let clipped = rect
            .clip(pixels.width(), pixels.height())
            .ok_or_else(|| render_failure("sample average color", &"rectangle is outside the layer"))?;

        let mut sums = [0u64; 3];
        for y in clipped.y..clipped.y + clipped.height {
            for x in clipped.x..clipped.x + clipped.width {
                if let Some(pixel) = pixels.get_pixel_checked(x, y) {
                    for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                        *sum += u64::from(channel);
                    }
                }
            }
        }

        let area = clipped.area() as f64;
        Ok(sums.map(|sum| sum as f64 / area))
    }

    fn fill_rect(&mut self, layer: LayerId, rect: Rect, color: Color) -> Result<()> {
        let pixels = self.pixels_mut(layer, "fill rectangle")?;
        let Some(clipped) = rect.clip(pixels.width(), pixels.height()) else {
            return Ok(());
        };
        let fill = Rgb::from(color);
        for y in clipped.y..clipped.y + clipped.height {
            for x in clipped.x..clipped.x + clipped.width {
                pixels.put_pixel(x, y, fill);
            }
        }
        Ok(())
    }

    fn compose_difference(&mut self, a: LayerId, b: LayerId, target: LayerId) -> Result<()> {
        let first = self.pixels(a, "compose difference")?;
        let second = self.pixels(b, "compose difference")?;
        if first.dimensions() != second.dimensions() {
            return Err(render_failure(
                "compose difference",
                &format!(
                    "layer sizes differ: {:?} vs {:?}",
                    first.dimensions(),
                    second.dimensions()
                ),
            ));
        }

        let mut difference = RgbImage::new(first.width(), first.height());
        for ((out, lhs), rhs) in difference
            .pixels_mut()
            .zip(first.pixels())
            .zip(second.pixels())
        {
            for ((o, &l), &r) in out.0.iter_mut().zip(lhs.0.iter()).zip(rhs.0.iter()) {
                *o = l.abs_diff(r);
            }
        }

        *self.pixels_mut(target, "compose difference")? = difference;
        Ok(())
    }

    fn annotate_text(
        &mut self,
        layer: LayerId,
        x: u32,
        y: u32,
        text: &str,
        size: u32,
        color: Color,
    ) -> Result<()> {
        let pixels = self.pixels_mut(layer, "annotate text")?;
        draw_text(pixels, x, y, text, size, color);
        Ok(())
    }
}
