//! Per-pixel watermark opacity maps.
//!
//! The logo is rendered in near-white tones, so the intensity of the
//! brightest color channel in the reference render approximates the blend
//! opacity at that pixel: `alpha = max(R, G, B) / 255.0`. This heuristic is
//! calibrated against the reference assets and must be reproduced exactly;
//! a more general compositing inversion would produce different maps.

use image::RgbaImage;

/// A dense grid of blend opacities derived from a reference watermark render.
///
/// Values are stored row-major and every entry lies in `[0.0, 1.0]`. Maps are
/// built once per size and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl AlphaMap {
    /// Build a map from raw opacity values in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            (width * height) as usize,
            "alpha map values must match dimensions"
        );
        Self {
            width,
            height,
            values,
        }
    }

    /// Map width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> f32 {
        assert!(col < self.width && row < self.height);
        self.values[(row * self.width + col) as usize]
    }

    /// All opacity values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Derive an alpha map from a decoded reference watermark render.
///
/// The reference buffer uses straight (non-premultiplied) alpha, so the color
/// channels reflect true logo intensity regardless of the render's own alpha
/// channel. Per pixel the opacity is `max(R, G, B) / 255.0`.
#[must_use]
pub fn build_alpha_map(reference: &RgbaImage) -> AlphaMap {
    let mut values = Vec::with_capacity((reference.width() * reference.height()) as usize);

    for pixel in reference.pixels() {
        let max_channel = pixel[0].max(pixel[1]).max(pixel[2]);
        values.push(f32::from(max_channel) / 255.0);
    }

    AlphaMap::new(reference.width(), reference.height(), values)
}
