//! Watermark size presets and placement.
//!
//! The logo is stamped at the bottom-right corner with a size-dependent
//! margin. Which preset applies is a pure function of the target image
//! dimensions; nothing here touches pixels or I/O.

/// Size and margin parameters for one of the two known watermark placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkConfig {
    /// Edge length of the square logo region in pixels.
    pub logo_size: u32,
    /// Distance from the logo's right edge to the image's right edge.
    pub margin_right: u32,
    /// Distance from the logo's bottom edge to the image's bottom edge.
    pub margin_bottom: u32,
}

impl WatermarkConfig {
    /// The 48x48 preset used for images where either dimension is <= 1024.
    pub const SMALL: Self = Self {
        logo_size: 48,
        margin_right: 32,
        margin_bottom: 32,
    };

    /// The 96x96 preset used for images where both dimensions exceed 1024.
    pub const LARGE: Self = Self {
        logo_size: 96,
        margin_right: 64,
        margin_bottom: 64,
    };

    /// Select the preset for an image of the given dimensions.
    ///
    /// Large requires both width AND height strictly greater than 1024;
    /// a 1024x1024 image still gets the small preset.
    #[must_use]
    pub fn resolve(width: u32, height: u32) -> Self {
        if width > 1024 && height > 1024 {
            Self::LARGE
        } else {
            Self::SMALL
        }
    }

    /// Top-left corner of the watermark region, as signed coordinates.
    ///
    /// For images smaller than the logo plus its margins the origin is
    /// negative; callers clip per pixel rather than rejecting the image.
    #[must_use]
    pub fn origin(&self, width: u32, height: u32) -> (i64, i64) {
        let x = i64::from(width) - i64::from(self.margin_right) - i64::from(self.logo_size);
        let y = i64::from(height) - i64::from(self.margin_bottom) - i64::from(self.logo_size);
        (x, y)
    }
}
