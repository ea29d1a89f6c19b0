//! Per-image orchestration: decode, geometry, reverse blend, encode.

use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use tracing::debug;

use crate::alpha_map::{self, AlphaMap};
use crate::assets;
use crate::blend;
use crate::error::Result;
use crate::geometry::WatermarkConfig;

/// JPEG output quality for non-PNG inputs.
const JPEG_QUALITY: u8 = 95;

/// Holds the two pre-computed alpha maps and applies the reverse blend.
///
/// Construction decodes the embedded reference renders and derives both maps
/// exactly once; build one engine at startup and share it by reference across
/// workers. All methods take `&self` and the maps are never mutated after
/// construction, so concurrent use is safe.
pub struct WatermarkEngine {
    alpha_map_small: AlphaMap,
    alpha_map_large: AlphaMap,
}

impl WatermarkEngine {
    /// Create an engine from the embedded reference renders.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AssetDecode`] if either embedded PNG cannot be
    /// decoded. This is the one unrecoverable failure of the system: callers
    /// should abort before submitting any batch work.
    ///
    /// # Panics
    ///
    /// Panics if the embedded renders have unexpected dimensions, which can
    /// only happen if the binary's asset data is corrupted.
    pub fn new() -> Result<Self> {
        let small = assets::decode_reference(assets::LOGO_48_PNG)?;
        let large = assets::decode_reference(assets::LOGO_96_PNG)?;

        let alpha_map_small = alpha_map::build_alpha_map(&small);
        assert_eq!(alpha_map_small.width(), WatermarkConfig::SMALL.logo_size);
        assert_eq!(alpha_map_small.height(), WatermarkConfig::SMALL.logo_size);

        let alpha_map_large = alpha_map::build_alpha_map(&large);
        assert_eq!(alpha_map_large.width(), WatermarkConfig::LARGE.logo_size);
        assert_eq!(alpha_map_large.height(), WatermarkConfig::LARGE.logo_size);

        Ok(Self {
            alpha_map_small,
            alpha_map_large,
        })
    }

    /// The cached alpha map matching a resolved config.
    #[must_use]
    pub fn alpha_map(&self, config: &WatermarkConfig) -> &AlphaMap {
        if config.logo_size == WatermarkConfig::LARGE.logo_size {
            &self.alpha_map_large
        } else {
            &self.alpha_map_small
        }
    }

    /// Recover the unwatermarked pixels of `source` into a new buffer.
    ///
    /// Total over any valid decoded image; images too small to contain the
    /// watermark region come back unchanged (clipping happens per pixel).
    #[must_use]
    pub fn remove(&self, source: &RgbaImage) -> RgbaImage {
        let config = WatermarkConfig::resolve(source.width(), source.height());
        blend::remove_watermark(source, self.alpha_map(&config), &config)
    }

    /// Process one file end to end: decode, reverse blend, encode to `output`.
    ///
    /// PNG inputs are re-encoded as PNG; everything else is written as JPEG
    /// at quality 95. Returns a short human-readable label on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or decoded, or if the
    /// output cannot be created or encoded. These are per-job failures; the
    /// batch pipeline reports them without aborting sibling jobs.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<String> {
        let reader = ImageReader::open(input)?.with_guessed_format()?;
        let format = reader.format();
        let source = reader.decode()?.to_rgba8();
        debug!(
            input = %input.display(),
            width = source.width(),
            height = source.height(),
            "decoded"
        );

        let cleaned = self.remove(&source);

        match format {
            Some(ImageFormat::Png) => cleaned.save_with_format(output, ImageFormat::Png)?,
            _ => {
                let rgb = DynamicImage::ImageRgba8(cleaned).to_rgb8();
                let file = BufWriter::new(std::fs::File::create(output)?);
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(file, JPEG_QUALITY);
                encoder.encode_image(&rgb)?;
            }
        }

        let name = input.file_name().unwrap_or_default().to_string_lossy();
        Ok(format!("Processed: {name}"))
    }
}

/// Check whether a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "webp"),
        None => false,
    }
}
