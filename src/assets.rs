//! Embedded reference watermark renders.
//!
//! Two calibrated captures of the logo, one per size preset, rendered on a
//! fully transparent background. They are production constants: the alpha
//! maps derived from them define what "the watermark" means to this crate.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Reference render of the 48x48 watermark.
pub(crate) const LOGO_48_PNG: &[u8] = include_bytes!("../assets/logo_48.png");

/// Reference render of the 96x96 watermark.
pub(crate) const LOGO_96_PNG: &[u8] = include_bytes!("../assets/logo_96.png");

/// Decode an embedded reference render into a straight-alpha RGBA buffer.
pub(crate) fn decode_reference(png_bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(png_bytes).map_err(Error::AssetDecode)?;
    Ok(img.to_rgba8())
}
