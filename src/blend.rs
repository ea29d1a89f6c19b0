//! Reverse alpha blending.
//!
//! The watermark was applied by forward blending:
//! `observed = alpha * logo + (1 - alpha) * original`
//!
//! This module solves that equation for `original` at every pixel the logo
//! touched, using the opacities from an [`AlphaMap`].

use image::RgbaImage;

use crate::alpha_map::AlphaMap;
use crate::geometry::WatermarkConfig;

/// Opacities below this are treated as "watermark did not touch this pixel".
///
/// Inverting near alpha = 0 divides noise by almost nothing; skipping keeps
/// those pixels bit-identical to the input.
pub const ALPHA_FLOOR: f32 = 0.002;

/// Opacities are clamped to this ceiling before inversion, bounding the
/// `1 - alpha` divisor away from zero.
pub const ALPHA_CEILING: f32 = 0.99;

/// Logo fill intensity before blending: solid white at full brightness.
pub const LOGO_VALUE: f32 = 255.0;

/// Recover the unwatermarked pixels of `source`.
///
/// Returns a new buffer; the input is never mutated. Only the R, G and B
/// channels inside the watermark region change, and only where the map
/// opacity is at least [`ALPHA_FLOOR`]; the alpha channel is untouched.
/// Region pixels that fall outside the image (possible for images smaller
/// than the logo plus margins) are skipped per pixel.
#[must_use]
pub fn remove_watermark(source: &RgbaImage, map: &AlphaMap, config: &WatermarkConfig) -> RgbaImage {
    let mut out = source.clone();
    let (width, height) = (source.width(), source.height());
    let (origin_x, origin_y) = config.origin(width, height);

    for row in 0..config.logo_size.min(map.height()) {
        for col in 0..config.logo_size.min(map.width()) {
            let x = origin_x + i64::from(col);
            let y = origin_y + i64::from(row);
            if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                continue;
            }

            let alpha = map.get(col, row);
            if alpha < ALPHA_FLOOR {
                continue;
            }
            let alpha = alpha.min(ALPHA_CEILING);
            let inv_alpha = 1.0 - alpha;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let px = out.get_pixel_mut(x as u32, y as u32);
            for ch in 0..3 {
                let observed = f32::from(px[ch]);
                let original = (observed - alpha * LOGO_VALUE) / inv_alpha;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = original.clamp(0.0, 255.0).round() as u8;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform_image(width: u32, height: u32, px: [u8; 4]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for p in img.pixels_mut() {
            *p = Rgba(px);
        }
        img
    }

    /// Forward-blend `map` onto `img` at the config's origin, quantizing to u8.
    fn apply_watermark(img: &mut RgbaImage, map: &AlphaMap, config: &WatermarkConfig) {
        let (ox, oy) = config.origin(img.width(), img.height());
        for row in 0..config.logo_size {
            for col in 0..config.logo_size {
                let (x, y) = (ox + i64::from(col), oy + i64::from(row));
                if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
                    continue;
                }
                let alpha = map.get(col, row);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let px = img.get_pixel_mut(x as u32, y as u32);
                for ch in 0..3 {
                    let blended = alpha * LOGO_VALUE + (1.0 - alpha) * f32::from(px[ch]);
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        px[ch] = blended.clamp(0.0, 255.0).round() as u8;
                    }
                }
            }
        }
    }

    /// A 48x48 map with opacities ramping from 0.0 up to just under 0.45.
    fn ramp_map() -> AlphaMap {
        let n = 48u32 * 48;
        #[allow(clippy::cast_precision_loss)]
        let values = (0..n).map(|i| i as f32 / n as f32 * 0.45).collect();
        AlphaMap::new(48, 48, values)
    }

    #[test]
    fn round_trip_recovers_original_within_one_step() {
        let original = uniform_image(200, 200, [128, 64, 200, 255]);
        let map = ramp_map();
        let config = WatermarkConfig::SMALL;

        let mut watermarked = original.clone();
        apply_watermark(&mut watermarked, &map, &config);
        let restored = remove_watermark(&watermarked, &map, &config);

        let (ox, oy) = config.origin(200, 200);
        for row in 0..48u32 {
            for col in 0..48u32 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let (x, y) = ((ox + i64::from(col)) as u32, (oy + i64::from(row)) as u32);
                let got = restored.get_pixel(x, y);
                let want = original.get_pixel(x, y);
                let alpha = map.get(col, row);
                for ch in 0..3 {
                    let diff = (i32::from(got[ch]) - i32::from(want[ch])).abs();
                    if alpha < ALPHA_FLOOR {
                        assert_eq!(diff, 0, "sub-floor pixel ({col},{row}) ch {ch} changed");
                    } else {
                        assert!(
                            diff <= 1,
                            "pixel ({col},{row}) ch {ch} off by {diff} at alpha {alpha}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn opacities_above_ceiling_behave_like_the_ceiling() {
        let source = uniform_image(200, 200, [200, 180, 160, 255]);
        let config = WatermarkConfig::SMALL;

        let saturated = AlphaMap::new(48, 48, vec![1.0; 48 * 48]);
        let at_ceiling = AlphaMap::new(48, 48, vec![ALPHA_CEILING; 48 * 48]);

        assert_eq!(
            remove_watermark(&source, &saturated, &config),
            remove_watermark(&source, &at_ceiling, &config)
        );
    }

    #[test]
    fn sub_floor_opacities_leave_pixels_untouched() {
        let source = uniform_image(200, 200, [10, 20, 30, 255]);
        let map = AlphaMap::new(48, 48, vec![0.001; 48 * 48]);

        let out = remove_watermark(&source, &map, &WatermarkConfig::SMALL);
        assert_eq!(out, source);
    }

    #[test]
    fn image_smaller_than_logo_region_is_returned_unchanged() {
        // Origin is (-60, -60) for 20x20; every region pixel is out of bounds.
        let source = uniform_image(20, 20, [77, 77, 77, 255]);
        let map = AlphaMap::new(48, 48, vec![0.5; 48 * 48]);

        let out = remove_watermark(&source, &map, &WatermarkConfig::SMALL);
        assert_eq!(out, source);
    }

    #[test]
    fn partial_overlap_is_clipped_per_pixel() {
        // 60x60 with the small preset puts the origin at (-20, -20): only the
        // bottom-right 28x28 of the logo grid lands inside the image.
        let source = uniform_image(60, 60, [100, 100, 100, 255]);
        let map = AlphaMap::new(48, 48, vec![0.3; 48 * 48]);

        let out = remove_watermark(&source, &map, &WatermarkConfig::SMALL);
        // (0,0) through (27,27) are covered, everything right/below is not.
        assert_ne!(out.get_pixel(0, 0), source.get_pixel(0, 0));
        assert_ne!(out.get_pixel(27, 27), source.get_pixel(27, 27));
        assert_eq!(out.get_pixel(28, 28), source.get_pixel(28, 28));
        assert_eq!(out.get_pixel(59, 59), source.get_pixel(59, 59));
    }

    #[test]
    fn alpha_channel_is_never_modified() {
        let source = uniform_image(200, 200, [50, 50, 50, 137]);
        let map = AlphaMap::new(48, 48, vec![0.8; 48 * 48]);

        let out = remove_watermark(&source, &map, &WatermarkConfig::SMALL);
        for px in out.pixels() {
            assert_eq!(px[3], 137);
        }
    }

    #[test]
    fn input_buffer_is_not_mutated() {
        let source = uniform_image(200, 200, [128, 128, 128, 255]);
        let snapshot = source.clone();
        let map = AlphaMap::new(48, 48, vec![0.5; 48 * 48]);

        let _ = remove_watermark(&source, &map, &WatermarkConfig::SMALL);
        assert_eq!(source, snapshot);
    }
}
