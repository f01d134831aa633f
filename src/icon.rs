//! Icon rendering
//!
//! Draws the extension glyph centered on a solid square tile and rounds the
//! corners of the larger sizes, producing straight-alpha RGBA output ready
//! for PNG encoding.

use std::path::Path;

use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, Mask, MaskType, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform,
};

use crate::font::FontData;
use crate::glyph::{GlyphBounds, GlyphRaster};

/// The kanji "to see", matching the extension name.
pub const GLYPH: char = '視';

/// Blue-500 (#3B82F6)
const BACKGROUND: (u8, u8, u8) = (59, 130, 246);
const FOREGROUND: (u8, u8, u8) = (255, 255, 255);

/// Glyph point size as a fraction of the icon edge.
const FONT_SCALE: f32 = 0.65;

/// Sizes from this up get rounded corners. Smaller icons stay square so
/// they keep every pixel at toolbar scale.
const ROUNDED_MIN_SIZE: u32 = 48;

/// Render one icon at `size`x`size` pixels from the font at `font_path`.
///
/// Font problems are non-fatal: a file that cannot be read or parsed, or a
/// face without the glyph, degrades to the built-in fallback glyph with a
/// logged warning. Returns `None` only when a canvas cannot be allocated,
/// which the fixed size set never triggers.
pub fn render_icon(size: u32, glyph: char, font_path: &Path) -> Option<RgbaImage> {
    let mut canvas = Pixmap::new(size, size)?;
    canvas.fill(Color::from_rgba8(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2, 255));

    let px_size = (FONT_SCALE * size as f32).round() as u32;
    let fg = Color::from_rgba8(FOREGROUND.0, FOREGROUND.1, FOREGROUND.2, 255);
    let raster = rasterize_glyph(glyph, px_size, fg, font_path);

    let (x, y) = centering_offset(size, raster.bounds());
    canvas.draw_pixmap(
        x,
        y,
        raster.pixmap().as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    let finished = if size >= ROUNDED_MIN_SIZE {
        round_corners(&canvas, size)?
    } else {
        canvas
    };

    to_rgba_image(&finished)
}

/// Top-left offset that centers a measured ink box on a `size` canvas,
/// using floor division.
fn centering_offset(size: u32, b: GlyphBounds) -> (i32, i32) {
    let x = (size as i32 - b.width()).div_euclid(2) - b.left;
    let y = (size as i32 - b.height()).div_euclid(2) - b.top;
    (x, y)
}

/// Load the font and rasterize the glyph at `px_size`.
///
/// Every failure mode degrades to the built-in fallback glyph with a
/// warning: by this point a font path has been chosen, and per-size load
/// problems never abort the run.
fn rasterize_glyph(glyph: char, px_size: u32, color: Color, font_path: &Path) -> GlyphRaster {
    let font = match FontData::load(font_path) {
        Ok(font) => font,
        Err(e) => {
            tracing::warn!("Could not load font at size {}: {}", px_size, e);
            return GlyphRaster::fallback(px_size, color);
        }
    };

    let face = match font.face() {
        Ok(face) => face,
        Err(e) => {
            tracing::warn!("Could not load font at size {}: {}", px_size, e);
            return GlyphRaster::fallback(px_size, color);
        }
    };

    match GlyphRaster::from_face(&face, glyph, px_size, color) {
        Some(raster) => raster,
        None => {
            tracing::warn!(
                "Could not load font at size {}: {} has no usable outline for {:?}",
                px_size,
                font_path.display(),
                glyph
            );
            GlyphRaster::fallback(px_size, color)
        }
    }
}

/// Re-composite `canvas` onto transparency through a rounded-rectangle
/// stencil with corner radius `size / 6`.
///
/// The stencil is drawn without anti-aliasing so alpha stays binary:
/// fully opaque inside the rounded region, fully transparent outside.
fn round_corners(canvas: &Pixmap, size: u32) -> Option<Pixmap> {
    let radius = (size / 6) as f32;
    let s = size as f32;

    // Two bands plus four corner circles union into the rounded rectangle.
    let mut pb = PathBuilder::new();
    pb.push_rect(Rect::from_xywh(radius, 0.0, s - 2.0 * radius, s)?);
    pb.push_rect(Rect::from_xywh(0.0, radius, s, s - 2.0 * radius)?);
    pb.push_circle(radius, radius, radius);
    pb.push_circle(s - radius, radius, radius);
    pb.push_circle(radius, s - radius, radius);
    pb.push_circle(s - radius, s - radius, radius);
    let path = pb.finish()?;

    let mut stencil = Pixmap::new(size, size)?;
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = false;
    stencil.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    let mask = Mask::from_pixmap(stencil.as_ref(), MaskType::Alpha);

    let mut rounded = Pixmap::new(size, size)?;
    rounded.draw_pixmap(
        0,
        0,
        canvas.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        Some(&mask),
    );
    Some(rounded)
}

/// Convert premultiplied tiny-skia pixels into a straight-alpha image.
fn to_rgba_image(pixmap: &Pixmap) -> Option<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Writes a file that is not a real font, forcing the built-in fallback
    /// glyph so pixel assertions do not depend on installed system fonts.
    fn bogus_font(dir: &Path) -> PathBuf {
        let path = dir.join("bogus.ttf");
        std::fs::write(&path, [0u8; 32]).unwrap();
        path
    }

    #[test]
    fn test_render_dimensions_match_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        for size in [16u32, 48, 128] {
            let img = render_icon(size, GLYPH, &font_path).unwrap();
            assert_eq!(img.width(), size);
            assert_eq!(img.height(), size);
        }
    }

    #[test]
    fn test_small_icon_is_fully_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        let img = render_icon(16, GLYPH, &font_path).unwrap();
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_large_icon_corners_are_transparent() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        for size in [48u32, 128] {
            let img = render_icon(size, GLYPH, &font_path).unwrap();
            let last = size - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(
                    img.get_pixel(x, y).0[3],
                    0,
                    "corner ({}, {}) at size {}",
                    x,
                    y,
                    size
                );
            }
            assert_eq!(img.get_pixel(size / 2, size / 2).0[3], 255);
        }
    }

    #[test]
    fn test_alpha_follows_the_rounded_region() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        for size in [48u32, 128] {
            let radius = (size / 6) as f32;
            let img = render_icon(size, GLYPH, &font_path).unwrap();

            for y in 0..size {
                for x in 0..size {
                    let alpha = img.get_pixel(x, y).0[3];
                    let margin = region_margin(x, y, size, radius);
                    if margin >= 1.0 {
                        assert_eq!(alpha, 255, "inside at ({}, {}) size {}", x, y, size);
                    } else if margin <= -1.0 {
                        assert_eq!(alpha, 0, "outside at ({}, {}) size {}", x, y, size);
                    } else {
                        assert!(alpha == 0 || alpha == 255, "alpha must stay binary");
                    }
                }
            }
        }
    }

    /// Signed distance from a pixel center to the rounded-rectangle edge;
    /// positive inside, negative outside.
    fn region_margin(x: u32, y: u32, size: u32, radius: f32) -> f32 {
        let s = size as f32;
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let cx = px.clamp(radius, s - radius);
        let cy = py.clamp(radius, s - radius);
        let dx = px - cx;
        let dy = py - cy;
        radius - (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn test_background_keeps_brand_color() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        let img = render_icon(48, GLYPH, &font_path).unwrap();
        // Top band: inside the rounded region, above the glyph box.
        assert_eq!(img.get_pixel(24, 1).0, [59, 130, 246, 255]);
    }

    #[test]
    fn test_fallback_glyph_is_centered_and_white() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        let img = render_icon(48, GLYPH, &font_path).unwrap();
        // Fallback box at point size 31 is 24x31, placed at (12, 8): the
        // frame is white, the hollow middle shows the background through.
        assert_eq!(img.get_pixel(13, 24).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(34, 24).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(24, 24).0, [59, 130, 246, 255]);
    }

    #[test]
    fn test_unreadable_font_degrades_to_fallback_glyph() {
        let dir = tempfile::tempdir().unwrap();
        // Never created, so the read itself fails rather than the parse.
        let missing = dir.path().join("gone.ttf");
        let img = render_icon(48, GLYPH, &missing).unwrap();
        assert_eq!(img.get_pixel(13, 24).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(24, 24).0, [59, 130, 246, 255]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = bogus_font(dir.path());
        let a = render_icon(128, GLYPH, &font_path).unwrap();
        let b = render_icon(128, GLYPH, &font_path).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_centering_offset_centers_the_measured_box() {
        let b = GlyphBounds {
            left: 1,
            top: 2,
            right: 25,
            bottom: 33,
        };
        // 24x31 box on a 48 canvas: (12 - left, 8 - top).
        assert_eq!(centering_offset(48, b), (11, 6));
    }

    #[test]
    fn test_centering_offset_floors_for_oversized_boxes() {
        // A box one pixel wider and taller than the canvas sits half a
        // pixel off center; floor division settles it toward the top-left.
        let b = GlyphBounds {
            left: 0,
            top: 0,
            right: 17,
            bottom: 17,
        };
        assert_eq!(centering_offset(16, b), (-1, -1));
    }
}
