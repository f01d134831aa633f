//! Glyph rasterization
//!
//! Turns a single character into an anti-aliased coverage raster plus the
//! tight bounding box of its rendered pixels. Outlines come from ttf-parser
//! and are filled on a tiny-skia pixmap. When a font cannot provide the
//! character, [`GlyphRaster::fallback`] draws a hollow missing-glyph box
//! instead.

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use ttf_parser::{Face, OutlineBuilder};

/// Tight rectangle around a glyph's rendered pixels, relative to the
/// raster's top-left corner. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl GlyphBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A rasterized glyph: tinted coverage pixels and their measured bounds.
pub struct GlyphRaster {
    pixmap: Pixmap,
    bounds: GlyphBounds,
}

/// Collects ttf-parser outline callbacks into a tiny-skia path, negating y
/// because fonts are y-up while pixmaps are y-down.
struct PathSink {
    builder: PathBuilder,
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, -y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, -y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, -y1, x, -y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, -y1, x2, -y2, x, -y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

impl GlyphRaster {
    /// Rasterize `ch` from `face` at `px_size` pixels per em, filled with
    /// `color` and anti-aliased.
    ///
    /// Returns `None` when the face has no glyph for the character, the
    /// glyph has no outline, or nothing ends up drawn.
    pub fn from_face(face: &Face, ch: char, px_size: u32, color: Color) -> Option<GlyphRaster> {
        let glyph_id = face.glyph_index(ch)?;

        let mut sink = PathSink {
            builder: PathBuilder::new(),
        };
        let outline_box = face.outline_glyph(glyph_id, &mut sink)?;
        let path = sink.builder.finish()?;

        let scale = px_size as f32 / face.units_per_em() as f32;

        // Outline box in raster space, y flipped.
        let left = outline_box.x_min as f32 * scale;
        let top = -(outline_box.y_max as f32) * scale;
        let width = (outline_box.x_max as f32 - outline_box.x_min as f32) * scale;
        let height = (outline_box.y_max as f32 - outline_box.y_min as f32) * scale;

        // 1px padding on every side keeps anti-aliased edges inside the raster.
        let raster_w = width.ceil() as u32 + 2;
        let raster_h = height.ceil() as u32 + 2;
        let mut pixmap = Pixmap::new(raster_w, raster_h)?;

        let transform = Transform::from_scale(scale, scale).post_translate(1.0 - left, 1.0 - top);

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);

        let bounds = measure_ink(&pixmap)?;
        Some(GlyphRaster { pixmap, bounds })
    }

    /// The built-in stand-in glyph: a hollow box at roughly the proportions
    /// of a missing-glyph "tofu", scaled to `px_size`.
    pub fn fallback(px_size: u32, color: Color) -> GlyphRaster {
        let h = px_size.clamp(4, 1024);
        let w = (h * 4 / 5).max(4);
        let stroke = (h / 12).max(1);

        let mut pixmap = Pixmap::new(w, h).expect("clamped dimensions are valid");

        let mut pb = PathBuilder::new();
        if let Some(outer) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
            pb.push_rect(outer);
        }
        let inset = stroke as f32;
        if let Some(inner) = Rect::from_xywh(
            inset,
            inset,
            w as f32 - 2.0 * inset,
            h as f32 - 2.0 * inset,
        ) {
            pb.push_rect(inner);
        }

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = false;

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }

        let bounds = GlyphBounds {
            left: 0,
            top: 0,
            right: w as i32,
            bottom: h as i32,
        };
        GlyphRaster { pixmap, bounds }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn bounds(&self) -> GlyphBounds {
        self.bounds
    }
}

/// Tight box of nonzero-alpha pixels, or `None` when nothing was drawn.
fn measure_ink(pixmap: &Pixmap) -> Option<GlyphBounds> {
    let w = pixmap.width() as i32;
    let mut left = i32::MAX;
    let mut top = i32::MAX;
    let mut right = i32::MIN;
    let mut bottom = i32::MIN;

    for (i, px) in pixmap.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let x = i as i32 % w;
        let y = i as i32 / w;
        left = left.min(x);
        top = top.min(y);
        right = right.max(x + 1);
        bottom = bottom.max(y + 1);
    }

    if right <= left {
        return None;
    }
    Some(GlyphBounds {
        left,
        top,
        right,
        bottom,
    })
}
