use std::collections::BTreeSet;

use image::Rgba;

use crate::{
    error::{fit, AtlasResult},
    params::Stroke,
    texture::Canvas,
};

/// Ink bounding box of one glyph relative to its pen origin on the baseline.
/// `y` grows downward, so `top` is usually negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub advance: f32,
}

impl InkBox {
    pub fn is_blank(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Grows the box by `stroke_width` on every side. Blank glyphs have no outline and stay empty.
    pub fn grow(self, stroke_width: u32) -> AtlasResult<InkBox> {
        if stroke_width == 0 || self.is_blank() {
            return Ok(self);
        }
        let s = i64::from(stroke_width);
        Ok(InkBox {
            left: fit("ink left", i64::from(self.left) - s)?,
            top: fit("ink top", i64::from(self.top) - s)?,
            right: fit("ink right", i64::from(self.right) + s)?,
            bottom: fit("ink bottom", i64::from(self.bottom) + s)?,
            advance: self.advance,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawStyle {
    pub fill: Rgba<u8>,
    pub stroke: Option<Stroke>,
    pub smoothing: bool,
}

/// A font the atlas can pull glyphs from.
pub trait GlyphSource {
    fn name(&self) -> &str;

    /// Every character this source can draw, printable or not.
    fn supported_codepoints(&self) -> BTreeSet<char>;

    /// Ink box at `px` pixels, already grown by `stroke_width` on every side.
    fn measure_glyph(&self, ch: char, px: f32, stroke_width: u32) -> AtlasResult<InkBox>;

    /// Draws `ch` with its pen origin at `origin`.
    /// With a stroke, the stroke is composited first and the fill on top of it.
    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        ch: char,
        px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supported_codepoints(&self) -> BTreeSet<char> {
        (**self).supported_codepoints()
    }

    fn measure_glyph(&self, ch: char, px: f32, stroke_width: u32) -> AtlasResult<InkBox> {
        (**self).measure_glyph(ch, px, stroke_width)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        ch: char,
        px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()> {
        (**self).draw_glyph(canvas, ch, px, origin, style)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supported_codepoints(&self) -> BTreeSet<char> {
        (**self).supported_codepoints()
    }

    fn measure_glyph(&self, ch: char, px: f32, stroke_width: u32) -> AtlasResult<InkBox> {
        (**self).measure_glyph(ch, px, stroke_width)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        ch: char,
        px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()> {
        (**self).draw_glyph(canvas, ch, px, origin, style)
    }
}
