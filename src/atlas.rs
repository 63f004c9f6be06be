use crate::{
    error::{fit, AtlasError, AtlasResult},
    measure::{Extents, MeasuredGlyph},
};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Where one glyph landed in the atlas.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct GlyphPlacement {
    pub ch: char,
    pub source: usize,
    pub x: u32,
    pub y: u32,
    /// Effective width.
    pub width: u32,
    pub advance: i32,
    /// Ink left edge relative to the pen position.
    pub left: i32,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    /// Shared by every line, the vertical stride is `line_height + spacing`.
    pub line_height: u32,
    /// Highest ink top relative to the baseline. The baseline of a line sits `-min_top` below it.
    pub min_top: i32,
    pub spacing: u32,
    pub lines: u32,
    pub placements: Vec<GlyphPlacement>,
}

impl AtlasLayout {
    pub fn rect(&self, placement: &GlyphPlacement) -> Rect {
        Rect {
            x: placement.x,
            y: placement.y,
            w: placement.width,
            h: self.line_height,
        }
    }

    pub fn line_of(&self, placement: &GlyphPlacement) -> u32 {
        placement.y / (self.line_height + self.spacing).max(1)
    }
}

/// Line width that makes the atlas come out roughly square.
///
/// Solves `x = h * (w / x + 1)` for `x` with the spacing folded into the row stride, then makes
/// sure the widest glyph fits on a line of its own.
pub fn estimate_width(line_height: u32, total_width: i64, spacing: u32, max_glyph_width: u32) -> i64 {
    let h = line_height as f64;
    let s = spacing as f64;
    let w = total_width.max(0) as f64;
    let x = ((h + (h * h + 4.0 * w * (h + s)).sqrt()) / 2.0).ceil() as i64;
    x.max(max_glyph_width as i64)
}

/// Lays glyphs out left to right in lines, in the order given.
///
/// Lines wrap at the [`estimate_width`] limit, but the atlas is only as wide as its widest line.
pub fn pack(glyphs: &[MeasuredGlyph], extents: &Extents, spacing: u32) -> AtlasResult<AtlasLayout> {
    if glyphs.is_empty() {
        return Err(AtlasError::NoGlyphs);
    }
    let line_height = extents.line_height();
    let s = spacing as i64;
    let total_width = extents.total_width + s * (glyphs.len() as i64 - 1);
    let limit = estimate_width(line_height, total_width, spacing, extents.max_width);
    let stride = line_height as i64 + s;
    log::debug!("packing {} glyphs, {total_width} px total, wrapping at {limit} px", glyphs.len());

    let mut placements = Vec::with_capacity(glyphs.len());
    let mut cursor = 0i64;
    let mut line = 0i64;
    let mut line_open = false;
    let mut width = 0i64;

    for glyph in glyphs {
        let w = glyph.metrics.width() as i64;
        if line_open && cursor + w + s > limit {
            log::trace!("line {line} closed at {} px", cursor - s);
            width = width.max(cursor - s);
            line += 1;
            cursor = 0;
        }

        placements.push(GlyphPlacement {
            ch: glyph.ch,
            source: glyph.source,
            x: fit("atlas x", cursor)?,
            y: fit("atlas y", line * stride)?,
            width: w as u32,
            advance: glyph.metrics.advance,
            left: glyph.metrics.left,
        });
        cursor += w + s;
        line_open = true;
    }
    width = width.max(cursor - s);
    let lines = line + 1;

    Ok(AtlasLayout {
        width: fit("atlas width", width)?,
        height: fit("atlas height", stride * lines - s)?,
        line_height,
        min_top: extents.min_top,
        spacing,
        lines: fit("line count", lines)?,
        placements,
    })
}
