use crate::{
    assign::CharacterAssignment,
    error::{fit, AtlasError, AtlasResult},
    text::GlyphSource,
};

/// Integer metrics of a glyph as it will sit in the atlas, shadow and stroke included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub advance: i32,
}

impl GlyphMetrics {
    /// Effective width, the horizontal space the glyph occupies in the atlas.
    pub fn width(&self) -> u32 {
        (i64::from(self.right) - i64::from(self.left)).max(0) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasuredGlyph {
    pub ch: char,
    pub source: usize,
    pub metrics: GlyphMetrics,
}

/// Extremes over every glyph measured so far.
/// `min_top` and `max_bottom` start at the baseline so it always falls inside a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extents {
    pub min_top: i32,
    pub max_bottom: i32,
    pub max_width: u32,
    pub total_width: i64,
    pub count: usize,
}

impl Extents {
    pub fn line_height(&self) -> u32 {
        (i64::from(self.max_bottom) - i64::from(self.min_top)) as u32
    }
}

pub struct GlyphMeasurer {
    px: f32,
    stroke_width: u32,
    shadow_offset: u32,
    extents: Extents,
}

impl GlyphMeasurer {
    pub fn new(px: f32, stroke_width: u32, shadow_offset: u32) -> Self {
        Self {
            px,
            stroke_width,
            shadow_offset,
            extents: Extents::default(),
        }
    }

    pub fn measure<S: GlyphSource>(&mut self, source: &S, ch: char) -> AtlasResult<GlyphMetrics> {
        let ink = source.measure_glyph(ch, self.px, self.stroke_width)?;
        if !ink.advance.is_finite() {
            return Err(AtlasError::Font(format!(
                "{}: advance of {ch:?} is not finite",
                source.name()
            )));
        }
        let shadow = i64::from(self.shadow_offset);
        let mut metrics = GlyphMetrics {
            left: ink.left,
            top: ink.top,
            right: fit("glyph right", i64::from(ink.right.max(ink.left)) + shadow)?,
            bottom: fit("glyph bottom", i64::from(ink.bottom.max(ink.top)) + shadow)?,
            advance: 0,
        };
        let width = metrics.width();
        // stroke grows the glyph on both sides, the shadow only to the right
        let advance = ink.advance.round() as i64 + 2 * i64::from(self.stroke_width) + shadow;
        metrics.advance = fit("advance", advance.max(i64::from(width)))?;

        let extents = &mut self.extents;
        extents.min_top = extents.min_top.min(metrics.top);
        extents.max_bottom = extents.max_bottom.max(metrics.bottom);
        extents.max_width = extents.max_width.max(width);
        extents.total_width += i64::from(width);
        extents.count += 1;

        Ok(metrics)
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }
}

/// Measures every assigned character in packing order.
pub fn measure_assignment<S: GlyphSource>(
    sources: &[S],
    assignment: &CharacterAssignment,
    measurer: &mut GlyphMeasurer,
) -> AtlasResult<Vec<MeasuredGlyph>> {
    assignment
        .iter()
        .map(|(source, ch)| {
            let metrics = measurer.measure(&sources[source], ch)?;
            Ok(MeasuredGlyph {
                ch,
                source,
                metrics,
            })
        })
        .collect()
}
