use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
};

use crate::{
    error::{AtlasError, AtlasResult},
    text::{coverage::Coverage, DrawStyle, GlyphSource, InkBox},
    texture::Canvas,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DrawCall {
    pub ch: char,
    pub origin: (i32, i32),
    pub style: DrawStyle,
}

/// In-memory font whose glyphs are solid rectangles.
pub(crate) struct FixedSource {
    name: String,
    glyphs: BTreeMap<char, InkBox>,
    soft_edge: Option<u8>,
    pub calls: RefCell<Vec<DrawCall>>,
}

impl FixedSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            glyphs: BTreeMap::new(),
            soft_edge: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every character `width` wide, 10 above the baseline and 2 below.
    pub fn uniform(name: &str, chars: &str, width: i32) -> Self {
        chars.chars().fold(Self::new(name), |source, ch| {
            source.with_glyph(
                ch,
                InkBox {
                    left: 0,
                    top: -10,
                    right: width,
                    bottom: 2,
                    advance: width as f32 + 1.0,
                },
            )
        })
    }

    pub fn with_glyph(mut self, ch: char, ink: InkBox) -> Self {
        self.glyphs.insert(ch, ink);
        self
    }

    /// Draws the last column of every glyph at `coverage` instead of full strength.
    pub fn with_soft_edge(mut self, coverage: u8) -> Self {
        self.soft_edge = Some(coverage);
        self
    }

    fn ink(&self, ch: char) -> AtlasResult<InkBox> {
        self.glyphs
            .get(&ch)
            .copied()
            .ok_or_else(|| AtlasError::Font(format!("{}: no glyph for {ch:?}", self.name)))
    }
}

impl GlyphSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_codepoints(&self) -> BTreeSet<char> {
        self.glyphs.keys().copied().collect()
    }

    fn measure_glyph(&self, ch: char, _px: f32, stroke_width: u32) -> AtlasResult<InkBox> {
        self.ink(ch)?.grow(stroke_width)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        ch: char,
        _px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()> {
        let ink = self.ink(ch)?;
        self.calls.borrow_mut().push(DrawCall {
            ch,
            origin,
            style: *style,
        });
        let width = (ink.right - ink.left).max(0) as usize;
        let height = (ink.bottom - ink.top).max(0) as usize;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let mut data = vec![u8::MAX; width * height];
        if let Some(edge) = self.soft_edge {
            // rightmost column is only partly covered, like an anti-aliased stem
            for row in data.chunks_mut(width) {
                row[width - 1] = edge;
            }
        }
        canvas.draw_glyph_coverage(
            Coverage::new(width, height, data),
            origin.0 + ink.left,
            origin.1 + ink.top,
            style,
        );
        Ok(())
    }
}
