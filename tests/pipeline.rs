use std::{collections::BTreeSet, fs};

use glyphpack::{
    directory_path, generate,
    text::{coverage::Coverage, DrawStyle, InkBox},
    AtlasError, AtlasParams, AtlasResult, Canvas, GlyphDirectory, GlyphSource,
};

/// Draws every glyph as a solid block `width` wide, `height` tall, sitting on the baseline.
struct BlockFont {
    name: &'static str,
    chars: BTreeSet<char>,
    width: i32,
    height: i32,
}

impl BlockFont {
    fn new(name: &'static str, chars: impl IntoIterator<Item = char>, width: i32, height: i32) -> Self {
        Self {
            name,
            chars: chars.into_iter().collect(),
            width,
            height,
        }
    }
}

impl GlyphSource for BlockFont {
    fn name(&self) -> &str {
        self.name
    }

    fn supported_codepoints(&self) -> BTreeSet<char> {
        self.chars.clone()
    }

    fn measure_glyph(&self, ch: char, _px: f32, stroke_width: u32) -> AtlasResult<InkBox> {
        if !self.chars.contains(&ch) {
            return Err(AtlasError::Font(format!("{ch:?} missing from {}", self.name)));
        }
        InkBox {
            left: 0,
            top: -self.height,
            right: self.width,
            bottom: 0,
            advance: self.width as f32,
        }
        .grow(stroke_width)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        _ch: char,
        _px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()> {
        let (w, h) = (self.width as usize, self.height as usize);
        let block = Coverage::new(w, h, vec![200; w * h]);
        canvas.draw_glyph_coverage(block, origin.0, origin.1 - self.height, style);
        Ok(())
    }
}

fn cjk(count: u32) -> impl Iterator<Item = char> {
    (0..count).filter_map(|i| char::from_u32(0x4E00 + i))
}

#[test]
fn writes_both_files_and_they_agree() {
    let dir = tempfile::tempdir().unwrap();
    let sprite = dir.path().join("fonts").join("default.png");
    let sources = vec![
        BlockFont::new("latin", 'a'..='z', 6, 9),
        BlockFont::new("cjk", cjk(300), 12, 12),
    ];
    let params = AtlasParams {
        stroke_width: 1,
        shadow_offset: 1,
        ..Default::default()
    };
    let atlas = generate(&sources, &params, &sprite).unwrap();

    let image = image::open(&sprite).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (atlas.layout.width, atlas.layout.height));

    let bytes = fs::read(directory_path(&sprite)).unwrap();
    let directory = GlyphDirectory::decode(&bytes).unwrap();
    assert_eq!(directory, atlas.directory);
    assert_eq!(directory.records.len(), 26 + 300);
    assert_eq!(directory.records[0].codepoint, 'a' as u32);
    assert_eq!(directory.records[26].codepoint, 0x4E00);
    for record in directory.records.iter() {
        assert!(record.x as u32 + record.width as u32 <= image.width());
        assert!(record.y as u32 + directory.line_height as u32 <= image.height());
        assert!(record.advance >= record.width as i16);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let sources = vec![
        BlockFont::new("latin", ('!'..='~').chain([' ']), 5, 8),
        BlockFont::new("cjk", cjk(0x3000), 11, 11),
    ];
    let params = AtlasParams {
        charset: Some("Hello, 世界! 一丁七万丈三上下".into()),
        stroke_width: 2,
        ..Default::default()
    };

    let outputs: Vec<_> = (0..2)
        .map(|_| {
            let dir = tempfile::tempdir().unwrap();
            let sprite = dir.path().join("atlas.png");
            generate(&sources, &params, &sprite).unwrap();
            let pixels = image::open(&sprite).unwrap().to_rgba8().into_raw();
            let directory = fs::read(directory_path(&sprite)).unwrap();
            (pixels, directory)
        })
        .collect();

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn unresolved_character_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let sprite = dir.path().join("atlas.png");
    let sources = vec![BlockFont::new("latin", 'a'..='z', 6, 9)];
    let params = AtlasParams {
        charset: Some("abc€".into()),
        ..Default::default()
    };

    let err = generate(&sources, &params, &sprite).err().unwrap();
    assert!(matches!(err, AtlasError::UnresolvedCharacters(chars) if chars == vec!['€']));
    assert!(!sprite.exists());
    assert!(!directory_path(&sprite).exists());
}

#[test]
fn two_thousand_glyph_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let sprite = dir.path().join("big.png");
    let sources = vec![BlockFont::new("cjk", cjk(2000), 20, 24)];

    let atlas = generate(&sources, &AtlasParams::default(), &sprite).unwrap();
    assert_eq!(atlas.layout.line_height, 24);
    assert_eq!(atlas.layout.lines, 41);
    assert_eq!((atlas.layout.width, atlas.layout.height), (1028, 1024));
    assert_eq!(atlas.directory.records.len(), 2000);
}

#[test]
fn single_character_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let sprite = dir.path().join("one.png");
    let sources = vec![
        BlockFont::new("first", ['x'], 7, 10),
        BlockFont::new("second", ['x', 'y'], 30, 30),
    ];
    let params = AtlasParams {
        charset: Some("x".into()),
        ..Default::default()
    };

    let atlas = generate(&sources, &params, &sprite).unwrap();
    assert_eq!((atlas.layout.width, atlas.layout.height), (7, 10));
    assert_eq!(atlas.layout.placements[0].source, 0);
    let image = image::open(&sprite).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (7, 10));
}

#[test]
fn aliased_atlas_has_only_hard_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let sprite = dir.path().join("pixel.png");
    let sources = vec![BlockFont::new("latin", 'a'..='z', 6, 9)];
    let params = AtlasParams {
        smoothing: false,
        stroke_width: 1,
        shadow_offset: 1,
        ..Default::default()
    };
    generate(&sources, &params, &sprite).unwrap();

    let image = image::open(&sprite).unwrap().to_rgba8();
    assert!(image.pixels().any(|pixel| pixel.0[3] == 255));
    assert!(image.pixels().all(|pixel| matches!(pixel.0[3], 0 | 255)));
}
