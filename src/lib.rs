pub mod assign;
pub mod atlas;
pub mod config;
pub mod directory;
pub mod error;
pub mod measure;
pub mod params;
pub mod render;
pub mod text;
pub mod texture;

#[cfg(test)]
pub(crate) mod test_util;

use std::{
    fs,
    path::{Path, PathBuf},
};

use glyphpack_asset::Loader;

pub use crate::{
    assign::{assign_characters, CharacterAssignment},
    atlas::{pack, AtlasLayout, GlyphPlacement},
    directory::GlyphDirectory,
    error::{AtlasError, AtlasResult},
    params::{AtlasParams, AtlasSettings},
    render::AtlasRenderer,
    text::{FontdueSource, GlyphSource},
    texture::Canvas,
};

use crate::measure::{measure_assignment, GlyphMeasurer};

/// A finished atlas held in memory.
pub struct Atlas {
    pub layout: AtlasLayout,
    pub directory: GlyphDirectory,
    pub canvas: Canvas,
}

/// The `.gly` file that goes with an atlas image.
pub fn directory_path<P: AsRef<Path>>(sprite_path: P) -> PathBuf {
    sprite_path.as_ref().with_extension(directory::EXTENSION)
}

/// Runs assignment, measurement, packing and rendering without touching the filesystem.
///
/// `sources` are in fallback order: a character is taken from the first source that has it.
pub fn build_atlas<S: GlyphSource>(sources: &[S], params: &AtlasParams) -> AtlasResult<Atlas> {
    let settings = params.validate()?;
    if sources.is_empty() {
        return Err(AtlasError::InvalidParameter(
            "at least one font source is required".into(),
        ));
    }

    let assignment = assign_characters(sources, settings.charset.as_ref())?;
    if assignment.is_empty() {
        return Err(AtlasError::NoGlyphs);
    }
    log::info!(
        "assigned {} characters across {} of {} font sources",
        assignment.len(),
        assignment.groups.len(),
        sources.len()
    );

    let mut measurer = GlyphMeasurer::new(
        settings.pixel_size,
        settings.stroke.width,
        settings.shadow.offset,
    );
    let glyphs = measure_assignment(sources, &assignment, &mut measurer)?;
    let layout = pack(&glyphs, measurer.extents(), settings.spacing)?;
    log::info!(
        "atlas is {}x{} px, {} lines of {} px",
        layout.width,
        layout.height,
        layout.lines,
        layout.line_height
    );

    let directory = GlyphDirectory::from_layout(&layout)?;
    let canvas = AtlasRenderer::new(sources, &settings).render(&layout)?;

    Ok(Atlas {
        layout,
        directory,
        canvas,
    })
}

/// Builds the atlas and writes `sprite_path` (PNG) and its `.gly` directory next to it.
/// Nothing is written unless the whole atlas could be built.
pub fn generate<S: GlyphSource, P: AsRef<Path>>(
    sources: &[S],
    params: &AtlasParams,
    sprite_path: P,
) -> AtlasResult<Atlas> {
    let sprite_path = sprite_path.as_ref();
    let glyph_path = directory_path(sprite_path);
    if glyph_path == sprite_path {
        return Err(AtlasError::InvalidParameter(format!(
            "atlas image {} would be overwritten by its glyph directory",
            sprite_path.display()
        )));
    }

    let atlas = build_atlas(sources, params)?;
    let bytes = atlas.directory.encode()?;

    if let Some(parent) = sprite_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    atlas.canvas.save_png(sprite_path)?;
    if let Err(err) = fs::write(&glyph_path, &bytes) {
        // don't leave an image without its directory behind
        let _ = fs::remove_file(sprite_path);
        return Err(err.into());
    }
    log::info!(
        "wrote {} and {}",
        sprite_path.display(),
        glyph_path.display()
    );

    Ok(atlas)
}

/// Parses every loaded font, keeping load order as fallback order.
pub fn load_fonts(loader: &Loader) -> AtlasResult<Vec<FontdueSource>> {
    loader.assets().map(FontdueSource::from_asset).collect()
}

/// Reads and parses font files, the first path being the highest priority.
pub fn load_font_files<P: AsRef<Path>>(paths: &[P]) -> AtlasResult<Vec<FontdueSource>> {
    let mut loader = Loader::new();
    for path in paths {
        loader.load(path)?;
    }
    load_fonts(&loader)
}
