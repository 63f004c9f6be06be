// fonts reach the rest of the crate only through `GlyphSource`:
// - list the characters a font can draw
// - measure a character's ink box
// - draw it onto the canvas
// the packer and the directory never see a font file.

pub mod coverage;
pub mod fontdue_source;
pub mod source;

pub use fontdue_source::FontdueSource;
pub use source::{DrawStyle, GlyphSource, InkBox};
