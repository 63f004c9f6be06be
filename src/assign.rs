use std::collections::BTreeSet;

use crate::{
    error::{AtlasError, AtlasResult},
    text::GlyphSource,
};

/// Characters claimed by one source, ascending by codepoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceGlyphs {
    /// Position of the source in the input list, 0 is the highest priority.
    pub source: usize,
    pub chars: Vec<char>,
}

/// Result of fallback assignment. Groups keep source priority order and never repeat a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterAssignment {
    pub groups: Vec<SourceGlyphs>,
}

impl CharacterAssignment {
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.chars.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.chars.is_empty())
    }

    /// `(source, char)` pairs in packing order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.chars.iter().map(move |ch| (group.source, *ch)))
    }

    pub fn owner(&self, ch: char) -> Option<usize> {
        self.groups
            .iter()
            .find(|group| group.chars.binary_search(&ch).is_ok())
            .map(|group| group.source)
    }
}

/// Whether a character is worth a slot in the atlas.
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    if ch.is_control() || ch.is_whitespace() {
        return false;
    }
    let cp = ch as u32;
    // format characters (general category Cf) plus the line and paragraph separators
    let invisible = matches!(
        cp,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x2028..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    );
    let private_use =
        matches!(cp, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD);
    let noncharacter = matches!(cp, 0xFDD0..=0xFDEF) || cp & 0xFFFE == 0xFFFE;
    !(invisible || private_use || noncharacter)
}

/// Gives every character to the first source that supports it.
///
/// With a `charset`, only its characters are assigned and any left without a source fail the
/// whole assignment with [`AtlasError::UnresolvedCharacters`].
pub fn assign_characters<S: GlyphSource>(
    sources: &[S],
    charset: Option<&BTreeSet<char>>,
) -> AtlasResult<CharacterAssignment> {
    let mut claimed = BTreeSet::new();
    let mut pending = charset.cloned();
    let mut groups = Vec::new();

    for (rank, source) in sources.iter().enumerate() {
        let mut chars: BTreeSet<char> = source
            .supported_codepoints()
            .into_iter()
            .filter(|ch| is_printable(*ch) && !claimed.contains(ch))
            .collect();
        if let Some(pending) = pending.as_mut() {
            chars.retain(|ch| pending.contains(ch));
            pending.retain(|ch| !chars.contains(ch));
        }
        log::debug!("{} claims {} characters", source.name(), chars.len());

        if chars.is_empty() {
            continue;
        }
        claimed.extend(chars.iter().copied());
        groups.push(SourceGlyphs {
            source: rank,
            chars: chars.into_iter().collect(),
        });
    }

    if let Some(pending) = pending.filter(|pending| !pending.is_empty()) {
        return Err(AtlasError::UnresolvedCharacters(pending.into_iter().collect()));
    }

    Ok(CharacterAssignment { groups })
}
