use crate::{
    context::Context,
    stage::{CharMapper, Stage, StageError, map_chars},
    unicode::{is_blank_format_char, is_removable_format_char},
};
use std::borrow::Cow;

/// Remove invisible format characters that would otherwise glue or split
/// tokens unpredictably.
///
/// | Character | Action |
/// |-----------|--------|
/// | U+FEFF, U+FFFE (byte-order marks) | removed |
/// | U+2060 (word joiner) | removed |
/// | U+00AD (soft hyphen) | removed |
/// | U+200C, U+200D (ZWNJ, ZWJ) | removed |
/// | U+200B (zero-width space) | → ASCII space |
/// | U+00A0 (no-break space) | → ASCII space |
#[derive(Debug, Default, Clone, Copy)]
pub struct StripFormatChars;

impl Stage for StripFormatChars {
    fn name(&self) -> &'static str {
        "strip_format_chars"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        // Every target is outside ASCII.
        if text.is_ascii() {
            return Ok(false);
        }
        Ok(text
            .chars()
            .any(|c| is_removable_format_char(c) || is_blank_format_char(c)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(map_chars(self, text, ctx))
    }

    #[inline]
    fn as_char_mapper(&self, _ctx: &Context) -> Option<&dyn CharMapper> {
        Some(self)
    }
}

impl CharMapper for StripFormatChars {
    #[inline(always)]
    fn map(&self, c: char, _ctx: &Context) -> Option<char> {
        if is_removable_format_char(c) {
            None
        } else if is_blank_format_char(c) {
            Some(' ')
        } else {
            Some(c)
        }
    }
}
