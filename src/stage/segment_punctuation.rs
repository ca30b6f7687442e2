use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::punct_class,
};
use std::borrow::Cow;

/// Surround punctuation and symbols with spaces so each stands as its own
/// token.
///
/// Classes, in priority order (see [`crate::unicode::PunctClass`]):
///
/// | Class | Range |
/// |-------|-------|
/// | Latin-1 punctuation | U+00A1–U+00BF, U+00D7, U+00F7 |
/// | General punctuation | U+2000–U+2018, U+201A–U+206F (U+2019 excluded) |
/// | Mathematical operators | U+2200–U+22FF |
/// | Number forms (fractions) | U+2150–U+2160 |
/// | Super- and subscripts | U+2070–U+209F |
/// | Currency symbols | U+20A0–U+20CF |
/// | Any other ASCII symbol | everything but letters, digits, whitespace and `` .'`,- `` |
///
/// Dots, apostrophes, commas and hyphens are left for the context-sensitive
/// stages that follow. Characters outside ASCII that fall in no class (script
/// letters, extended Latin) are never touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentPunctuation;

impl Stage for SegmentPunctuation {
    fn name(&self) -> &'static str {
        "segment_punctuation"
    }

    #[inline]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(text.chars().any(|c| punct_class(c).is_some()))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        for c in text.chars() {
            if punct_class(c).is_some() {
                out.push(' ');
                out.push(c);
                out.push(' ');
            } else {
                out.push(c);
            }
        }
        Ok(Cow::Owned(out))
    }
}
