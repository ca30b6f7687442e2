use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::{PURNA_VIRAM, is_separator},
};
use memchr::memchr;
use std::borrow::Cow;

/// Canonicalize sentence-final dandas.
///
/// - `|` → `।`
/// - `.` followed by whitespace and a danda (or `|`) → `।`
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeDanda;

impl NormalizeDanda {
    #[inline]
    fn is_danda_like(c: char) -> bool {
        c == PURNA_VIRAM || c == '|'
    }

    /// Byte length of a whitespace run plus the danda closing it, when `rest`
    /// starts with one.
    fn gap_before_danda(rest: &str) -> Option<usize> {
        let gap = rest.find(|c: char| !is_separator(c))?;
        if gap == 0 {
            return None;
        }
        rest[gap..]
            .chars()
            .next()
            .filter(|&c| Self::is_danda_like(c))
            .map(|c| gap + c.len_utf8())
    }
}

impl Stage for NormalizeDanda {
    fn name(&self) -> &'static str {
        "normalize_danda"
    }

    #[inline]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        let bytes = text.as_bytes();
        if memchr(b'|', bytes).is_some() {
            return Ok(true);
        }
        if memchr(b'.', bytes).is_none() {
            return Ok(false);
        }
        Ok(text
            .match_indices('.')
            .any(|(i, _)| Self::gap_before_danda(&text[i + 1..]).is_some()))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut rest: &str = &text;
        while let Some(c) = rest.chars().next() {
            let after = &rest[c.len_utf8()..];
            match c {
                '|' => {
                    out.push(PURNA_VIRAM);
                    rest = after;
                }
                '.' => match Self::gap_before_danda(after) {
                    Some(consumed) => {
                        out.push(PURNA_VIRAM);
                        rest = &after[consumed..];
                    }
                    None => {
                        out.push(c);
                        rest = after;
                    }
                },
                _ => {
                    out.push(c);
                    rest = after;
                }
            }
        }
        Ok(Cow::Owned(out))
    }
}
