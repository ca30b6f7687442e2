use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::is_terminal,
};
use std::borrow::Cow;

/// Break the line after every standalone terminal token (`!`, `.`, `?`, `।`,
/// `॥`) that has more text after it.
///
/// The whitespace character right after the terminal becomes `\n`; nothing
/// else moves. `"a . b ?"` → `"a .\nb ?"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitSentences;

impl SplitSentences {
    /// Byte offsets of the separators to turn into line breaks.
    fn break_points(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
        let body_end = text.trim_end().len();
        text.split_whitespace().filter_map(move |token| {
            let mut chars = token.chars();
            let single_terminal = matches!((chars.next(), chars.next()), (Some(c), None) if is_terminal(c));
            if !single_terminal {
                return None;
            }
            let end = token.as_ptr() as usize - text.as_ptr() as usize + token.len();
            if end >= body_end {
                return None;
            }
            text[end..].chars().next().map(|sep| (end, sep))
        })
    }
}

impl Stage for SplitSentences {
    fn name(&self) -> &'static str {
        "split_sentences"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        if !text.contains(is_terminal) {
            return Ok(false);
        }
        Ok(Self::break_points(text).any(|(_, sep)| sep != '\n'))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for (at, sep) in Self::break_points(&text) {
            out.push_str(&text[last..at]);
            out.push('\n');
            last = at + sep.len_utf8();
        }
        out.push_str(&text[last..]);
        Ok(Cow::Owned(out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::data::HIN;

    #[test]
    fn trailing_terminal_keeps_the_line_whole() {
        let ctx = Context::new(HIN);
        let out = SplitSentences.apply(Cow::Borrowed("end . "), &ctx).unwrap();
        assert_eq!(out, "end . ");
        assert!(matches!(out, Cow::Borrowed(_)));
    }
}
