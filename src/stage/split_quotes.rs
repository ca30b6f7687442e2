use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::{RIGHT_SINGLE_QUOTE, is_apostrophe, is_latin_letter, is_separator},
};
use memchr::memchr;
use std::borrow::Cow;

/// What sits next to an apostrophe. Native script letters count as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighbour {
    Latin,
    Digit,
    Other,
}

impl Neighbour {
    fn of(c: Option<char>, ctx: &Context) -> Self {
        match c {
            Some(c) if is_latin_letter(c) => Neighbour::Latin,
            Some(c) if ctx.is_digit(c) => Neighbour::Digit,
            _ => Neighbour::Other,
        }
    }
}

/// Split contractions and free standalone apostrophes (`'` and `’`).
///
/// Rules, evaluated on the characters around each apostrophe:
///
/// | Left | Right | Result |
/// |------|-------|--------|
/// | Latin letter | Latin letter | `don't` → `don 't` |
/// | digit | `s` | `1990's` → `1990 's` |
/// | digit | other Latin letter | untouched |
/// | anything else | | space on both sides |
///
/// Latin letters are ASCII letters and U+0080–U+024F; digits are ASCII or
/// native to the active script. Adjacent apostrophes always end up apart.
///
/// Not idempotent: `don 't` splits again into `don ' t` on a second pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitQuotes;

impl SplitQuotes {
    /// Spaces to insert (before, after) the apostrophe at byte `i`.
    fn gaps(text: &str, i: usize, c: char, ctx: &Context) -> (bool, bool) {
        let left_char = text[..i].chars().next_back();
        let right_char = text[i + c.len_utf8()..].chars().next();
        let left = Neighbour::of(left_char, ctx);
        let right = Neighbour::of(right_char, ctx);

        let (before, after) = match (left, right) {
            (Neighbour::Latin, Neighbour::Latin) => (true, false),
            (Neighbour::Digit, Neighbour::Latin) => (right_char == Some('s'), false),
            _ => (true, true),
        };
        let room = |n: Option<char>| n.is_some_and(|n| !is_separator(n));
        (before && room(left_char), after && room(right_char))
    }

    fn has_apostrophe(text: &str) -> bool {
        memchr(b'\'', text.as_bytes()).is_some() || text.contains(RIGHT_SINGLE_QUOTE)
    }
}

impl Stage for SplitQuotes {
    fn name(&self) -> &'static str {
        "split_quotes"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        if !Self::has_apostrophe(text) {
            return Ok(false);
        }
        Ok(text
            .char_indices()
            .filter(|&(_, c)| is_apostrophe(c))
            .any(|(i, c)| Self::gaps(text, i, c, ctx) != (false, false)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + 8);
        for (i, c) in text.char_indices() {
            if !is_apostrophe(c) {
                out.push(c);
                continue;
            }
            let (before, after) = Self::gaps(&text, i, c, ctx);
            if before && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(c);
            if after {
                out.push(' ');
            }
        }
        Ok(Cow::Owned(out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::data::{HIN, TAM};

    fn tokens(ctx: &Context, input: &str) -> Vec<String> {
        SplitQuotes
            .apply(Cow::Borrowed(input), ctx)
            .unwrap()
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn extended_latin_counts_as_latin() {
        let ctx = Context::new(HIN);
        assert_eq!(tokens(&ctx, "l'été"), ["l", "'été"]);
    }

    #[test]
    fn native_letters_are_other() {
        let ctx = Context::new(HIN);
        assert_eq!(tokens(&ctx, "राम's"), ["राम", "'", "s"]);
    }

    #[test]
    fn native_digits_take_possessive_s() {
        assert_eq!(tokens(&Context::new(HIN), "१९९०'s"), ["१९९०", "'s"]);
        assert_eq!(tokens(&Context::new(TAM), "௧௯'s"), ["௧௯", "'s"]);
    }

    #[test]
    fn second_pass_splits_again() {
        let ctx = Context::new(HIN);
        let once = SplitQuotes.apply(Cow::Borrowed("don't"), &ctx).unwrap();
        let twice = SplitQuotes.apply(once, &ctx).unwrap();
        assert_eq!(twice, "don ' t");
    }
}
