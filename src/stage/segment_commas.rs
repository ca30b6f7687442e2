use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::is_separator,
};
use memchr::memchr;
use std::borrow::Cow;

/// Free commas from the words around them, leaving digit groupings alone.
///
/// A side of the comma gets a space when its neighbour is present, is not
/// whitespace and is not a digit (ASCII or the active script's native digit):
///
/// | Input | Output |
/// |-------|--------|
/// | `word,word` | `word , word` |
/// | `3,000` | `3,000` |
/// | `a,5` | `a ,5` |
/// | `५,x` | `५, x` |
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentCommas;

impl SegmentCommas {
    #[inline]
    fn wants_space(neighbour: Option<char>, ctx: &Context) -> bool {
        neighbour.is_some_and(|c| !is_separator(c) && !ctx.is_digit(c))
    }

    fn comma_sides(text: &str, i: usize, ctx: &Context) -> (bool, bool) {
        let left = text[..i].chars().next_back();
        let right = text[i + 1..].chars().next();
        (
            Self::wants_space(left, ctx),
            Self::wants_space(right, ctx),
        )
    }
}

impl Stage for SegmentCommas {
    fn name(&self) -> &'static str {
        "segment_commas"
    }

    #[inline]
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        if memchr(b',', text.as_bytes()).is_none() {
            return Ok(false);
        }
        Ok(text
            .match_indices(',')
            .any(|(i, _)| Self::comma_sides(text, i, ctx) != (false, false)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + 8);
        let mut last = 0;
        for (i, _) in text.match_indices(',') {
            out.push_str(&text[last..i]);
            let (before, after) = Self::comma_sides(&text, i, ctx);
            if before && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(',');
            if after {
                out.push(' ');
            }
            last = i + 1;
        }
        out.push_str(&text[last..]);
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::{assert_stage_contract, lang::Lang, testing::stage_contract::StageTestConfig};

    impl StageTestConfig for SegmentCommas {
        fn samples(_lang: Lang) -> &'static [&'static str] {
            &[
                "word,word",
                "3,000 and 1,2,3",
                "a,,b",
                ",lead trail,",
                "राम,श्याम",
                "",
            ]
        }

        fn should_pass_through(_lang: Lang) -> &'static [&'static str] {
            &["hello", "3,000", "1,000,000", "a , b", " , ", "नमस्ते दुनिया"]
        }

        fn should_transform(_lang: Lang) -> &'static [(&'static str, &'static str)] {
            &[
                ("word,word", "word , word"),
                ("a,5", "a ,5"),
                ("5,a", "5, a"),
                ("a,,b", "a , , b"),
                (",x", ", x"),
                ("x,", "x ,"),
            ]
        }
    }

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(SegmentCommas);
    }
}
