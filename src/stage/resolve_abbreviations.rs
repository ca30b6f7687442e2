use crate::{
    context::Context,
    lexicon::Lexicon,
    prefixes::{NonBreakingPrefixes, PrefixClass},
    stage::{Stage, StageError},
    unicode::title_case,
};
use memchr::memchr;
use std::{borrow::Cow, fmt, sync::Arc};

/// What happens to the trailing period of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The token is an abbreviation; `Dr.` stays `Dr.`.
    Keep,
    /// The period is punctuation; `end.` becomes `end .`.
    Detach,
}

/// Decide, for every token that ends in `.`, whether the period belongs to
/// the word.
///
/// With `P` the token minus its period and `next` the following token, the
/// first matching rule wins:
///
/// 1. `P` is all digits → detach (`1999.`, `१२.`)
/// 2. `P` has an inner `.` and an ASCII letter → keep (`U.S.`, `e.g.`)
/// 3. `P` is always non-breaking, or `next` starts lowercase → keep
/// 4. `P` is numeric-only and `next` starts with a digit → keep (`No. 5`)
/// 5. `next` starts with a digit → keep, unless a lexicon is configured and
///    knows `P` (lower- or title-cased, longer than two chars) → detach
/// 6. otherwise → detach
///
/// Whitespace between tokens is preserved; a detached period gets a single
/// space in front of it.
#[derive(Clone)]
pub struct ResolveAbbreviations {
    prefixes: Arc<NonBreakingPrefixes>,
    lexicon: Option<Arc<dyn Lexicon>>,
}

impl fmt::Debug for ResolveAbbreviations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveAbbreviations")
            .field("prefixes", &self.prefixes.len())
            .field("lexicon", &self.lexicon.is_some())
            .finish()
    }
}

impl Default for ResolveAbbreviations {
    fn default() -> Self {
        Self::new(NonBreakingPrefixes::bundled())
    }
}

impl ResolveAbbreviations {
    pub fn new(prefixes: Arc<NonBreakingPrefixes>) -> Self {
        Self {
            prefixes,
            lexicon: None,
        }
    }

    pub fn with_lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn decide(&self, stem: &str, next: Option<&str>) -> Decision {
        let next_first = next.and_then(|n| n.chars().next());
        let next_is_digit = next_first.is_some_and(char::is_numeric);

        if stem.is_empty() {
            return Decision::Keep;
        }
        if stem.chars().all(char::is_numeric) {
            return Decision::Detach;
        }
        if stem.contains('.') && stem.bytes().any(|b| b.is_ascii_alphabetic()) {
            return Decision::Keep;
        }
        let class = self.prefixes.class(stem);
        if class == Some(PrefixClass::AlwaysNonBreaking) || next_first.is_some_and(char::is_lowercase)
        {
            return Decision::Keep;
        }
        if class == Some(PrefixClass::NumericOnly) && next_is_digit {
            return Decision::Keep;
        }
        if next_is_digit {
            return match &self.lexicon {
                Some(lexicon) if stem.chars().count() > 2 && Self::known(lexicon.as_ref(), stem) => {
                    Decision::Detach
                }
                _ => Decision::Keep,
            };
        }
        Decision::Detach
    }

    fn known(lexicon: &dyn Lexicon, stem: &str) -> bool {
        lexicon.contains(&stem.to_lowercase()) || lexicon.contains(&title_case(stem))
    }

    /// Byte offsets (in `text`) of the periods to detach.
    fn detach_points(&self, text: &str) -> Vec<usize> {
        let mut points = Vec::new();
        let mut tokens = text.split_whitespace().peekable();
        while let Some(token) = tokens.next() {
            let Some(stem) = token.strip_suffix('.') else {
                continue;
            };
            if self.decide(stem, tokens.peek().copied()) == Decision::Detach {
                let offset = token.as_ptr() as usize - text.as_ptr() as usize;
                points.push(offset + stem.len());
            }
        }
        points
    }
}

impl Stage for ResolveAbbreviations {
    fn name(&self) -> &'static str {
        "resolve_abbreviations"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        if memchr(b'.', text.as_bytes()).is_none() {
            return Ok(false);
        }
        Ok(!self.detach_points(text).is_empty())
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if memchr(b'.', text.as_bytes()).is_none() {
            return Ok(text);
        }
        let points = self.detach_points(&text);
        if points.is_empty() {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + points.len());
        let mut last = 0;
        for point in points {
            out.push_str(&text[last..point]);
            out.push(' ');
            last = point;
        }
        out.push_str(&text[last..]);
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::{assert_stage_contract, lang::Lang, testing::stage_contract::StageTestConfig};

    impl StageTestConfig for ResolveAbbreviations {
        fn samples(_lang: Lang) -> &'static [&'static str] {
            &[
                "Hello world. How are you?",
                "Dr. Smith met Mr. Jones.",
                "see No. 5 and No. Then",
                "in 1999. Then",
                "a. b. C",
                "U.S. Army",
                " . ",
                "",
            ]
        }

        fn should_pass_through(_lang: Lang) -> &'static [&'static str] {
            &[
                "hello",
                "Dr. Smith",
                "U.S. Army",
                "e.g. this",
                "No. 5",
                "ends. lower",
                " . ",
                "नमस्ते दुनिया",
            ]
        }

        fn should_transform(_lang: Lang) -> &'static [(&'static str, &'static str)] {
            &[
                ("world. How", "world . How"),
                ("in 1999. Then", "in 1999 . Then"),
                ("end.", "end ."),
                ("No. Then", "No . Then"),
                ("१२. अब", "१२ . अब"),
                (" stop. ", " stop . "),
            ]
        }
    }

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(ResolveAbbreviations::default());
    }
}
