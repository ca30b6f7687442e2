use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::is_separator,
};
use memchr::memchr;
use std::borrow::Cow;

/// How hyphens between words are tokenized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HyphenPolicy {
    /// Every hyphen is its own token: `well-known` → `well - known`,
    /// `12-34` → `12 - 34`.
    #[default]
    Split,
    /// Compound words keep their hyphen. Hyphen runs (`--`) and hyphens
    /// between two digits are still split: `well-known` stays,
    /// `12-34` → `12 - 34`.
    KeepCompounds,
}

/// Space out hyphens according to a [`HyphenPolicy`].
///
/// Digits are ASCII or native to the active script, so `१२-३४` is a numeric
/// range under Devanagari but `১২-৩৪` only under Bengali.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejoinHyphens {
    pub policy: HyphenPolicy,
}

impl RejoinHyphens {
    pub const fn new(policy: HyphenPolicy) -> Self {
        Self { policy }
    }

    /// Byte spans of maximal hyphen runs.
    fn runs(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
        let bytes = text.as_bytes();
        let mut pos = 0;
        std::iter::from_fn(move || {
            let start = pos + memchr(b'-', &bytes[pos..])?;
            let mut end = start + 1;
            while bytes.get(end) == Some(&b'-') {
                end += 1;
            }
            pos = end;
            Some((start, end))
        })
    }

    fn neighbours(text: &str, start: usize, end: usize) -> (Option<char>, Option<char>) {
        (text[..start].chars().next_back(), text[end..].chars().next())
    }

    fn isolates(&self, text: &str, (start, end): (usize, usize), ctx: &Context) -> bool {
        match self.policy {
            HyphenPolicy::Split => true,
            HyphenPolicy::KeepCompounds => {
                let (left, right) = Self::neighbours(text, start, end);
                end - start > 1
                    || (left.is_some_and(|c| ctx.is_digit(c)) && right.is_some_and(|c| ctx.is_digit(c)))
            }
        }
    }

    #[inline]
    fn touches(c: Option<char>) -> bool {
        c.is_some_and(|c| !is_separator(c))
    }
}

impl Stage for RejoinHyphens {
    fn name(&self) -> &'static str {
        match self.policy {
            HyphenPolicy::Split => "split_hyphens",
            HyphenPolicy::KeepCompounds => "split_numeric_hyphens",
        }
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        Ok(Self::runs(text).any(|run| {
            if !self.isolates(text, run, ctx) {
                return false;
            }
            let (left, right) = Self::neighbours(text, run.0, run.1);
            run.1 - run.0 > 1 || Self::touches(left) || Self::touches(right)
        }))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + 8);
        let mut last = 0;
        for run @ (start, end) in Self::runs(&text) {
            out.push_str(&text[last..start]);
            last = end;
            if !self.isolates(&text, run, ctx) {
                out.push_str(&text[start..end]);
                continue;
            }
            let (left, right) = Self::neighbours(&text, start, end);
            if Self::touches(left) {
                out.push(' ');
            }
            for i in 0..end - start {
                if i > 0 {
                    out.push(' ');
                }
                out.push('-');
            }
            if Self::touches(right) {
                out.push(' ');
            }
        }
        out.push_str(&text[last..]);
        Ok(Cow::Owned(out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::data::{BEN, HIN};

    fn run(policy: HyphenPolicy, ctx: Context, input: &str) -> String {
        RejoinHyphens::new(policy)
            .apply(Cow::Borrowed(input), &ctx)
            .unwrap()
            .into_owned()
    }

    #[test]
    fn split_isolates_compound_hyphens() {
        assert_eq!(run(HyphenPolicy::Split, Context::new(HIN), "well-known"), "well - known");
        assert_eq!(run(HyphenPolicy::Split, Context::new(HIN), "-5"), "- 5");
    }

    #[test]
    fn keep_compounds_leaves_words_alone() {
        let ctx = Context::new(HIN);
        assert_eq!(run(HyphenPolicy::KeepCompounds, ctx, "well-known"), "well-known");
        assert_eq!(run(HyphenPolicy::KeepCompounds, ctx, "-5"), "-5");
        assert_eq!(run(HyphenPolicy::KeepCompounds, ctx, "12-34"), "12 - 34");
        assert_eq!(run(HyphenPolicy::KeepCompounds, ctx, "a--b"), "a - - b");
    }

    #[test]
    fn numeric_ranges_follow_the_script() {
        assert_eq!(
            run(HyphenPolicy::KeepCompounds, Context::new(HIN), "१२-३४"),
            "१२ - ३४"
        );
        assert_eq!(
            run(HyphenPolicy::KeepCompounds, Context::new(HIN), "১২-৩৪"),
            "১২-৩৪"
        );
        assert_eq!(
            run(HyphenPolicy::KeepCompounds, Context::new(BEN), "১২-৩৪"),
            "১২ - ৩৪"
        );
    }

    #[test]
    fn policy_is_visible_in_the_name() {
        assert_eq!(RejoinHyphens::default().name(), "split_hyphens");
        assert_eq!(
            RejoinHyphens::new(HyphenPolicy::KeepCompounds).name(),
            "split_numeric_hyphens"
        );
    }
}
