use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::{is_c0_control, is_separator},
};
use memchr::memmem;
use std::borrow::Cow;

/// Collapse every whitespace run to a single ASCII space and drop the
/// remaining C0 control characters.
///
/// Whitespace is collapsed *before* controls are dropped, so a tab or newline
/// still separates the words around it while a stray `\x01` inside a word
/// simply disappears.
///
/// | Mode | Edges |
/// |------|-------|
/// | [`CollapseWhitespace::padded`] | exactly one leading and one trailing space |
/// | [`CollapseWhitespace::trimmed`] | no leading or trailing space |
///
/// The padded form opens the tokenizer so every later adjacency rule sees a
/// neighbour on both sides of the first and last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseWhitespace {
    pub pad: bool,
}

impl CollapseWhitespace {
    pub const fn padded() -> Self {
        Self { pad: true }
    }

    pub const fn trimmed() -> Self {
        Self { pad: false }
    }

    fn is_clean(&self, text: &str) -> bool {
        if self.pad {
            if !(text.starts_with(' ') && text.ends_with(' ')) {
                return false;
            }
        } else if text.starts_with(' ') || text.ends_with(' ') {
            return false;
        }
        memmem::find(text.as_bytes(), b"  ").is_none()
            && !text
                .chars()
                .any(|c| c != ' ' && (is_separator(c) || is_c0_control(c)))
    }
}

impl Default for CollapseWhitespace {
    fn default() -> Self {
        Self::padded()
    }
}

impl Stage for CollapseWhitespace {
    fn name(&self) -> &'static str {
        if self.pad {
            "collapse_whitespace_padded"
        } else {
            "collapse_whitespace_trimmed"
        }
    }

    #[inline]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(!self.is_clean(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if self.is_clean(&text) {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len() + 2);
        if self.pad {
            out.push(' ');
        }
        let mut pending = false;
        for c in text.chars() {
            if is_separator(c) {
                pending = true;
                continue;
            }
            if is_c0_control(c) {
                continue;
            }
            if pending && !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            pending = false;
            out.push(c);
        }
        if self.pad && !out.ends_with(' ') {
            out.push(' ');
        }
        Ok(Cow::Owned(out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::data::HIN;

    fn run(stage: CollapseWhitespace, input: &str) -> String {
        stage
            .apply(Cow::Borrowed(input), &Context::new(HIN))
            .unwrap()
            .into_owned()
    }

    #[test]
    fn padded_adds_boundary_spaces() {
        assert_eq!(run(CollapseWhitespace::padded(), "a  b"), " a b ");
        assert_eq!(run(CollapseWhitespace::padded(), "\t a\n"), " a ");
        assert_eq!(run(CollapseWhitespace::padded(), ""), " ");
    }

    #[test]
    fn trimmed_strips_edges() {
        assert_eq!(run(CollapseWhitespace::trimmed(), "  a   b  "), "a b");
        assert_eq!(run(CollapseWhitespace::trimmed(), "   "), "");
    }

    #[test]
    fn controls_vanish_but_tabs_separate() {
        assert_eq!(run(CollapseWhitespace::trimmed(), "ab\u{7}c\td"), "abc d");
        assert_eq!(run(CollapseWhitespace::trimmed(), "a\u{1F}b"), "a b");
    }

    #[test]
    fn unicode_whitespace_is_collapsed() {
        assert_eq!(
            run(CollapseWhitespace::trimmed(), "a\u{2003}\u{3000}b\u{2029}c"),
            "a b c"
        );
    }

    #[test]
    fn clean_input_stays_borrowed() {
        let ctx = Context::new(HIN);
        let input = " already clean ";
        let out = CollapseWhitespace::padded()
            .apply(Cow::Borrowed(input), &ctx)
            .unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        let input = "already clean";
        let out = CollapseWhitespace::trimmed()
            .apply(Cow::Borrowed(input), &ctx)
            .unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }
}
