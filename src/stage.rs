//! Core tokenizer stage abstraction.
//!
//! Every step of the tokenizer is a total `&str → String` rewrite. Stages
//! receive a `Cow<str>` and hand it back untouched (`Cow::Borrowed`) whenever
//! `needs_apply` says there is nothing to do, so clean lines never allocate in
//! that stage.
//!
//! Stages that are a pure 1→0/1 character mapping can also expose a
//! [`CharMapper`]; the process then maps characters directly instead of
//! calling `apply`.

pub mod collapse_whitespace;
pub mod normalize_danda;
pub mod rejoin_hyphens;
pub mod resolve_abbreviations;
pub mod segment_commas;
pub mod segment_punctuation;
pub mod segment_script;
pub mod split_quotes;
pub mod split_sentences;
pub mod strip_format_chars;

use crate::context::Context;
use std::borrow::Cow;
use thiserror::Error;

/// Public error type for every stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("tokenization failed at stage `{0}`: {1}")]
    Failed(&'static str, String),
}

/// A single tokenization step.
pub trait Stage: Send + Sync {
    /// Human-readable name – used for logging and error messages.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `Ok(false)` skips the whole stage.
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError>;

    /// Allocation-aware transformation. Must always be correct, even when
    /// called without consulting `needs_apply` first.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError>;

    /// Return `Some(self)` **iff** this stage is a context-free character
    /// mapping. The default is `None`.
    #[inline]
    fn as_char_mapper(&self, _ctx: &Context) -> Option<&dyn CharMapper> {
        None
    }
}

/// Per-character rewrite used by mapping stages.
pub trait CharMapper: Send + Sync {
    /// Map a single Unicode scalar value.
    /// Return `None` if the character should be **removed**.
    fn map(&self, c: char, ctx: &Context) -> Option<char>;
}

/// Run a mapper over `text`, allocating only if some character changes.
pub(crate) fn map_chars<'a>(
    mapper: &dyn CharMapper,
    text: Cow<'a, str>,
    ctx: &Context,
) -> Cow<'a, str> {
    let first_change = text
        .char_indices()
        .find(|&(_, c)| mapper.map(c, ctx) != Some(c))
        .map(|(i, _)| i);
    let Some(split) = first_change else {
        return text;
    };
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..split]);
    out.extend(text[split..].chars().filter_map(|c| mapper.map(c, ctx)));
    Cow::Owned(out)
}
