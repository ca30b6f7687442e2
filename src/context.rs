// src/context.rs
// Language configuration read by every stage. Tiny, Copy, 'static data only.

use crate::lang::{DEFAULT_LANG, Lang, ScriptProfile};

/// Runtime context passed to every tokenizer stage.
///
/// - `lang`: human identifier (for logging and debugging)
/// - `profile`: the script data used in every hot path; `None` disables the
///   script-aware stages
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub lang: Lang,
    pub profile: Option<&'static ScriptProfile>,
}

impl Default for Context {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_LANG)
    }
}

impl Context {
    /// Context with the language's registered script profile.
    #[inline(always)]
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            profile: lang.profile(),
        }
    }

    /// Context that keeps the language label but applies no script rules.
    #[inline(always)]
    pub fn unscripted(lang: Lang) -> Self {
        Self {
            lang,
            profile: None,
        }
    }

    /// ASCII digit or a native digit of the active script.
    #[inline(always)]
    pub fn is_digit(&self, c: char) -> bool {
        c.is_ascii_digit() || self.profile.is_some_and(|p| p.is_native_digit(c))
    }

    #[inline(always)]
    pub fn is_script_letter(&self, c: char) -> bool {
        self.profile.is_some_and(|p| p.is_letter(c))
    }
}
