pub mod data;

pub use data::{ALL_LANGS, LANG_TABLE, from_code};

/// A supported language, identified by its ISO-639-3 code.
///
/// Every language maps to exactly one [`ScriptProfile`] through [`LANG_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lang {
    pub code: &'static str,
    pub name: &'static str,
}

impl Lang {
    #[inline(always)]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The table entry for this language, if the language is registered.
    #[inline]
    pub fn entry(&self) -> Option<&'static LangEntry> {
        LANG_TABLE.get(self.code)
    }

    #[inline]
    pub fn profile(&self) -> Option<&'static ScriptProfile> {
        self.entry().map(|e| e.profile)
    }

    /// Look a language up by code, case-insensitively (`"hin"`, `"HIN"`).
    #[inline]
    pub fn from_code(code: &str) -> Option<Lang> {
        from_code(code)
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

pub const DEFAULT_LANG: Lang = data::HIN;

/// Inclusive range of Unicode scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeRange {
    pub start: u32,
    pub end: u32,
}

impl CodeRange {
    #[inline(always)]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline(always)]
    pub const fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        cp >= self.start && cp <= self.end
    }
}

#[inline(always)]
fn any_contains(ranges: &[CodeRange], c: char) -> bool {
    ranges.iter().any(|r| r.contains(c))
}

/// Per-script character data driving boundary detection and digit handling.
///
/// Profiles are `'static` and never mutated, so a `&ScriptProfile` can be
/// shared across threads freely.
#[derive(Clone, Copy, Debug)]
pub struct ScriptProfile {
    pub name: &'static str,
    /// Letters and combining marks of the script.
    pub letters: &'static [CodeRange],
    /// Symbols that always stand as their own token.
    pub specials: &'static [CodeRange],
    /// Native decimal digits.
    pub digits: CodeRange,
}

impl ScriptProfile {
    /// Is `c` part of a script run? Purna viram and deergh viram never are,
    /// even where they sit inside the script's block.
    #[inline]
    pub fn is_letter(&self, c: char) -> bool {
        !matches!(c, '\u{0964}' | '\u{0965}') && any_contains(self.letters, c)
    }

    #[inline]
    pub fn is_special(&self, c: char) -> bool {
        any_contains(self.specials, c)
    }

    #[inline]
    pub fn is_native_digit(&self, c: char) -> bool {
        self.digits.contains(c)
    }
}

/// Row of the language table.
#[derive(Clone, Copy, Debug)]
pub struct LangEntry {
    pub profile: &'static ScriptProfile,
    /// Language of the lexicon used to disambiguate Latin-script abbreviations.
    pub companion: &'static str,
}
