//! Character classes shared by the tokenizer stages.

/// Devanagari danda, the sentence-final mark of most Indic scripts.
pub const PURNA_VIRAM: char = '\u{0964}';
/// Double danda, closes paragraphs and verses.
pub const DEERGH_VIRAM: char = '\u{0965}';
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Invisible characters deleted outright: byte-order marks, word joiner,
/// soft hyphen, zero-width (non-)joiner.
#[inline(always)]
pub const fn is_removable_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{FEFF}' | '\u{FFFE}' | '\u{2060}' | '\u{00AD}' | '\u{200C}' | '\u{200D}'
    )
}

/// Characters that separate words but are not ASCII space:
/// zero-width space and no-break space.
#[inline(always)]
pub const fn is_blank_format_char(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{00A0}')
}

/// Whitespace for token separation. Includes the C0 information separators
/// (U+001C..U+001F) which `char::is_whitespace` does not.
#[inline(always)]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c as u32, 0x1C..=0x1F)
}

#[inline(always)]
pub const fn is_c0_control(c: char) -> bool {
    (c as u32) < 0x20
}

/// Tokens that close a sentence.
#[inline(always)]
pub const fn is_terminal(c: char) -> bool {
    matches!(c, '!' | '.' | '?' | PURNA_VIRAM | DEERGH_VIRAM)
}

#[inline(always)]
pub const fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | RIGHT_SINGLE_QUOTE)
}

/// ASCII letters plus everything from U+0080 through Latin Extended-B.
#[inline(always)]
pub const fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c as u32, 0x0080..=0x024F)
}

/// Punctuation and symbol classes that always stand as their own token.
///
/// Listed in priority order: a character belongs to the first class whose
/// range holds it. `AsciiOther` is the catch-all and must stay last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctClass {
    Latin1,
    General,
    Math,
    Fraction,
    SuperSub,
    Currency,
    AsciiOther,
}

impl PunctClass {
    pub const ORDER: [PunctClass; 7] = [
        PunctClass::Latin1,
        PunctClass::General,
        PunctClass::Math,
        PunctClass::Fraction,
        PunctClass::SuperSub,
        PunctClass::Currency,
        PunctClass::AsciiOther,
    ];

    #[inline]
    pub const fn contains(self, c: char) -> bool {
        let cp = c as u32;
        match self {
            PunctClass::Latin1 => matches!(cp, 0x00A1..=0x00BF | 0x00D7 | 0x00F7),
            // U+2019 stays attached: it doubles as an apostrophe.
            PunctClass::General => matches!(cp, 0x2000..=0x2018 | 0x201A..=0x206F),
            PunctClass::Math => matches!(cp, 0x2200..=0x22FF),
            PunctClass::Fraction => matches!(cp, 0x2150..=0x2160),
            PunctClass::SuperSub => matches!(cp, 0x2070..=0x209F),
            PunctClass::Currency => matches!(cp, 0x20A0..=0x20CF),
            PunctClass::AsciiOther => {
                c.is_ascii()
                    && !c.is_ascii_alphanumeric()
                    && !c.is_ascii_whitespace()
                    && !matches!(c, '.' | '\'' | '`' | ',' | '-')
                    && !is_c0_control(c)
            }
        }
    }
}

#[inline]
pub fn punct_class(c: char) -> Option<PunctClass> {
    if c.is_ascii_alphanumeric() || c == ' ' {
        return None;
    }
    PunctClass::ORDER.into_iter().find(|class| class.contains(c))
}

/// Title-case a single token: first cased letter of every alphabetic run
/// upper, the rest lower (`"o'NEIL"` → `"O'Neil"`).
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_cased = false;
    for c in word.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_alphabetic();
    }
    out
}
