use crate::lang::{CodeRange, Lang, LangEntry, ScriptProfile};

use paste::paste;
use phf::{Map, phf_map};

/// ---------------------------------------------------------------------------
///    Macro – one static profile per script, data kept in its own module
/// ---------------------------------------------------------------------------
macro_rules! define_scripts {
    ($(
        $script:ident, $name:literal,
        letters: [ $( $ls:literal ..= $le:literal ),* $(,)? ],
        specials: [ $( $ss:literal ..= $se:literal ),* $(,)? ],
        digits: $ds:literal ..= $de:literal
    ),* $(,)?) => {
        $(
            paste! {
                mod [<$script:lower _data>] {
                    use super::*;

                    pub const LETTERS: &[CodeRange] = &[
                        $( CodeRange::new($ls, $le) ),*
                    ];

                    pub const SPECIALS: &[CodeRange] = &[
                        $( CodeRange::new($ss, $se) ),*
                    ];
                }

                pub static $script: ScriptProfile = ScriptProfile {
                    name: $name,
                    letters: [<$script:lower _data>]::LETTERS,
                    specials: [<$script:lower _data>]::SPECIALS,
                    digits: CodeRange::new($ds, $de),
                };
            }
        )*
    };
}

/// ---------------------------------------------------------------------------
///    Macro – language constants, lookup table and `from_code`
/// ---------------------------------------------------------------------------
macro_rules! define_languages {
    ($(
        $code:ident, $code_str:literal, $name:literal,
        script: $script:ident,
        companion: $companion:literal
    ),* $(,)?) => {
        $(
            pub const $code: Lang = Lang { code: $code_str, name: $name };
        )*

        pub static LANG_TABLE: Map<&'static str, LangEntry> = phf_map! {
            $(
                $code_str => LangEntry { profile: &$script, companion: $companion },
            )*
        };

        pub static ALL_LANGS: &[Lang] = &[$($code),*];

        pub fn from_code(code: &str) -> Option<Lang> {
            let lower = code.trim().to_ascii_lowercase();
            match lower.as_str() {
                $(
                    $code_str => Some($code),
                )*
                _ => None,
            }
        }
    };
}

// ---------------------------------------------------------------------------
//    Script profiles
//    Letters exclude the native digit block; where a script keeps symbols
//    after its digits (Bengali currency, Tamil numerics) they are letters again.
//    Dandas sit inside the Devanagari block and are listed as specials there,
//    so they split from any neighbour in Devanagari text.
// ---------------------------------------------------------------------------
define_scripts! {
    DEVANAGARI, "Devanagari",
        letters: [0x0900..=0x0965, 0x0970..=0x097F],
        specials: [0x0964..=0x0965],
        digits: 0x0966..=0x096F,

    BENGALI, "Bengali",
        letters: [0x0980..=0x09E5, 0x09F0..=0x09FF],
        specials: [0x09F2..=0x09F3, 0x09FA..=0x09FB],
        digits: 0x09E6..=0x09EF,

    GURMUKHI, "Gurmukhi",
        letters: [0x0A00..=0x0A65, 0x0A70..=0x0A7F],
        specials: [],
        digits: 0x0A66..=0x0A6F,

    GUJARATI, "Gujarati",
        letters: [0x0A80..=0x0AE5, 0x0AF0..=0x0AFF],
        specials: [0x0AD0..=0x0AD0, 0x0AF1..=0x0AF1],
        digits: 0x0AE6..=0x0AEF,

    ORIYA, "Oriya",
        letters: [0x0B00..=0x0B65, 0x0B70..=0x0B7F],
        specials: [0x0B72..=0x0B77],
        digits: 0x0B66..=0x0B6F,

    TAMIL, "Tamil",
        letters: [0x0B80..=0x0BE5, 0x0BF3..=0x0BFF],
        specials: [0x0BD0..=0x0BD0, 0x0BF3..=0x0BFF],
        digits: 0x0BE6..=0x0BF2,

    TELUGU, "Telugu",
        letters: [0x0C00..=0x0C65, 0x0C70..=0x0C7F],
        specials: [0x0C78..=0x0C7F],
        digits: 0x0C66..=0x0C6F,

    KANNADA, "Kannada",
        letters: [0x0C80..=0x0CE5, 0x0CF1..=0x0CFF],
        specials: [],
        digits: 0x0CE6..=0x0CEF,

    MALAYALAM, "Malayalam",
        letters: [0x0D00..=0x0D65, 0x0D73..=0x0D7F],
        specials: [0x0D73..=0x0D75],
        digits: 0x0D66..=0x0D72,
}

// ---------------------------------------------------------------------------
//    Language definitions (single source of truth)
//    Adding a language is one row here; no stage branches on the language.
// ---------------------------------------------------------------------------
define_languages! {
    HIN, "hin", "Hindi",     script: DEVANAGARI, companion: "eng",
    MAR, "mar", "Marathi",   script: DEVANAGARI, companion: "eng",
    NEP, "nep", "Nepali",    script: DEVANAGARI, companion: "eng",
    BOD, "bod", "Bodo",      script: DEVANAGARI, companion: "eng",
    KOK, "kok", "Konkani",   script: DEVANAGARI, companion: "eng",
    BEN, "ben", "Bengali",   script: BENGALI,    companion: "eng",
    ASM, "asm", "Assamese",  script: BENGALI,    companion: "eng",
    GUJ, "guj", "Gujarati",  script: GUJARATI,   companion: "eng",
    MAL, "mal", "Malayalam", script: MALAYALAM,  companion: "eng",
    PAN, "pan", "Punjabi",   script: GURMUKHI,   companion: "eng",
    TEL, "tel", "Telugu",    script: TELUGU,     companion: "eng",
    TAM, "tam", "Tamil",     script: TAMIL,      companion: "eng",
    KAN, "kan", "Kannada",   script: KANNADA,    companion: "eng",
    ORI, "ori", "Oriya",     script: ORIYA,      companion: "eng",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_profile() {
        assert_eq!(ALL_LANGS.len(), 14);
        for lang in ALL_LANGS {
            assert!(lang.profile().is_some(), "{lang} missing from LANG_TABLE");
        }
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(from_code("hin"), Some(HIN));
        assert_eq!(from_code("TAM"), Some(TAM));
        assert_eq!(from_code(" ori "), Some(ORI));
        assert_eq!(from_code("eng"), None);
        assert_eq!(from_code(""), None);
    }

    #[test]
    fn shared_scripts_share_profiles() {
        for lang in [MAR, NEP, BOD, KOK] {
            assert_eq!(lang.profile().unwrap().name, "Devanagari");
        }
        assert_eq!(ASM.profile().unwrap().name, "Bengali");
        assert_eq!(PAN.profile().unwrap().name, "Gurmukhi");
    }

    #[test]
    fn dandas_are_never_letters() {
        for lang in ALL_LANGS {
            let p = lang.profile().unwrap();
            assert!(!p.is_letter('\u{0964}'));
            assert!(!p.is_letter('\u{0965}'));
        }
    }

    #[test]
    fn digits_are_not_letters() {
        let p = HIN.profile().unwrap();
        assert!(p.is_native_digit('१'));
        assert!(!p.is_letter('१'));
        assert!(p.is_letter('क'));

        let tam = TAM.profile().unwrap();
        assert!(tam.is_native_digit('\u{0BF0}'));
        assert!(tam.is_special('\u{0BF3}'));
        assert!(tam.is_letter('\u{0BF3}'));
    }
}
