//! Shielding of repeated terminal punctuation.
//!
//! Ellipses (`...`) and doubled dandas (`।।`, `॥॥`) must reach the output as
//! one token, untouched by the abbreviation, boundary and sentence rules that
//! treat a single `.` or `।` as meaningful. [`RunProtector::encode`] swaps
//! every such run for a placeholder character and records the run's kind and
//! exact length on a per-line side channel; [`RunProtector::decode`] puts the
//! literal runs back.

use crate::{
    stage::StageError,
    unicode::{DEERGH_VIRAM, PURNA_VIRAM},
};
use memchr::{memchr, memmem};
use smallvec::SmallVec;
use std::borrow::Cow;

/// In-text stand-in for a protected run. A Unicode noncharacter: it never
/// appears in interchanged text, is not whitespace, not a digit, not cased,
/// and belongs to no script profile.
pub const PLACEHOLDER: char = '\u{FDD0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Dot,
    PurnaViram,
    DeerghViram,
}

impl RunKind {
    #[inline]
    pub const fn marker(self) -> char {
        match self {
            RunKind::Dot => '.',
            RunKind::PurnaViram => PURNA_VIRAM,
            RunKind::DeerghViram => DEERGH_VIRAM,
        }
    }

    #[inline]
    pub const fn from_marker(c: char) -> Option<Self> {
        match c {
            '.' => Some(RunKind::Dot),
            PURNA_VIRAM => Some(RunKind::PurnaViram),
            DEERGH_VIRAM => Some(RunKind::DeerghViram),
            _ => None,
        }
    }
}

/// A protected run: which marker, and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlaceholder {
    pub kind: RunKind,
    pub count: usize,
}

impl RunPlaceholder {
    /// Append the literal run to `out`.
    #[inline]
    pub fn write_to(&self, out: &mut String) {
        out.extend(std::iter::repeat_n(self.kind.marker(), self.count));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shielded {
    Run(RunPlaceholder),
    /// A placeholder character that was already in the input.
    Literal,
}

/// Side channel of one line: one entry per placeholder, in text order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProtectedRuns {
    entries: SmallVec<[Shielded; 4]>,
}

impl ProtectedRuns {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The recorded runs, excluding literal placeholders from the input.
    pub fn runs(&self) -> impl Iterator<Item = RunPlaceholder> + '_ {
        self.entries.iter().filter_map(|e| match e {
            Shielded::Run(run) => Some(*run),
            Shielded::Literal => None,
        })
    }
}

pub struct RunProtector;

impl RunProtector {
    /// Replace every run of two or more identical terminal markers that has
    /// another character after it with ` <placeholder> `.
    ///
    /// A run that ends the text is left alone; inside the tokenizer the
    /// padded line always has a trailing space, so only bare stage-level input
    /// sees that case.
    pub fn encode(text: Cow<'_, str>) -> (Cow<'_, str>, ProtectedRuns) {
        let mut runs = ProtectedRuns::default();
        if !Self::needs_encode(&text) {
            return (text, runs);
        }

        let mut out = String::with_capacity(text.len() + 8);
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == PLACEHOLDER {
                runs.entries.push(Shielded::Literal);
                out.push(c);
                continue;
            }
            let Some(kind) = RunKind::from_marker(c) else {
                out.push(c);
                continue;
            };
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            if count >= 2 && chars.peek().is_some() {
                out.push(' ');
                out.push(PLACEHOLDER);
                out.push(' ');
                runs.entries.push(Shielded::Run(RunPlaceholder { kind, count }));
            } else {
                out.extend(std::iter::repeat_n(c, count));
            }
        }
        log::trace!("protected {} run(s)", runs.len());
        (Cow::Owned(out), runs)
    }

    /// Expand every placeholder back into its recorded literal.
    pub fn decode<'a>(
        text: Cow<'a, str>,
        runs: &ProtectedRuns,
    ) -> Result<Cow<'a, str>, StageError> {
        if runs.is_empty() {
            return Ok(text);
        }
        let mut entries = runs.entries.iter();
        let mut out = String::with_capacity(text.len() + 16);
        for c in text.chars() {
            if c != PLACEHOLDER {
                out.push(c);
                continue;
            }
            match entries.next() {
                Some(Shielded::Run(run)) => run.write_to(&mut out),
                Some(Shielded::Literal) => out.push(PLACEHOLDER),
                None => {
                    return Err(StageError::Failed(
                        "restore_runs",
                        "placeholder found with no recorded run".to_owned(),
                    ));
                }
            }
        }
        if entries.next().is_some() {
            return Err(StageError::Failed(
                "restore_runs",
                "recorded run has no placeholder left in the text".to_owned(),
            ));
        }
        Ok(Cow::Owned(out))
    }

    fn needs_encode(text: &str) -> bool {
        let bytes = text.as_bytes();
        if memmem::find(bytes, PLACEHOLDER.encode_utf8(&mut [0; 4]).as_bytes()).is_some() {
            return true;
        }
        if memchr(b'.', bytes).is_none() && !text.contains([PURNA_VIRAM, DEERGH_VIRAM]) {
            return false;
        }
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if RunKind::from_marker(c).is_none() || chars.peek() != Some(&c) {
                continue;
            }
            while chars.peek() == Some(&c) {
                chars.next();
            }
            if chars.peek().is_some() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(input: &str) -> String {
        let (encoded, runs) = RunProtector::encode(Cow::Borrowed(input));
        RunProtector::decode(encoded, &runs).unwrap().into_owned()
    }

    #[test]
    fn dot_runs_round_trip_exactly() {
        for k in 2..=50 {
            let dots = ".".repeat(k);
            let input = format!("wait{dots} ");
            let (encoded, runs) = RunProtector::encode(Cow::Borrowed(input.as_str()));
            assert!(!encoded.contains('.'), "run of {k} leaked: {encoded:?}");
            let recorded: Vec<_> = runs.runs().collect();
            assert_eq!(
                recorded,
                [RunPlaceholder {
                    kind: RunKind::Dot,
                    count: k
                }]
            );
            let decoded = RunProtector::decode(encoded, &runs).unwrap();
            assert_eq!(decoded.split_whitespace().collect::<Vec<_>>(), ["wait", dots.as_str()]);
        }
    }

    #[test]
    fn danda_runs_are_protected() {
        let (encoded, runs) = RunProtector::encode(Cow::Borrowed("राम।। श्याम॥॥॥ "));
        assert!(!encoded.contains(PURNA_VIRAM));
        assert!(!encoded.contains(DEERGH_VIRAM));
        let recorded: Vec<_> = runs.runs().collect();
        assert_eq!(
            recorded,
            [
                RunPlaceholder {
                    kind: RunKind::PurnaViram,
                    count: 2
                },
                RunPlaceholder {
                    kind: RunKind::DeerghViram,
                    count: 3
                },
            ]
        );
        let mut literal = String::from("x");
        recorded[1].write_to(&mut literal);
        assert_eq!(literal, "x॥॥॥");
    }

    #[test]
    fn single_markers_and_trailing_runs_are_left_alone() {
        let (encoded, runs) = RunProtector::encode(Cow::Borrowed("a. b। c"));
        assert!(runs.is_empty());
        assert!(matches!(encoded, Cow::Borrowed(_)));

        let (encoded, runs) = RunProtector::encode(Cow::Borrowed("end..."));
        assert!(runs.is_empty());
        assert_eq!(encoded, "end...");
    }

    #[test]
    fn mixed_markers_are_separate_runs() {
        let (_, runs) = RunProtector::encode(Cow::Borrowed("..।। "));
        assert_eq!(runs.runs().count(), 2);
        assert_eq!(round_trip("..।। ").split_whitespace().collect::<String>(), "..।।");
    }

    #[test]
    fn existing_placeholders_survive() {
        let input = format!("a{PLACEHOLDER}b .. c");
        let out = round_trip(&input);
        assert_eq!(out.split_whitespace().collect::<Vec<_>>(), [format!("a{PLACEHOLDER}b").as_str(), "..", "c"]);
    }

    #[test]
    fn decode_rejects_a_mismatched_side_channel() {
        let (_, runs) = RunProtector::encode(Cow::Borrowed("x.. y"));
        assert!(RunProtector::decode(Cow::Borrowed("no placeholder"), &runs).is_err());
        let stray = format!("{PLACEHOLDER} {PLACEHOLDER}");
        assert!(RunProtector::decode(Cow::Owned(stray), &runs).is_err());
    }
}
