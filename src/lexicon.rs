//! Optional word list consulted when a period sits between a word and a number.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Dictionary lookup used by the abbreviation resolver.
///
/// Lookups are exact and case-sensitive. Implementations backed by slow or
/// remote storage must answer `false` when they cannot answer in time; the
/// resolver then keeps the period attached.
pub trait Lexicon: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

impl<F> Lexicon for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    #[inline]
    fn contains(&self, word: &str) -> bool {
        self(word)
    }
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot open dictionary `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read dictionary at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// In-memory set of words, one per line.
///
/// Also reads hunspell `.dic` files: a numeric first line (the entry count)
/// is skipped and affix flags after `/` are dropped.
#[derive(Debug, Default, Clone)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut list = Self::new();
        for (n, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|source| LexiconError::Read { line: n + 1, source })?;
            let entry = line.trim();
            if n == 0 && !entry.is_empty() && entry.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let word = entry.split('/').next().unwrap_or_default();
            if !word.is_empty() {
                list.words.insert(word.to_owned());
            }
        }
        Ok(list)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_reader(file)?;
        log::debug!("loaded {} dictionary words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    #[inline]
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
