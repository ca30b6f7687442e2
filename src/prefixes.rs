//! Non-breaking prefixes: tokens after which a period does not end a sentence.
//!
//! The resource format is line-oriented:
//!
//! ```text
//! # comment
//! Dr
//! No #NUMERIC_ONLY#
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A line containing
//! `#NUMERIC_ONLY#` registers its first field as [`PrefixClass::NumericOnly`];
//! any other line registers the whole trimmed line as
//! [`PrefixClass::AlwaysNonBreaking`].

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};
use thiserror::Error;

const NUMERIC_ONLY_MARKER: &str = "#NUMERIC_ONLY#";

static BUNDLED_SOURCE: &str = include_str!("../resources/nonbreaking_prefixes.txt");
static BUNDLED: OnceLock<Arc<NonBreakingPrefixes>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum PrefixError {
    #[error("cannot open prefix file `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read prefix resource at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixClass {
    /// The period after this prefix never ends a sentence (`Dr.`, `Mr.`).
    AlwaysNonBreaking,
    /// Non-breaking only when a number follows (`No. 5`, `pp. 12`).
    NumericOnly,
}

#[derive(Debug, Default, Clone)]
pub struct NonBreakingPrefixes {
    entries: HashMap<String, PrefixClass>,
}

impl NonBreakingPrefixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list shipped with the crate. Parsed once per process.
    pub fn bundled() -> Arc<Self> {
        BUNDLED
            .get_or_init(|| {
                let table = Self::parse(BUNDLED_SOURCE);
                log::debug!("loaded {} bundled non-breaking prefixes", table.len());
                Arc::new(table)
            })
            .clone()
    }

    pub fn parse(source: &str) -> Self {
        let mut table = Self::new();
        for (n, line) in source.lines().enumerate() {
            table.add_line(line, n + 1);
        }
        table
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PrefixError> {
        let mut table = Self::new();
        for (n, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|source| PrefixError::Read { line: n + 1, source })?;
            table.add_line(&line, n + 1);
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PrefixError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PrefixError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        log::debug!(
            "loaded {} non-breaking prefixes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    fn add_line(&mut self, line: &str, number: usize) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if line.contains(NUMERIC_ONLY_MARKER) {
            let stripped = line.replace(NUMERIC_ONLY_MARKER, "");
            match stripped.split_whitespace().next() {
                Some(prefix) => self.insert(prefix, PrefixClass::NumericOnly),
                None => log::warn!("prefix line {number} has a marker but no prefix, skipped"),
            }
        } else {
            self.insert(line, PrefixClass::AlwaysNonBreaking);
        }
    }

    /// Register `prefix`, replacing any earlier class.
    pub fn insert(&mut self, prefix: impl Into<String>, class: PrefixClass) {
        self.entries.insert(prefix.into(), class);
    }

    #[inline]
    pub fn class(&self, prefix: &str) -> Option<PrefixClass> {
        self.entries.get(prefix).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PrefixClass)> for NonBreakingPrefixes {
    fn from_iter<I: IntoIterator<Item = (S, PrefixClass)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (prefix, class) in iter {
            table.insert(prefix, class);
        }
        table
    }
}
