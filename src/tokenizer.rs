use crate::{
    context::Context,
    lang::{DEFAULT_LANG, Lang},
    lexicon::{Lexicon, LexiconError, WordList},
    prefixes::{NonBreakingPrefixes, PrefixError},
    process::{ChainedProcess, DynamicProcess, EmptyProcess, Process},
    protect::RunProtector,
    stage::{
        CharMapper, StageError, collapse_whitespace::CollapseWhitespace, map_chars,
        normalize_danda::NormalizeDanda,
        rejoin_hyphens::{HyphenPolicy, RejoinHyphens},
        resolve_abbreviations::ResolveAbbreviations,
        segment_commas::SegmentCommas,
        segment_punctuation::SegmentPunctuation,
        segment_script::SegmentScriptBoundaries,
        split_quotes::SplitQuotes,
        split_sentences::SplitSentences,
        strip_format_chars::StripFormatChars,
    },
};
use std::{borrow::Cow, path::PathBuf, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("unknown language code `{0}`")]
    UnknownLanguage(String),
    #[error("stage error: {0}")]
    Stage(#[from] StageError),
    #[error("prefix error: {0}")]
    Prefix(#[from] PrefixError),
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

type Front = ChainedProcess<
    SegmentPunctuation,
    ChainedProcess<CollapseWhitespace, ChainedProcess<StripFormatChars, EmptyProcess>>,
>;
type Tail = ChainedProcess<SplitSentences, EmptyProcess>;

/// Line tokenizer and sentence splitter for one language.
///
/// Immutable after [`TokenizerBuilder::build`]; share it across threads
/// behind a reference or an `Arc`.
///
/// ```no_run
/// use vakya::Tokenizer;
///
/// let tok = Tokenizer::builder().lang_code("hin").build()?;
/// assert_eq!(tok.tokenize_line("Hello world. How are you?")?, "Hello world .\nHow are you ?");
/// # Ok::<(), vakya::TokenizerError>(())
/// ```
pub struct Tokenizer {
    ctx: Context,
    hyphens: HyphenPolicy,
    front: Front,
    middle: DynamicProcess,
    tail: Tail,
}

impl Tokenizer {
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    #[inline]
    pub fn lang(&self) -> Lang {
        self.ctx.lang
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    #[inline]
    pub fn hyphens(&self) -> HyphenPolicy {
        self.hyphens
    }

    /// Strip or blank out invisible format characters; nothing else.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mapper: &dyn CharMapper = &StripFormatChars;
        map_chars(mapper, Cow::Borrowed(text), &self.ctx)
    }

    /// Tokenize one line. Sentences are separated by `\n` in the result.
    pub fn tokenize_line(&self, line: &str) -> Result<String, TokenizerError> {
        let text = self.front.process(Cow::Borrowed(line), &self.ctx)?;
        let (text, runs) = RunProtector::encode(text);
        let text = self.middle.process(text, &self.ctx)?;
        let text = RunProtector::decode(text, &runs)?;
        let text = self.tail.process(text, &self.ctx)?;
        Ok(text.into_owned())
    }

    /// Tokenize one line and return its sentences. An empty line yields one
    /// empty sentence.
    pub fn sentences(&self, line: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(self
            .tokenize_line(line)?
            .split('\n')
            .map(str::to_owned)
            .collect())
    }

    /// Tokenize a batch of lines, keeping their order.
    #[cfg(feature = "parallel")]
    pub fn tokenize_lines<S>(&self, lines: &[S]) -> Result<Vec<String>, TokenizerError>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;
        lines
            .par_iter()
            .map(|line| self.tokenize_line(line.as_ref()))
            .collect()
    }

    /// Tokenize a batch of lines, keeping their order.
    #[cfg(not(feature = "parallel"))]
    pub fn tokenize_lines<S>(&self, lines: &[S]) -> Result<Vec<String>, TokenizerError>
    where
        S: AsRef<str> + Sync,
    {
        lines
            .iter()
            .map(|line| self.tokenize_line(line.as_ref()))
            .collect()
    }
}

impl Default for Tokenizer {
    /// Hindi, bundled prefixes, no lexicon, split hyphens.
    fn default() -> Self {
        Self::assemble(
            Context::new(DEFAULT_LANG),
            ResolveAbbreviations::default(),
            HyphenPolicy::default(),
        )
    }
}

impl Tokenizer {
    fn assemble(ctx: Context, abbreviations: ResolveAbbreviations, hyphens: HyphenPolicy) -> Self {
        let front = ChainedProcess::first(StripFormatChars)
            .then(CollapseWhitespace::padded())
            .then(SegmentPunctuation);
        let middle = DynamicProcess::new()
            .push(SegmentCommas)
            .push(SplitQuotes)
            .push(abbreviations)
            .push(SegmentScriptBoundaries)
            .push(NormalizeDanda)
            .push(RejoinHyphens::new(hyphens))
            .push(CollapseWhitespace::trimmed());
        log::debug!(
            "stages for {}: {}",
            ctx.lang,
            middle.stage_names().collect::<Vec<_>>().join(" > ")
        );
        Self {
            ctx,
            hyphens,
            front,
            middle,
            tail: ChainedProcess::first(SplitSentences),
        }
    }
}

#[derive(Default)]
pub struct TokenizerBuilder {
    lang: Option<Lang>,
    lang_code: Option<String>,
    prefixes: Option<Arc<NonBreakingPrefixes>>,
    prefix_file: Option<PathBuf>,
    lexicon: Option<Arc<dyn Lexicon>>,
    dictionary_file: Option<PathBuf>,
    hyphens: HyphenPolicy,
}

impl TokenizerBuilder {
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self.lang_code = None;
        self
    }

    /// Select the language by ISO-639-3 code. Unknown codes fail in `build`.
    pub fn lang_code(mut self, code: impl Into<String>) -> Self {
        self.lang_code = Some(code.into());
        self.lang = None;
        self
    }

    pub fn prefixes(mut self, prefixes: impl Into<Arc<NonBreakingPrefixes>>) -> Self {
        self.prefixes = Some(prefixes.into());
        self.prefix_file = None;
        self
    }

    pub fn prefix_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefix_file = Some(path.into());
        self.prefixes = None;
        self
    }

    pub fn lexicon<L: Lexicon + 'static>(mut self, lexicon: L) -> Self {
        self.lexicon = Some(Arc::new(lexicon));
        self.dictionary_file = None;
        self
    }

    pub fn shared_lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicon = Some(lexicon);
        self.dictionary_file = None;
        self
    }

    /// Load a [`WordList`] from `path` at build time.
    pub fn dictionary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_file = Some(path.into());
        self.lexicon = None;
        self
    }

    pub fn hyphens(mut self, policy: HyphenPolicy) -> Self {
        self.hyphens = policy;
        self
    }

    pub fn build(self) -> Result<Tokenizer, TokenizerError> {
        let lang = match (self.lang, self.lang_code) {
            (Some(lang), _) => lang,
            (None, Some(code)) => {
                Lang::from_code(&code).ok_or(TokenizerError::UnknownLanguage(code))?
            }
            (None, None) => DEFAULT_LANG,
        };
        if lang.entry().is_none() {
            return Err(TokenizerError::UnknownLanguage(lang.code.to_owned()));
        }
        let ctx = Context::new(lang);

        let prefixes = match (self.prefixes, self.prefix_file) {
            (_, Some(path)) => Arc::new(NonBreakingPrefixes::from_path(path)?),
            (Some(prefixes), None) => prefixes,
            (None, None) => NonBreakingPrefixes::bundled(),
        };

        let lexicon: Option<Arc<dyn Lexicon>> = match (self.lexicon, self.dictionary_file) {
            (_, Some(path)) => Some(Arc::new(WordList::from_path(path)?)),
            (lexicon, None) => lexicon,
        };

        let companion = lang.entry().map_or("?", |e| e.companion);
        log::debug!(
            "tokenizer for {lang}: {} prefixes, {} lexicon ({companion}), hyphens {:?}",
            prefixes.len(),
            if lexicon.is_some() { "with" } else { "no" },
            self.hyphens,
        );

        let mut abbreviations = ResolveAbbreviations::new(prefixes);
        if let Some(lexicon) = lexicon {
            abbreviations = abbreviations.with_lexicon(lexicon);
        }
        Ok(Tokenizer::assemble(ctx, abbreviations, self.hyphens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lang::data::{BEN, HIN},
        stage::Stage,
    };

    #[test]
    fn unknown_code_fails_at_build() {
        let err = Tokenizer::builder().lang_code("xyz").build().err();
        assert!(matches!(err, Some(TokenizerError::UnknownLanguage(code)) if code == "xyz"));
    }

    #[test]
    fn unregistered_lang_value_fails_at_build() {
        let bogus = Lang { code: "xyz", name: "Bogus" };
        let err = Tokenizer::builder().lang(bogus).build().err();
        assert!(matches!(err, Some(TokenizerError::UnknownLanguage(code)) if code == "xyz"));

        // Lookups are by exact table key; only `lang_code` folds case.
        let shouting = Lang { code: "HIN", name: "Hindi" };
        assert!(Tokenizer::builder().lang(shouting).build().is_err());
        let tok = Tokenizer::builder().lang_code("HIN").build().unwrap();
        assert_eq!(tok.tokenize_line("helloहै").unwrap(), "hello है");
    }

    #[test]
    fn middle_stages_run_in_order() {
        let tok = Tokenizer::default();
        assert_eq!(
            tok.middle.stage_names().collect::<Vec<_>>(),
            [
                SegmentCommas.name(),
                SplitQuotes.name(),
                ResolveAbbreviations::default().name(),
                SegmentScriptBoundaries.name(),
                NormalizeDanda.name(),
                RejoinHyphens::default().name(),
                CollapseWhitespace::trimmed().name(),
            ]
        );
    }

    #[test]
    fn last_language_setter_wins() {
        let tok = Tokenizer::builder().lang_code("xyz").lang(BEN).build().unwrap();
        assert_eq!(tok.lang(), BEN);
        let tok = Tokenizer::builder().lang(BEN).lang_code("HIN").build().unwrap();
        assert_eq!(tok.lang(), HIN);
    }

    #[test]
    fn default_is_hindi_with_split_hyphens() {
        let tok = Tokenizer::default();
        assert_eq!(tok.lang(), HIN);
        assert_eq!(tok.hyphens(), HyphenPolicy::Split);
        assert_eq!(tok.context().profile.map(|p| p.name), Some("Devanagari"));
    }

    #[test]
    fn missing_prefix_file_is_reported() {
        let err = Tokenizer::builder()
            .prefix_file("/no/such/prefixes.txt")
            .build()
            .err();
        assert!(matches!(err, Some(TokenizerError::Prefix(_))));
    }

    #[test]
    fn normalize_only_touches_format_chars() {
        let tok = Tokenizer::default();
        assert_eq!(tok.normalize("a\u{200B}b\u{200D}c!"), "a bc!");
        assert!(matches!(tok.normalize("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn tokenizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tokenizer>();
    }
}
