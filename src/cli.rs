//! Command-line front end: one input line in, one line per sentence out.

use anyhow::{Context as _, Result, anyhow};
use clap::{ArgAction, Parser};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
};
use vakya::{HyphenPolicy, Lang, Tokenizer, lang::ALL_LANGS};

const LANG_HELP: &str = "Language as a 3-letter ISO-639 code:
  hin Hindi      mar Marathi    nep Nepali     bod Bodo
  kok Konkani    ben Bengali    asm Assamese   guj Gujarati
  mal Malayalam  pan Punjabi    tel Telugu     tam Tamil
  kan Kannada    ori Oriya";

#[derive(Debug, Parser)]
#[command(
    name = "vakya",
    version,
    about = "Tokenizer and sentence splitter for Indian scripts"
)]
pub struct Cli {
    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "CODE",
        default_value = "hin",
        value_parser = parse_lang,
        help = "Language code (see --help for the list)",
        long_help = LANG_HELP
    )]
    pub lang: Lang,

    /// Non-breaking prefix list replacing the bundled one
    #[arg(short, long, value_name = "FILE")]
    pub prefixes: Option<PathBuf>,

    /// Word list (one word per line, hunspell .dic accepted) used to decide
    /// whether a period before a number ends a sentence
    #[arg(short, long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Keep hyphens inside compound words (`well-known`)
    #[arg(long)]
    pub keep_compound_hyphens: bool,

    /// Tokenize batches of lines on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Lines per batch in parallel mode
    #[arg(long, value_name = "N", default_value_t = 4096, value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_lines: u32,

    /// Print the supported languages and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Disable logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_lang(code: &str) -> Result<Lang, String> {
    Lang::from_code(code).ok_or_else(|| {
        let known: Vec<&str> = ALL_LANGS.iter().map(|l| l.code()).collect();
        format!("unknown language `{code}`, expected one of: {}", known.join(", "))
    })
}

impl Cli {
    pub fn execute(&self) -> Result<()> {
        self.init_logging();
        log::debug!("arguments: {self:?}");

        if self.list_languages {
            return list_languages();
        }

        let tokenizer = self.tokenizer()?;
        let reader = self.open_input()?;
        let mut writer = self.open_output()?;

        let lines = if self.parallel {
            self.run_batched(&tokenizer, reader, &mut writer)?
        } else {
            run_sequential(&tokenizer, reader, &mut writer)?
        };
        writer.flush().context("failed to flush output")?;
        log::info!("tokenized {lines} line(s) as {}", tokenizer.lang());
        Ok(())
    }

    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    fn tokenizer(&self) -> Result<Tokenizer> {
        let mut builder = Tokenizer::builder().lang(self.lang);
        if let Some(path) = &self.prefixes {
            builder = builder.prefix_file(path);
        }
        if let Some(path) = &self.dictionary {
            builder = builder.dictionary_file(path);
        }
        if self.keep_compound_hyphens {
            builder = builder.hyphens(HyphenPolicy::KeepCompounds);
        }
        builder.build().context("failed to configure the tokenizer")
    }

    fn open_input(&self) -> Result<Box<dyn BufRead>> {
        Ok(match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open input {}", path.display()))?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(io::stdin().lock()),
        })
    }

    fn open_output(&self) -> Result<BufWriter<Box<dyn Write>>> {
        let sink: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create output {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };
        Ok(BufWriter::new(sink))
    }

    fn run_batched(
        &self,
        tokenizer: &Tokenizer,
        mut reader: Box<dyn BufRead>,
        writer: &mut impl Write,
    ) -> Result<usize> {
        let batch_size = self.batch_lines as usize;
        let mut batch: Vec<String> = Vec::with_capacity(batch_size);
        let mut total = 0;
        let mut buf = Vec::new();
        while let Some(line) = next_line(&mut reader, &mut buf, total + batch.len() + 1)? {
            batch.push(line.to_owned());
            if batch.len() == batch_size {
                total += flush_batch(tokenizer, &mut batch, writer)?;
            }
        }
        total += flush_batch(tokenizer, &mut batch, writer)?;
        Ok(total)
    }
}

fn run_sequential(
    tokenizer: &Tokenizer,
    mut reader: Box<dyn BufRead>,
    writer: &mut impl Write,
) -> Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;
    while let Some(line) = next_line(&mut reader, &mut buf, count + 1)? {
        let tokens = tokenizer
            .tokenize_line(line)
            .with_context(|| format!("failed to tokenize line {}", count + 1))?;
        writeln!(writer, "{tokens}").context("failed to write output")?;
        count += 1;
    }
    Ok(count)
}

fn flush_batch(
    tokenizer: &Tokenizer,
    batch: &mut Vec<String>,
    writer: &mut impl Write,
) -> Result<usize> {
    if batch.is_empty() {
        return Ok(0);
    }
    let out = tokenizer
        .tokenize_lines(batch.as_slice())
        .context("failed to tokenize batch")?;
    for tokens in &out {
        writeln!(writer, "{tokens}").context("failed to write output")?;
    }
    log::debug!("flushed batch of {} line(s)", batch.len());
    let n = batch.len();
    batch.clear();
    Ok(n)
}

/// Read the next line (without its `\n`) into `buf` and validate it.
fn next_line<'b>(
    reader: &mut dyn BufRead,
    buf: &'b mut Vec<u8>,
    number: usize,
) -> Result<Option<&'b str>> {
    buf.clear();
    let read = reader
        .read_until(b'\n', buf)
        .with_context(|| format!("failed to read input line {number}"))?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    decode_utf8(buf)
        .map(Some)
        .map_err(|_| anyhow!("input line {number} is not valid UTF-8"))
}

#[cfg(feature = "simd")]
fn decode_utf8(bytes: &[u8]) -> Result<&str, simdutf8::basic::Utf8Error> {
    simdutf8::basic::from_utf8(bytes)
}

#[cfg(not(feature = "simd"))]
fn decode_utf8(bytes: &[u8]) -> Result<&str, std::str::Utf8Error> {
    std::str::from_utf8(bytes)
}

fn list_languages() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for lang in ALL_LANGS {
        let script = lang.profile().map_or("-", |p| p.name);
        writeln!(out, "{}\t{}\t{}", lang.code(), lang.name(), script)?;
    }
    Ok(())
}
