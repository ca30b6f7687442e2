pub mod context;
pub mod lang;
pub mod lexicon;
pub mod prefixes;
pub mod process;
pub mod protect;
pub mod stage;
pub mod tokenizer;
pub mod unicode;

pub use context::Context;
pub use lang::Lang;
pub use lang::data::{ASM, BEN, BOD, GUJ, HIN, KAN, KOK, MAL, MAR, NEP, ORI, PAN, TAM, TEL};
pub use lexicon::{Lexicon, LexiconError, WordList};
pub use prefixes::{NonBreakingPrefixes, PrefixClass, PrefixError};
pub use stage::rejoin_hyphens::HyphenPolicy;
pub use stage::{Stage, StageError};
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerError};


#[cfg(test)]
mod tests {
    include!("tests/unit.rs");
    include!("tests/integration.rs");
    include!("tests/proptest.rs");
}
