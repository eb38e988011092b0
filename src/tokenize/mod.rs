// Markdown tokenizers.
//
// The pipeline consumes markdown-it-shaped token streams. Any tokenizer that
// produces them can be plugged in through the `Tokenizer` trait; the
// pulldown-cmark adapter is the built-in one.

mod cmark;

pub use cmark::CmarkTokenizer;

use crate::error::MarkdownRenderError;
use crate::log::warn;
use crate::token::Token;

/// Turns markdown source into a flat token stream.
pub trait Tokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, MarkdownRenderError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<Token>, MarkdownRenderError>,
{
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, MarkdownRenderError> {
        self(source)
    }
}

/// Tokenize `source`, treating a tokenizer failure as an empty document.
pub fn string_to_tokens(source: &str, tokenizer: &dyn Tokenizer) -> Vec<Token> {
    match tokenizer.tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!("Unable to tokenize markdown: {err}");
            Vec::new()
        }
    }
}
