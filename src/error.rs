/// Errors that can occur while tokenizing markdown.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MarkdownRenderError {
    /// The tokenizer could not turn the source into tokens.
    #[error("markdown tokenize error: {0}")]
    Tokenize(String),
}
