// Pipeline entry points.
//
//   markdown → tokenize → cleanup → group → elide → AST → render → Element

use crate::ast::{tokens_to_ast, AstNode};
use crate::element::Element;
use crate::log::debug;
use crate::normalize::normalize;
use crate::render::AstRenderer;
use crate::tokenize::{string_to_tokens, Tokenizer};

/// Input to [`parse`]: markdown source or an AST built earlier.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Markdown(&'a str),
    Ast(&'a [AstNode]),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(markdown: &'a str) -> Self {
        Source::Markdown(markdown)
    }
}

impl<'a> From<&'a [AstNode]> for Source<'a> {
    fn from(ast: &'a [AstNode]) -> Self {
        Source::Ast(ast)
    }
}

/// Render `source` into an element tree.
///
/// A pre-built AST skips tokenizing entirely. Tokenizer failures are
/// logged and render as an empty body.
pub fn parse<'a>(
    source: impl Into<Source<'a>>,
    renderer: &AstRenderer,
    tokenizer: &dyn Tokenizer,
) -> Option<Element> {
    match source.into() {
        Source::Markdown(markdown) => renderer.render(&markdown_to_ast(markdown, tokenizer)),
        Source::Ast(ast) => renderer.render(ast),
    }
}

/// Tokenize and normalize markdown, then build its AST.
pub fn markdown_to_ast(markdown: &str, tokenizer: &dyn Tokenizer) -> Vec<AstNode> {
    let tokens = normalize(string_to_tokens(markdown, tokenizer));
    let ast = tokens_to_ast(&tokens);
    debug!(
        "markdown AST: {}",
        serde_json::to_string(&ast).unwrap_or_default()
    );
    ast
}
