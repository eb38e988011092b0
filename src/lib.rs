// markdown-render — markdown to a styled, UI-agnostic element tree.
//
// Architecture:
//   markdown → tokenizer (markdown-it-shaped tokens) → normalize → AST → AstRenderer → Element
//
// The tokenizer is pluggable (`Tokenizer`); pulldown-cmark backs the default
// one. Styles and render functions are per-type tables that callers can
// extend or replace.

mod log;

pub mod ast;
pub mod element;
mod error;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod style;
pub mod token;
pub mod tokenize;

pub use ast::{tokens_to_ast, AstNode, NodeType};
pub use element::{Element, ElementKind, PressHandler, TextFactory, TextProps};
pub use error::MarkdownRenderError;
pub use parser::{markdown_to_ast, parse, Source};
pub use render::{AstRenderer, RenderArgs, RenderFunction, RenderFunctionMap, RendererOptions};
pub use style::{default_styles, Style, StyleMap, StyleValue};
pub use token::{Nesting, Token};
pub use tokenize::{CmarkTokenizer, Tokenizer};

/// Render markdown with the default renderer and tokenizer.
///
/// # Examples
///
/// ```
/// let root = markdown_render::render_markdown("# Hello\n\nWorld").unwrap();
/// assert_eq!(root.text_content(), "HelloWorld");
/// ```
pub fn render_markdown(markdown: &str) -> Option<Element> {
    render_markdown_with(markdown, RendererOptions::default())
}

/// Render markdown with custom renderer options and the default tokenizer.
///
/// # Examples
///
/// ```
/// use markdown_render::{render_markdown_with, RendererOptions};
///
/// let options = RendererOptions::new().with_max_top_level_children(1);
/// let root = render_markdown_with("one\n\ntwo\n\nthree", options).unwrap();
/// assert_eq!(root.children.len(), 2);
/// ```
pub fn render_markdown_with(markdown: &str, options: RendererOptions) -> Option<Element> {
    let renderer = AstRenderer::new(options);
    parse(markdown, &renderer, &CmarkTokenizer::new())
}
