// Shared test helpers for markdown-render.

#![allow(dead_code)]

use markdown_render::{
    parse, AstRenderer, CmarkTokenizer, Element, ElementKind, RendererOptions,
};

/// Render markdown with default options.
pub fn render(markdown: &str) -> Element {
    render_with(markdown, RendererOptions::default())
}

/// Render markdown with custom options. Panics when nothing is rendered.
pub fn render_with(markdown: &str, options: RendererOptions) -> Element {
    let renderer = AstRenderer::new(options);
    parse(markdown, &renderer, &CmarkTokenizer::new())
        .unwrap_or_else(|| panic!("nothing rendered for {markdown:?}"))
}

/// Every element of `kind` in the tree, depth-first.
pub fn find_all(root: &Element, kind: ElementKind) -> Vec<&Element> {
    root.descendants()
        .into_iter()
        .filter(|element| element.kind == kind)
        .collect()
}

/// The first element whose key ends with `_{node_type}`.
pub fn find_by_type<'a>(root: &'a Element, node_type: &str) -> Option<&'a Element> {
    let suffix = format!("_{node_type}");
    root.descendants().into_iter().find(|element| {
        element
            .key
            .as_deref()
            .is_some_and(|key| key.ends_with(&suffix))
    })
}
