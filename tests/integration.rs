// End-to-end API tests for markdown-render.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{find_all, find_by_type, render, render_with};
use markdown_render::{
    markdown_to_ast, parse, render_markdown, AstNode, AstRenderer, CmarkTokenizer, Element,
    ElementKind, MarkdownRenderError, RenderArgs, RenderFunctionMap, RendererOptions, Style,
    StyleMap, StyleValue, TextProps, Token,
};
use pretty_assertions::assert_eq;

fn text_leaf<'a>(root: &'a Element, content: &str) -> &'a Element {
    root.descendants()
        .into_iter()
        .find(|element| element.content.as_deref() == Some(content))
        .unwrap_or_else(|| panic!("no text {content:?}"))
}

#[test]
fn test_empty_input() {
    let root = render("");
    assert_eq!(root.kind, ElementKind::View);
    assert!(root.children.is_empty());
}

#[test]
fn test_document_outline() {
    let root = render("# Title\n\nSome *text*.");
    assert_eq!(
        root.to_string(),
        concat!(
            "View\n",
            "  View\n",
            "    Text\n",
            "      Text \"Title\"\n",
            "  View\n",
            "    Text\n",
            "      Text \"Some \"\n",
            "      Text\n",
            "        Text \"text\"\n",
            "      Text \".\"\n",
        )
    );
}

#[test]
fn test_heading_size_is_inherited_by_text() {
    let root = render("# Big");
    let leaf = text_leaf(&root, "Big");
    assert_eq!(leaf.style.get("fontSize"), Some(&StyleValue::Number(32.0)));
    assert!(!leaf.style.contains("flexDirection"));
}

#[test]
fn test_emphasis_styles() {
    let root = render("**a** _b_ ~~c~~");
    let strong = find_by_type(&root, "strong").unwrap();
    assert_eq!(strong.style.get("fontWeight"), Some(&StyleValue::from("bold")));
    let em = find_by_type(&root, "em").unwrap();
    assert_eq!(em.style.get("fontStyle"), Some(&StyleValue::from("italic")));
    let s = find_by_type(&root, "s").unwrap();
    assert_eq!(
        s.style.get("textDecorationLine"),
        Some(&StyleValue::from("line-through"))
    );
}

#[test]
fn test_tight_list_items_lose_their_paragraph() {
    let root = render("- a\n- b\n");
    assert!(find_by_type(&root, "paragraph").is_none());

    let list = &root.children[0];
    assert_eq!(list.children.len(), 2);
    let markers: Vec<&str> = list
        .children
        .iter()
        .map(|item| item.children[0].content.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(markers, ["\u{2022}", "\u{2022}"]);
    assert_eq!(root.text_content(), "\u{2022}a\u{2022}b");
}

#[test]
fn test_loose_single_paragraph_items_lose_their_paragraph() {
    let root = render("- a\n\n- b\n");
    assert!(find_by_type(&root, "paragraph").is_none());
    assert_eq!(root.text_content(), "\u{2022}a\u{2022}b");
}

#[test]
fn test_multi_paragraph_item_keeps_its_paragraphs() {
    let root = render("- a\n\n  b\n");
    let paragraphs: Vec<&Element> = root
        .descendants()
        .into_iter()
        .filter(|element| {
            element
                .key
                .as_deref()
                .is_some_and(|key| key.ends_with("_paragraph"))
        })
        .collect();
    assert_eq!(paragraphs.len(), 2);
}

#[test]
fn test_ordered_list_numbers_from_start() {
    let root = render("3. x\n4. y\n5. z\n");
    let markers: Vec<&str> = root.children[0]
        .children
        .iter()
        .map(|item| item.children[0].content.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(markers, ["3.", "4.", "5."]);
}

#[test]
fn test_link_is_pressable() {
    let root = render("[go](https://example.com)");
    let links = find_all(&root, ElementKind::Pressable);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].href.as_deref(), Some("https://example.com"));
    assert_eq!(links[0].accessibility_role.as_deref(), Some("link"));
    assert_eq!(links[0].text_content(), "go");
    assert!(links[0].press());
}

#[test]
fn test_link_press_callback() {
    let pressed = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&pressed);
    let options = RendererOptions::new().with_on_link_press(move |url| {
        assert_eq!(url, "https://example.com");
        seen.fetch_add(1, Ordering::SeqCst);
        false
    });
    let root = render_with("[go](https://example.com)", options);
    let link = find_all(&root, ElementKind::Pressable)[0];
    assert!(!link.press());
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_linked_image_becomes_blocklink() {
    let root = render("[![alt](https://x.png)](https://example.com)");
    let blocklink = find_by_type(&root, "blocklink").unwrap();
    assert_eq!(blocklink.kind, ElementKind::Pressable);
    assert_eq!(blocklink.href.as_deref(), Some("https://example.com"));

    let images = find_all(blocklink, ElementKind::Image);
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].source.as_deref(), Some("https://x.png"));
    assert_eq!(images[0].accessibility_label.as_deref(), Some("alt"));
}

#[test]
fn test_image_source_handling() {
    let root = render("![a](example.com/x.png)");
    let images = find_all(&root, ElementKind::Image);
    assert_eq!(images[0].source.as_deref(), Some("https://example.com/x.png"));

    let root = render("![a](data:image/png;base64,AAAA)");
    let images = find_all(&root, ElementKind::Image);
    assert_eq!(images[0].source.as_deref(), Some("data:image/png;base64,AAAA"));

    let options = RendererOptions::new().with_default_image_handler(None);
    let root = render_with("![a](example.com/x.png)", options);
    assert!(find_all(&root, ElementKind::Image).is_empty());
}

#[test]
fn test_table_alignment_reaches_text() {
    let root = render("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
    assert_eq!(
        text_leaf(&root, "1").style.get("textAlign"),
        Some(&StyleValue::from("left"))
    );
    assert_eq!(
        text_leaf(&root, "2").style.get("textAlign"),
        Some(&StyleValue::from("right"))
    );
    let th = find_by_type(&root, "th").unwrap();
    assert_eq!(th.style.get("padding"), Some(&StyleValue::Number(5.0)));
}

#[test]
fn test_fence_strips_trailing_newline() {
    let root = render("```rust\nlet x = 1;\n```\n");
    let code = find_by_type(&root, "fence").unwrap();
    assert_eq!(code.content.as_deref(), Some("let x = 1;"));
    assert_eq!(code.style.get("fontFamily"), Some(&StyleValue::from("monospace")));
}

#[test]
fn test_top_level_truncation() {
    let markdown = (1..=10).map(|i| format!("p{i}")).collect::<Vec<_>>().join("\n\n");
    let options = RendererOptions::new().with_max_top_level_children(3);
    let root = render_with(&markdown, options);
    assert_eq!(root.children.len(), 4);
    assert_eq!(root.children[3].content.as_deref(), Some("..."));
    assert_eq!(root.text_content(), "p1p2p3...");
}

#[test]
fn test_style_overrides_merge_with_defaults() {
    let styles = StyleMap::new().with("heading1", Style::new().with("color", "red"));
    let root = render_with("# T", RendererOptions::new().with_styles(styles));
    let heading = find_by_type(&root, "heading1").unwrap();
    assert_eq!(heading.style.get("color"), Some(&StyleValue::from("red")));
    assert_eq!(heading.style.get("fontSize"), Some(&StyleValue::Number(32.0)));

    let leaf = text_leaf(&root, "T");
    assert_eq!(leaf.style.get("color"), Some(&StyleValue::from("red")));
}

#[test]
fn test_failing_tokenizer_renders_empty_body() {
    let renderer = AstRenderer::new(RendererOptions::default());
    let failing = |_: &str| -> Result<Vec<Token>, MarkdownRenderError> {
        Err(MarkdownRenderError::Tokenize("unsupported input".into()))
    };
    let root = parse("# Hello", &renderer, &failing).unwrap();
    assert!(root.children.is_empty());
}

#[test]
fn test_custom_node_type_from_ast() {
    let functions = RenderFunctionMap::new().with("badge", |args: RenderArgs<'_>| {
        Some(args.make_text(TextProps {
            key: args.key().map(str::to_string),
            content: args.node.attribute("label").map(str::to_string),
            ..Default::default()
        }))
    });
    let renderer = AstRenderer::new(RendererOptions::new().with_render_functions(functions));
    let ast = vec![AstNode::new("badge", "b1").with_attribute("label", "new")];
    let root = parse(ast.as_slice(), &renderer, &CmarkTokenizer::new()).unwrap();
    assert_eq!(root.text_content(), "new");
    assert_eq!(root.children[0].key.as_deref(), Some("b1"));
}

#[test]
fn test_smart_punctuation() {
    let root = render("\"quoted\" -- dash");
    assert_eq!(root.text_content(), "\u{201c}quoted\u{201d} \u{2013} dash");
}

#[test]
fn test_ast_is_serializable() {
    let ast = markdown_to_ast("*x*", &CmarkTokenizer::new());
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json[0]["type"], "paragraph");
    assert_eq!(json[0]["children"][0]["type"], "textgroup");
}

#[test]
fn test_renderer_shared_across_threads() {
    let renderer = Arc::new(AstRenderer::new(RendererOptions::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = Arc::clone(&renderer);
            std::thread::spawn(move || {
                let markdown = format!("item {i}");
                parse(markdown.as_str(), &renderer, &CmarkTokenizer::new())
                    .map(|root| root.text_content())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("item {i}")));
    }
}

#[test]
fn test_render_markdown_convenience() {
    let root = render_markdown("hello").unwrap();
    assert_eq!(root.text_content(), "hello");
}
