// Built-in render functions.
//
// One function per node type (or group of types that render alike). Each
// takes the node's render arguments and returns the element to display, or
// nothing.

use crate::ast::{NodeKind, NodeType};
use crate::element::{Element, TextProps};

use super::rules::{RenderArgs, RenderFunctionMap};
use super::util::{nearest_list_parent, ordered_item_number};

/// Bullet glyph used for unordered list markers.
pub const BULLET: &str = "\u{2022}";

/// The built-in render function for every known node type.
pub fn default_render_functions() -> RenderFunctionMap {
    let mut map = RenderFunctionMap::new();

    // Containers rendered as a styled view around their children.
    for name in [
        "body",
        "heading1",
        "heading2",
        "heading3",
        "heading4",
        "heading5",
        "heading6",
        "blockquote",
        "bullet_list",
        "ordered_list",
        "table",
        "thead",
        "tbody",
        "th",
        "tr",
        "td",
        "paragraph",
        "pre",
    ] {
        map.insert(name, render_view);
    }

    // Inline wrappers rendered as a styled text around their children.
    for name in ["strong", "em", "s", "textgroup", "inline", "span"] {
        map.insert(name, render_text_wrapper);
    }

    map.insert("hr", render_hr);
    map.insert("list_item", render_list_item);
    map.insert("code_inline", render_content_text);
    map.insert("text", render_content_text);
    map.insert("code_block", render_code_block);
    map.insert("fence", render_code_block);
    map.insert("link", render_link);
    map.insert("blocklink", render_blocklink);
    map.insert("image", render_image);
    map.insert("hardbreak", render_break);
    map.insert("softbreak", render_break);

    map
}

fn render_view(args: RenderArgs<'_>) -> Option<Element> {
    let style = args.style(args.node.node_type.as_str());
    Some(Element::view(args.key(), style, args.children))
}

fn render_hr(args: RenderArgs<'_>) -> Option<Element> {
    Some(Element::view(args.key(), args.style("hr"), Vec::new()))
}

fn render_text_wrapper(mut args: RenderArgs<'_>) -> Option<Element> {
    let props = TextProps {
        key: args.key().map(str::to_string),
        style: args.style(args.node.node_type.as_str()),
        children: std::mem::take(&mut args.children),
        ..Default::default()
    };
    Some(args.make_text(props))
}

fn render_content_text(args: RenderArgs<'_>) -> Option<Element> {
    let props = TextProps {
        key: args.key().map(str::to_string),
        style: args.inherited_with(args.node.node_type.as_str()),
        content: args.node.content.clone(),
        ..Default::default()
    };
    Some(args.make_text(props))
}

/// Code blocks: the tokenizer leaves one trailing newline on the content.
fn render_code_block(args: RenderArgs<'_>) -> Option<Element> {
    let content = args.node.content.as_deref().map(|content| {
        content
            .strip_suffix('\n')
            .unwrap_or(content)
            .to_string()
    });
    let props = TextProps {
        key: args.key().map(str::to_string),
        style: args.inherited_with(args.node.node_type.as_str()),
        content,
        ..Default::default()
    };
    Some(args.make_text(props))
}

fn render_break(args: RenderArgs<'_>) -> Option<Element> {
    let props = TextProps {
        key: args.key().map(str::to_string),
        style: args.style(args.node.node_type.as_str()),
        content: Some("\n".to_string()),
        ..Default::default()
    };
    Some(args.make_text(props))
}

fn href<'a>(args: &RenderArgs<'a>) -> &'a str {
    match args.node.kind() {
        NodeKind::Link { href } => href,
        _ => "",
    }
}

fn render_link(mut args: RenderArgs<'_>) -> Option<Element> {
    let children = std::mem::take(&mut args.children);
    let label = args.make_text(TextProps {
        style: args.style("link"),
        children,
        ..Default::default()
    });
    Some(Element::pressable(
        args.key(),
        Default::default(),
        href(&args),
        args.on_link_press.cloned(),
        vec![label],
    ))
}

fn render_blocklink(mut args: RenderArgs<'_>) -> Option<Element> {
    let body = Element::view(None, args.style("image"), std::mem::take(&mut args.children));
    Some(Element::pressable(
        args.key(),
        args.style("blocklink"),
        href(&args),
        args.on_link_press.cloned(),
        vec![body],
    ))
}

/// Resolve an image source against the allow-list.
///
/// Allowed prefixes match case-insensitively and keep the source verbatim.
/// Anything else is prefixed with the default handler, or dropped when
/// there is none.
pub fn resolve_image_uri(
    src: &str,
    allowed_image_handlers: &[String],
    default_image_handler: Option<&str>,
) -> Option<String> {
    let lower = src.to_lowercase();
    let allowed = allowed_image_handlers
        .iter()
        .any(|prefix| lower.starts_with(&prefix.to_lowercase()));

    if allowed {
        return Some(src.to_string());
    }
    default_image_handler
        .filter(|handler| !handler.is_empty())
        .map(|handler| format!("{handler}{src}"))
}

fn render_image(args: RenderArgs<'_>) -> Option<Element> {
    let NodeKind::Image { src, alt } = args.node.kind() else {
        return None;
    };
    let uri = resolve_image_uri(src, args.allowed_image_handlers, args.default_image_handler)?;

    let mut image = Element::image(args.key(), args.style("image"), &uri);
    if !alt.is_empty() {
        image.accessible = Some(true);
        image.accessibility_label = Some(alt.to_string());
    }
    Some(image)
}

/// A marker followed by the item content.
///
/// The marker follows the nearest enclosing list, so an ordered list nested
/// in a bullet list is numbered and a bullet list nested in an ordered list
/// gets bullets. An item outside any list renders as a plain view.
fn render_list_item(mut args: RenderArgs<'_>) -> Option<Element> {
    let list_type = nearest_list_parent(args.parents).map(|list| &list.node_type);

    let (marker, marker_key, content_key, accessible) = match list_type {
        Some(NodeType::BulletList) => (
            BULLET.to_string(),
            "list_item_bullet_marker",
            "list_item_bullet_content",
            Some(false),
        ),
        Some(NodeType::OrderedList) => {
            let number = ordered_item_number(args.node, args.parents);
            let markup = args.node.markup.as_deref().unwrap_or_default();
            (
                format!("{number}{markup}"),
                "list_item_ordered_marker",
                "list_item_ordered_content",
                None,
            )
        }
        _ => {
            return Some(Element::view(args.key(), args.style("list_item"), args.children));
        }
    };

    let marker = args.make_text(TextProps {
        style: args.inherited_with(marker_key),
        content: Some(marker),
        accessible,
        ..Default::default()
    });
    let content = Element::view(None, args.style(content_key), std::mem::take(&mut args.children));
    Some(Element::view(
        args.key(),
        args.style("list_item"),
        vec![marker, content],
    ))
}
