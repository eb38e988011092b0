// AST → element tree renderer.
//
// Walks the AST depth-first, rendering children before their parent. Leaf
// nodes and list items receive the text-only style inherited from their
// ancestors; each node is then handed to the render function registered for
// its type.

mod defaults;
mod rules;
mod util;

pub use defaults::{default_render_functions, resolve_image_uri, BULLET};
pub use rules::{RenderArgs, RenderFunction, RenderFunctionMap};
pub use util::{find_ordered_list_parent, nearest_list_parent, open_url, ordered_item_number};

use std::fmt;

use crate::ast::{AstNode, NodeType};
use crate::element::{default_text_factory, Element, PressHandler, TextFactory, TextProps};
use crate::log::{debug, warn};
use crate::style::{convert_additional_styles, text_only_style, Style, StyleMap};

/// Image source prefixes accepted verbatim by default.
pub const DEFAULT_ALLOWED_IMAGE_HANDLERS: [&str; 5] = [
    "data:image/png;base64",
    "data:image/gif;base64",
    "data:image/jpeg;base64",
    "https://",
    "http://",
];

/// Prefix applied to image sources outside the allow-list by default.
pub const DEFAULT_IMAGE_HANDLER: &str = "https://";

/// Renderer configuration.
#[derive(Clone)]
pub struct RendererOptions {
    /// Constructor for text primitives.
    pub text_factory: TextFactory,
    /// Per-type style overrides.
    pub styles: Option<StyleMap>,
    /// Merge `styles` over the default styles (`true`) or use them alone.
    pub use_default_styles: bool,
    /// Per-type render function overrides.
    pub render_functions: RenderFunctionMap,
    /// Merge `render_functions` over the defaults (`true`) or use them alone.
    pub use_default_render_functions: bool,
    /// Called when a link is pressed.
    pub on_link_press: Option<PressHandler>,
    /// Maximum number of top-level children to render; `Some(0)` is no limit.
    pub max_top_level_children: Option<usize>,
    /// Appended in place of the top-level children beyond the maximum.
    pub top_level_exceeded: Element,
    /// Image source prefixes accepted verbatim (case-insensitive).
    pub allowed_image_handlers: Vec<String>,
    /// Prefix for image sources outside the allow-list; `None` drops them.
    pub default_image_handler: Option<String>,
    /// Log every visited node type, indented by depth.
    pub debug_print_tree: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            text_factory: default_text_factory(),
            styles: None,
            use_default_styles: true,
            render_functions: RenderFunctionMap::new(),
            use_default_render_functions: true,
            on_link_press: None,
            max_top_level_children: None,
            top_level_exceeded: Element::text(TextProps {
                key: Some("dotdotdot".to_string()),
                content: Some("...".to_string()),
                ..Default::default()
            }),
            allowed_image_handlers: DEFAULT_ALLOWED_IMAGE_HANDLERS
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            default_image_handler: Some(DEFAULT_IMAGE_HANDLER.to_string()),
            debug_print_tree: false,
        }
    }
}

impl RendererOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text primitive constructor.
    pub fn with_text_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(TextProps) -> Element + Send + Sync + 'static,
    {
        self.text_factory = std::sync::Arc::new(factory);
        self
    }

    /// Set per-type style overrides.
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Set whether style overrides are merged with the default styles.
    pub fn with_default_styles(mut self, use_defaults: bool) -> Self {
        self.use_default_styles = use_defaults;
        self
    }

    /// Set per-type render function overrides.
    pub fn with_render_functions(mut self, functions: RenderFunctionMap) -> Self {
        self.render_functions = functions;
        self
    }

    /// Set whether render function overrides are merged with the defaults.
    pub fn with_default_render_functions(mut self, use_defaults: bool) -> Self {
        self.use_default_render_functions = use_defaults;
        self
    }

    /// Set the link press callback.
    pub fn with_on_link_press<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.on_link_press = Some(std::sync::Arc::new(callback));
        self
    }

    /// Limit the number of rendered top-level children.
    pub fn with_max_top_level_children(mut self, max: usize) -> Self {
        self.max_top_level_children = Some(max);
        self
    }

    /// Set the placeholder appended when top-level children are cut.
    pub fn with_top_level_exceeded(mut self, placeholder: Element) -> Self {
        self.top_level_exceeded = placeholder;
        self
    }

    /// Set the image source allow-list.
    pub fn with_allowed_image_handlers<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_image_handlers = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set (or clear) the default image source prefix.
    pub fn with_default_image_handler(mut self, handler: Option<&str>) -> Self {
        self.default_image_handler = handler.map(str::to_string);
        self
    }

    /// Set whether visited nodes are logged.
    pub fn with_debug_print_tree(mut self, debug: bool) -> Self {
        self.debug_print_tree = debug;
        self
    }
}

impl fmt::Debug for RendererOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererOptions")
            .field("styles", &self.styles)
            .field("use_default_styles", &self.use_default_styles)
            .field("render_functions", &self.render_functions)
            .field("use_default_render_functions", &self.use_default_render_functions)
            .field("on_link_press", &self.on_link_press.is_some())
            .field("max_top_level_children", &self.max_top_level_children)
            .field("allowed_image_handlers", &self.allowed_image_handlers)
            .field("default_image_handler", &self.default_image_handler)
            .field("debug_print_tree", &self.debug_print_tree)
            .finish_non_exhaustive()
    }
}

/// Renders AST nodes into an element tree.
///
/// Styles and render functions are resolved once at construction; rendering
/// never mutates the renderer, so one instance can serve many documents.
#[derive(Clone)]
pub struct AstRenderer {
    render_functions: RenderFunctionMap,
    styles: StyleMap,
    text_factory: TextFactory,
    on_link_press: Option<PressHandler>,
    max_top_level_children: Option<usize>,
    top_level_exceeded: Element,
    allowed_image_handlers: Vec<String>,
    default_image_handler: Option<String>,
    debug_print_tree: bool,
}

impl AstRenderer {
    /// Build a renderer.
    ///
    /// A renderer without a `body` render function is accepted; rendering a
    /// document with it produces nothing.
    pub fn new(options: RendererOptions) -> Self {
        let render_functions = if options.use_default_render_functions {
            let mut functions = default_render_functions();
            functions.extend(&options.render_functions);
            functions
        } else {
            options.render_functions
        };

        Self {
            render_functions,
            styles: StyleMap::resolve(options.styles.as_ref(), options.use_default_styles),
            text_factory: options.text_factory,
            on_link_press: options.on_link_press,
            max_top_level_children: options.max_top_level_children,
            top_level_exceeded: options.top_level_exceeded,
            allowed_image_handlers: options.allowed_image_handlers,
            default_image_handler: options.default_image_handler,
            debug_print_tree: options.debug_print_tree,
        }
    }

    /// The resolved style map.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Render a document: the nodes are wrapped in a synthetic `body` root.
    pub fn render(&self, nodes: &[AstNode]) -> Option<Element> {
        let root = AstNode::new(NodeType::Body, "body");
        self.render_tree(&root, nodes, &[], true)
    }

    /// Render one node given its ancestors (nearest first).
    pub fn render_node(
        &self,
        node: &AstNode,
        parents: &[&AstNode],
        is_root: bool,
    ) -> Option<Element> {
        self.render_tree(node, &node.children, parents, is_root)
    }

    fn render_tree(
        &self,
        node: &AstNode,
        children: &[AstNode],
        parents: &[&AstNode],
        is_root: bool,
    ) -> Option<Element> {
        if self.debug_print_tree {
            debug!("{}{}", "-".repeat(parents.len()), node.node_type);
        }

        let mut chain: Vec<&AstNode> = Vec::with_capacity(parents.len() + 1);
        chain.push(node);
        chain.extend_from_slice(parents);

        let mut rendered: Vec<Option<Element>> = children
            .iter()
            .map(|child| self.render_node(child, &chain, false))
            .collect();

        let inherited = if children.is_empty() || node.node_type == NodeType::ListItem {
            self.inherited_style(parents)
        } else {
            None
        };

        if is_root {
            // A limit of zero means no limit.
            if let Some(max) = self.max_top_level_children.filter(|&max| max > 0) {
                if rendered.len() > max {
                    rendered.truncate(max);
                    rendered.push(Some(self.top_level_exceeded.clone()));
                }
            }
        }

        let Some(render_function) = self.render_functions.get(node.node_type.as_str()) else {
            warn!(
                "Unknown node type encountered: {}. Nothing will be rendered. \
                 Provide a render function if you intend to render this node.",
                node.node_type
            );
            return None;
        };

        render_function(RenderArgs {
            node,
            children: rendered.into_iter().flatten().collect(),
            parents,
            styles: &self.styles,
            inherited_styles: inherited.as_ref(),
            text: &self.text_factory,
            on_link_press: self.on_link_press.as_ref(),
            allowed_image_handlers: &self.allowed_image_handlers,
            default_image_handler: self.default_image_handler.as_deref(),
        })
    }

    /// Text-only style accumulated from the ancestors, farthest first, so
    /// the nearest ancestor wins on conflicting properties.
    fn inherited_style(&self, parents: &[&AstNode]) -> Option<Style> {
        let mut inherited: Option<Style> = None;

        for (depth, parent) in parents.iter().enumerate().rev() {
            let mut style = parent
                .attribute("style")
                .map(convert_additional_styles)
                .unwrap_or_default();

            if let Some(type_style) = self.styles.get(parent.node_type.as_str()) {
                style.merge(type_style);

                if parent.node_type == NodeType::ListItem {
                    let content_key = match parents.get(depth + 1).map(|p| &p.node_type) {
                        Some(NodeType::BulletList) => Some("list_item_bullet_content"),
                        Some(NodeType::OrderedList) => Some("list_item_ordered_content"),
                        _ => None,
                    };
                    if let Some(content) = content_key.and_then(|key| self.styles.get(key)) {
                        style.merge(content);
                    }
                }
            }

            inherited
                .get_or_insert_with(Style::new)
                .merge(&text_only_style(&style));
        }

        inherited
    }
}

impl fmt::Debug for AstRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstRenderer")
            .field("render_functions", &self.render_functions)
            .field("styles", &self.styles)
            .field("max_top_level_children", &self.max_top_level_children)
            .field("allowed_image_handlers", &self.allowed_image_handlers)
            .field("default_image_handler", &self.default_image_handler)
            .field("debug_print_tree", &self.debug_print_tree)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::style::StyleValue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn text(key: &str, content: &str) -> AstNode {
        AstNode::new("text", key).with_content(content)
    }

    fn renderer() -> AstRenderer {
        AstRenderer::new(RendererOptions::default())
    }

    #[test]
    fn test_renders_paragraph() {
        let ast = vec![AstNode::new("paragraph", "p").with_child(text("t", "hello"))];
        let root = renderer().render(&ast).unwrap();
        assert_eq!(root.kind, ElementKind::View);
        assert_eq!(root.key.as_deref(), Some("body"));
        assert_eq!(root.text_content(), "hello");
    }

    #[test]
    fn test_top_level_truncation() {
        let ast: Vec<AstNode> = (0..10)
            .map(|i| AstNode::new("paragraph", format!("p{i}")).with_child(text("t", "x")))
            .collect();
        let renderer = AstRenderer::new(RendererOptions::new().with_max_top_level_children(3));
        let root = renderer.render(&ast).unwrap();
        assert_eq!(root.children.len(), 4);
        assert_eq!(root.children[3].key.as_deref(), Some("dotdotdot"));
        assert_eq!(root.children[3].content.as_deref(), Some("..."));
    }

    #[test]
    fn test_truncation_only_at_root() {
        let mut list = AstNode::new("bullet_list", "l");
        for i in 0..5 {
            let item = AstNode::new("list_item", format!("i{i}")).with_child(text("t", "x"));
            list = list.with_child(item);
        }
        let renderer = AstRenderer::new(RendererOptions::new().with_max_top_level_children(1));
        let root = renderer.render(&[list]).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 5);
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let ast = vec![
            AstNode::new("html_block", "h").with_content("<div>"),
            AstNode::new("paragraph", "p").with_child(text("t", "after")),
        ];
        let root = renderer().render(&ast).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.text_content(), "after");
    }

    #[test]
    fn test_inherited_style_nearest_wins() {
        let styles = StyleMap::new()
            .with("blockquote", Style::new().with("color", "red").with("fontSize", 20))
            .with("paragraph", Style::new().with("color", "blue").with("marginTop", 4));
        let renderer = AstRenderer::new(
            RendererOptions::new()
                .with_styles(styles)
                .with_default_styles(false),
        );
        let ast = vec![AstNode::new("blockquote", "q")
            .with_child(AstNode::new("paragraph", "p").with_child(text("t", "x")))];
        let root = renderer.render(&ast).unwrap();
        let leaf = &root.children[0].children[0].children[0];
        assert_eq!(leaf.style.get("color"), Some(&StyleValue::from("blue")));
        assert_eq!(leaf.style.get("fontSize"), Some(&StyleValue::Number(20.0)));
        assert!(!leaf.style.contains("marginTop"));
    }

    #[test]
    fn test_list_item_content_style_follows_list_kind() {
        let styles = StyleMap::new()
            .with("list_item", Style::new().with("fontSize", 14))
            .with("list_item_ordered_content", Style::new().with("color", "green"))
            .with("list_item_bullet_content", Style::new().with("color", "gray"));
        let renderer = AstRenderer::new(
            RendererOptions::new()
                .with_styles(styles)
                .with_default_styles(false),
        );
        let list = |list_type: &str, content: &str| {
            AstNode::new(list_type, "l")
                .with_child(AstNode::new("list_item", "li").with_child(text("t", content)))
        };
        let root = renderer
            .render(&[list("ordered_list", "one"), list("bullet_list", "two")])
            .unwrap();
        let leaf = |content: &str| {
            root.descendants()
                .into_iter()
                .find(|element| element.content.as_deref() == Some(content))
                .cloned()
                .unwrap()
        };

        let ordered = leaf("one");
        assert_eq!(ordered.style.get("color"), Some(&StyleValue::from("green")));
        assert_eq!(ordered.style.get("fontSize"), Some(&StyleValue::Number(14.0)));
        let bullet = leaf("two");
        assert_eq!(bullet.style.get("color"), Some(&StyleValue::from("gray")));
    }

    #[test]
    fn test_list_item_content_style_needs_list_item_style() {
        let styles = StyleMap::new()
            .with("list_item_ordered_content", Style::new().with("color", "green"));
        let renderer = AstRenderer::new(
            RendererOptions::new()
                .with_styles(styles)
                .with_default_styles(false),
        );
        let list = AstNode::new("ordered_list", "ol")
            .with_child(AstNode::new("list_item", "li").with_child(text("t", "one")));
        let root = renderer.render(&[list]).unwrap();
        let leaf = root
            .descendants()
            .into_iter()
            .find(|element| element.content.as_deref() == Some("one"))
            .unwrap();
        assert!(!leaf.style.contains("color"));
    }

    #[test]
    fn test_inline_style_attribute_is_inherited() {
        let ast = vec![AstNode::new("table", "tb").with_child(
            AstNode::new("td", "c")
                .with_attribute("style", "text-align:right")
                .with_child(text("t", "1")),
        )];
        let root = renderer().render(&ast).unwrap();
        let leaf = &root.children[0].children[0].children[0];
        assert_eq!(leaf.style.get("textAlign"), Some(&StyleValue::from("right")));
    }

    #[test]
    fn test_ordered_list_numbering() {
        let mut list = AstNode::new("ordered_list", "ol").with_attribute("start", "3");
        for i in 0..3 {
            let mut item = AstNode::new("list_item", format!("li{i}")).with_child(text("t", "x"));
            item.markup = Some(".".to_string());
            list = list.with_child(item);
        }
        let root = renderer().render(&[list]).unwrap();
        let items = &root.children[0].children;
        let markers: Vec<&str> = items
            .iter()
            .map(|item| item.children[0].content.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(markers, ["3.", "4.", "5."]);
    }

    #[test]
    fn test_bullet_marker() {
        let list = AstNode::new("bullet_list", "ul")
            .with_child(AstNode::new("list_item", "li").with_child(text("t", "x")));
        let root = renderer().render(&[list]).unwrap();
        let marker = &root.children[0].children[0].children[0];
        assert_eq!(marker.content.as_deref(), Some(BULLET));
        assert_eq!(marker.accessible, Some(false));
    }

    #[test]
    fn test_image_allow_list() {
        let image = |src: &str| {
            AstNode::new("image", "img")
                .with_attribute("src", src)
                .with_attribute("alt", "pic")
        };
        let renderer = AstRenderer::new(
            RendererOptions::new()
                .with_allowed_image_handlers(["https://"])
                .with_default_image_handler(None),
        );

        let root = renderer.render(&[image("https://x.png")]).unwrap();
        assert_eq!(root.children[0].source.as_deref(), Some("https://x.png"));
        assert_eq!(root.children[0].accessibility_label.as_deref(), Some("pic"));

        let root = renderer.render(&[image("ftp://x.png")]).unwrap();
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_link_press_uses_callback() {
        let pressed = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&pressed);
        let renderer = AstRenderer::new(RendererOptions::new().with_on_link_press(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            false
        }));
        let link = AstNode::new("link", "a")
            .with_attribute("href", "https://example.com")
            .with_child(text("t", "go"));
        let root = renderer.render(&[link]).unwrap();
        let pressable = &root.children[0];
        assert_eq!(pressable.kind, ElementKind::Pressable);
        assert!(!pressable.press());
        assert_eq!(pressed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_custom_render_function_overrides_default() {
        let functions = RenderFunctionMap::new().with("text", |args: RenderArgs<'_>| {
            Some(Element::text(TextProps {
                content: args.node.content.as_ref().map(|c| c.to_uppercase()),
                ..Default::default()
            }))
        });
        let renderer = AstRenderer::new(RendererOptions::new().with_render_functions(functions));
        let root = renderer.render(&[text("t", "shout")]).unwrap();
        assert_eq!(root.text_content(), "SHOUT");
    }

    #[test]
    fn test_zero_limit_renders_everything() {
        let ast: Vec<AstNode> = (0..5)
            .map(|i| AstNode::new("paragraph", format!("p{i}")).with_child(text("t", "x")))
            .collect();
        let renderer = AstRenderer::new(RendererOptions::new().with_max_top_level_children(0));
        let root = renderer.render(&ast).unwrap();
        assert_eq!(root.children.len(), 5);
        assert_eq!(root.text_content(), "xxxxx");
    }

    #[test]
    fn test_missing_body_function_renders_nothing() {
        let functions = RenderFunctionMap::new().with("text", |args: RenderArgs<'_>| {
            Some(args.make_text(TextProps::default()))
        });
        let renderer = AstRenderer::new(
            RendererOptions::new()
                .with_render_functions(functions)
                .with_default_render_functions(false),
        );
        assert!(renderer.render(&[text("t", "x")]).is_none());
    }

    #[test]
    fn test_renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AstRenderer>();
    }
}
