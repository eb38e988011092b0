// Rendered output tree.
//
// A small retained element model standing in for a UI toolkit's primitives
// (view, text, pressable, image). Render functions build these; a host
// layer turns them into real widgets.

use std::fmt;
use std::sync::Arc;

use crate::render::open_url;
use crate::style::Style;

/// Called with a link's href when it is pressed. Returning `true` asks the
/// host to open the URL itself as well.
pub type PressHandler = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Constructor for text primitives, swappable to use a custom text widget.
pub type TextFactory = Arc<dyn Fn(TextProps) -> Element + Send + Sync>;

/// Primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    View,
    Text,
    Pressable,
    Image,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::View => "View",
            ElementKind::Text => "Text",
            ElementKind::Pressable => "Pressable",
            ElementKind::Image => "Image",
        };
        f.write_str(name)
    }
}

/// Arguments handed to a [`TextFactory`].
#[derive(Debug, Clone, Default)]
pub struct TextProps {
    pub key: Option<String>,
    pub style: Style,
    pub content: Option<String>,
    pub children: Vec<Element>,
    pub accessible: Option<bool>,
}

/// A node of the rendered output tree.
#[derive(Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub key: Option<String>,
    /// Composed style, already flattened.
    pub style: Style,
    /// Literal text carried by a text element.
    pub content: Option<String>,
    pub children: Vec<Element>,
    /// Link target of a pressable.
    pub href: Option<String>,
    /// Image source URI.
    pub source: Option<String>,
    pub accessible: Option<bool>,
    pub accessibility_role: Option<String>,
    pub accessibility_label: Option<String>,
    pub on_press: Option<PressHandler>,
}

impl Element {
    fn bare(kind: ElementKind, key: Option<String>, style: Style) -> Self {
        Self {
            kind,
            key,
            style,
            content: None,
            children: Vec::new(),
            href: None,
            source: None,
            accessible: None,
            accessibility_role: None,
            accessibility_label: None,
            on_press: None,
        }
    }

    /// A layout container.
    pub fn view(key: Option<&str>, style: Style, children: Vec<Element>) -> Self {
        let mut element = Self::bare(ElementKind::View, key.map(str::to_string), style);
        element.children = children;
        element
    }

    /// The default text primitive.
    pub fn text(props: TextProps) -> Self {
        let mut element = Self::bare(ElementKind::Text, props.key, props.style);
        element.content = props.content;
        element.children = props.children;
        element.accessible = props.accessible;
        element
    }

    /// A pressable wrapper that follows `href` when pressed.
    pub fn pressable(
        key: Option<&str>,
        style: Style,
        href: &str,
        on_press: Option<PressHandler>,
        children: Vec<Element>,
    ) -> Self {
        let mut element = Self::bare(ElementKind::Pressable, key.map(str::to_string), style);
        element.href = Some(href.to_string());
        element.on_press = on_press;
        element.accessibility_role = Some("link".to_string());
        element.children = children;
        element
    }

    /// An image loaded from `uri`.
    pub fn image(key: Option<&str>, style: Style, uri: &str) -> Self {
        let mut element = Self::bare(ElementKind::Image, key.map(str::to_string), style);
        element.source = Some(uri.to_string());
        element
    }

    /// Activate a pressable. Returns whether the host should open the href.
    pub fn press(&self) -> bool {
        match &self.href {
            Some(href) => open_url(href, self.on_press.as_ref()),
            None => false,
        }
    }

    /// All text content in this subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(content) = &self.content {
            out.push_str(content);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// This element and all its descendants, depth-first.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(depth), self.kind)?;
        if let Some(content) = &self.content {
            write!(f, " {content:?}")?;
        }
        if let Some(href) = &self.href {
            write!(f, " -> {href}")?;
        }
        if let Some(source) = &self.source {
            write!(f, " src={source}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("style", &self.style)
            .field("content", &self.content)
            .field("href", &self.href)
            .field("source", &self.source)
            .field("accessibility_label", &self.accessibility_label)
            .field("on_press", &self.on_press.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Indented outline, one element per line.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

/// The default [`TextFactory`].
pub fn default_text_factory() -> TextFactory {
    Arc::new(Element::text)
}
