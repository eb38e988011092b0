// Render-ready abstract syntax tree.
//
// Each node is built from one normalized token. Parent nodes own their
// children in document order; `index` records the position among siblings
// at construction time and drives ordered-list numbering.

mod build;

pub use build::tokens_to_ast;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node attributes, taken from the token's `attrs` (later duplicates win).
pub type Attributes = BTreeMap<String, String>;

/// Canonical node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// Synthetic root container.
    Body,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Hr,
    Strong,
    Em,
    S,
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    CodeInline,
    CodeBlock,
    Fence,
    Table,
    Thead,
    Tbody,
    Th,
    Tr,
    Td,
    Link,
    /// A link whose content includes a block-level node.
    Blocklink,
    Image,
    Text,
    /// Synthetic wrapper around a run of inline nodes.
    Textgroup,
    Paragraph,
    Hardbreak,
    Softbreak,
    Pre,
    Inline,
    Span,
    /// Any type outside the known set (`html_block`, plugin types, ...).
    Custom(String),
}

impl NodeType {
    /// The type name used as key in style and render-function maps.
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Body => "body",
            NodeType::Heading1 => "heading1",
            NodeType::Heading2 => "heading2",
            NodeType::Heading3 => "heading3",
            NodeType::Heading4 => "heading4",
            NodeType::Heading5 => "heading5",
            NodeType::Heading6 => "heading6",
            NodeType::Hr => "hr",
            NodeType::Strong => "strong",
            NodeType::Em => "em",
            NodeType::S => "s",
            NodeType::Blockquote => "blockquote",
            NodeType::BulletList => "bullet_list",
            NodeType::OrderedList => "ordered_list",
            NodeType::ListItem => "list_item",
            NodeType::CodeInline => "code_inline",
            NodeType::CodeBlock => "code_block",
            NodeType::Fence => "fence",
            NodeType::Table => "table",
            NodeType::Thead => "thead",
            NodeType::Tbody => "tbody",
            NodeType::Th => "th",
            NodeType::Tr => "tr",
            NodeType::Td => "td",
            NodeType::Link => "link",
            NodeType::Blocklink => "blocklink",
            NodeType::Image => "image",
            NodeType::Text => "text",
            NodeType::Textgroup => "textgroup",
            NodeType::Paragraph => "paragraph",
            NodeType::Hardbreak => "hardbreak",
            NodeType::Softbreak => "softbreak",
            NodeType::Pre => "pre",
            NodeType::Inline => "inline",
            NodeType::Span => "span",
            NodeType::Custom(name) => name,
        }
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        match name {
            "body" => NodeType::Body,
            "heading1" => NodeType::Heading1,
            "heading2" => NodeType::Heading2,
            "heading3" => NodeType::Heading3,
            "heading4" => NodeType::Heading4,
            "heading5" => NodeType::Heading5,
            "heading6" => NodeType::Heading6,
            "hr" => NodeType::Hr,
            "strong" => NodeType::Strong,
            "em" => NodeType::Em,
            "s" => NodeType::S,
            "blockquote" => NodeType::Blockquote,
            "bullet_list" => NodeType::BulletList,
            "ordered_list" => NodeType::OrderedList,
            "list_item" => NodeType::ListItem,
            "code_inline" => NodeType::CodeInline,
            "code_block" => NodeType::CodeBlock,
            "fence" => NodeType::Fence,
            "table" => NodeType::Table,
            "thead" => NodeType::Thead,
            "tbody" => NodeType::Tbody,
            "th" => NodeType::Th,
            "tr" => NodeType::Tr,
            "td" => NodeType::Td,
            "link" => NodeType::Link,
            "blocklink" => NodeType::Blocklink,
            "image" => NodeType::Image,
            "text" => NodeType::Text,
            "textgroup" => NodeType::Textgroup,
            "paragraph" => NodeType::Paragraph,
            "hardbreak" => NodeType::Hardbreak,
            "softbreak" => NodeType::Softbreak,
            "pre" => NodeType::Pre,
            "inline" => NodeType::Inline,
            "span" => NodeType::Span,
            other => NodeType::Custom(other.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        NodeType::from(name.as_str())
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        node_type.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific view of a node's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    Link { href: &'a str },
    Image { src: &'a str, alt: &'a str },
    OrderedList { start: Option<u32> },
    Other,
}

/// A node of the render-ready tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Token type the node was built from (`heading_open`, `text`, ...).
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub source_info: String,
    #[serde(default)]
    pub source_meta: Value,
    #[serde(default)]
    pub block: bool,
    pub key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub markup: Option<String>,
    /// Position of the source token in its token sequence.
    #[serde(default)]
    pub token_index: usize,
    /// Position among siblings at construction time.
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub children: Vec<AstNode>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl AstNode {
    /// Create an empty node; mostly useful for hand-built trees.
    pub fn new(node_type: impl Into<NodeType>, key: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            source_type: String::new(),
            source_info: String::new(),
            source_meta: Value::Null,
            block: false,
            key: key.into(),
            content: None,
            markup: None,
            token_index: 0,
            index: 0,
            children: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Append a child, setting its `index` to its sibling position.
    pub fn with_child(mut self, mut child: AstNode) -> Self {
        child.index = self.children.len();
        self.children.push(child);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Typed view of the attributes required by this node's type.
    pub fn kind(&self) -> NodeKind<'_> {
        match self.node_type {
            NodeType::Link | NodeType::Blocklink => NodeKind::Link {
                href: self.attribute("href").unwrap_or_default(),
            },
            NodeType::Image => NodeKind::Image {
                src: self.attribute("src").unwrap_or_default(),
                alt: self.attribute("alt").unwrap_or_default(),
            },
            NodeType::OrderedList => NodeKind::OrderedList {
                start: self.attribute("start").and_then(|s| s.trim().parse().ok()),
            },
            _ => NodeKind::Other,
        }
    }

    /// Whether this is a `text` node with neither content nor children.
    pub fn is_empty_text(&self) -> bool {
        self.node_type == NodeType::Text
            && self.children.is_empty()
            && self.content.as_deref().unwrap_or_default().is_empty()
    }
}
