// Flat tokens — the unit produced by a markdown tokenizer.
//
// Shaped after markdown-it's `Token`: block-level tokens form a flat
// sequence whose scopes are delimited by `nesting`, and inline content is
// carried as a nested `children` sequence on an `inline` token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scope marker of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Nesting {
    /// `+1` — opens a scope (`paragraph_open`).
    Open,
    /// `0` — self-contained (`text`, `image`, `fence`).
    SelfClosing,
    /// `-1` — closes the nearest open scope (`paragraph_close`).
    Close,
}

impl From<Nesting> for i8 {
    fn from(nesting: Nesting) -> Self {
        match nesting {
            Nesting::Open => 1,
            Nesting::SelfClosing => 0,
            Nesting::Close => -1,
        }
    }
}

impl TryFrom<i8> for Nesting {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Nesting::Open),
            0 => Ok(Nesting::SelfClosing),
            -1 => Ok(Nesting::Close),
            other => Err(format!("invalid nesting value {other}, expected -1, 0 or 1")),
        }
    }
}

/// A single token in the flat stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Type name, e.g. `paragraph_open`, `text`, `heading1` after cleanup.
    #[serde(rename = "type")]
    pub token_type: String,
    /// HTML tag name (`h1`, `p`, `img`); empty for synthetic tokens.
    #[serde(default)]
    pub tag: String,
    pub nesting: Nesting,
    /// Nesting level inside the tokenizer's own stream.
    #[serde(default)]
    pub level: u32,
    /// Whether the token occupies its own layout line.
    #[serde(default)]
    pub block: bool,
    /// Set by the tokenizer for paragraphs of tight lists.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub markup: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub attrs: Option<Vec<(String, String)>>,
    #[serde(default)]
    pub children: Option<Vec<Token>>,
}

impl Token {
    /// Create an empty token of the given type.
    pub fn new(token_type: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            token_type: token_type.into(),
            tag: tag.into(),
            nesting,
            level: 0,
            block: false,
            hidden: false,
            content: String::new(),
            markup: String::new(),
            info: String::new(),
            meta: Value::Null,
            attrs: None,
            children: None,
        }
    }

    /// Create a self-contained `text` token.
    pub fn text(content: impl Into<String>) -> Self {
        let mut token = Self::new("text", "", Nesting::SelfClosing);
        token.content = content.into();
        token
    }

    /// Index of the attribute named `name`, if present.
    pub fn attr_index(&self, name: &str) -> Option<usize> {
        self.attrs.as_ref()?.iter().position(|(key, _)| key == name)
    }

    /// Value of the attribute named `name`, if present.
    pub fn attr_get(&self, name: &str) -> Option<&str> {
        let index = self.attr_index(name)?;
        self.attrs.as_ref().map(|attrs| attrs[index].1.as_str())
    }

    /// Append an attribute, creating the attribute list if absent.
    pub fn attr_push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
    }

    /// Overwrite the attribute named `name` in place, or append it.
    pub fn attr_set(&mut self, name: &str, value: impl Into<String>) {
        match (self.attr_index(name), self.attrs.as_mut()) {
            (Some(index), Some(attrs)) => attrs[index].1 = value.into(),
            _ => self.attr_push(name, value),
        }
    }

    pub fn is_open(&self) -> bool {
        self.nesting == Nesting::Open
    }

    pub fn is_close(&self) -> bool {
        self.nesting == Nesting::Close
    }
}
