// Render functions and their registry.
//
// One function per node type, looked up by the type name. Callers can add
// functions for custom node types or replace the built-in ones.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::AstNode;
use crate::element::{Element, PressHandler, TextFactory, TextProps};
use crate::style::{Style, StyleMap};

/// Everything a render function gets to see about one node.
pub struct RenderArgs<'a> {
    pub node: &'a AstNode,
    /// The node's children, already rendered.
    pub children: Vec<Element>,
    /// Ancestors, nearest first. The synthetic `body` root is the last entry.
    pub parents: &'a [&'a AstNode],
    pub styles: &'a StyleMap,
    /// Text-only style inherited from ancestors; only set for leaf nodes and
    /// list items.
    pub inherited_styles: Option<&'a Style>,
    pub text: &'a TextFactory,
    pub on_link_press: Option<&'a PressHandler>,
    pub allowed_image_handlers: &'a [String],
    pub default_image_handler: Option<&'a str>,
}

impl<'a> RenderArgs<'a> {
    /// The node key, as an element key.
    pub fn key(&self) -> Option<&'a str> {
        Some(self.node.key.as_str())
    }

    /// A copy of the style registered under `key` (empty if none).
    pub fn style(&self, key: &str) -> Style {
        self.styles.get_or_empty(key).clone()
    }

    /// The inherited style with the style under `key` composed on top.
    pub fn inherited_with(&self, key: &str) -> Style {
        let inherited = self.inherited_styles.cloned().unwrap_or_default();
        inherited.merged(self.styles.get_or_empty(key))
    }

    /// Build a text primitive through the configured text constructor.
    pub fn make_text(&self, props: TextProps) -> Element {
        (self.text)(props)
    }
}

/// A render function: node plus context in, element (or nothing) out.
pub type RenderFunction = Arc<dyn Fn(RenderArgs<'_>) -> Option<Element> + Send + Sync>;

/// Render functions keyed by node type name.
#[derive(Clone, Default)]
pub struct RenderFunctionMap {
    functions: HashMap<String, RenderFunction>,
}

impl RenderFunctionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` for nodes of type `node_type`.
    pub fn insert<F>(&mut self, node_type: &str, function: F)
    where
        F: Fn(RenderArgs<'_>) -> Option<Element> + Send + Sync + 'static,
    {
        self.functions.insert(node_type.to_string(), Arc::new(function));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<F>(mut self, node_type: &str, function: F) -> Self
    where
        F: Fn(RenderArgs<'_>) -> Option<Element> + Send + Sync + 'static,
    {
        self.insert(node_type, function);
        self
    }

    pub fn get(&self, node_type: &str) -> Option<&RenderFunction> {
        self.functions.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.functions.contains_key(node_type)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Add every function of `other`, replacing same-named entries.
    pub fn extend(&mut self, other: &RenderFunctionMap) {
        for (name, function) in &other.functions {
            self.functions.insert(name.clone(), Arc::clone(function));
        }
    }
}

impl fmt::Debug for RenderFunctionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}
