// Token stream → AST.
//
// Single pass over the normalized tokens with an explicit stack of sibling
// lists. Opening tokens descend into the new node's children, closing
// tokens return to the parent's sibling list. A token's own nested
// `children` field (image alt tokens) is converted recursively.

use super::{AstNode, Attributes, NodeType};
use crate::normalize::token_type_by_token;
use crate::token::{Nesting, Token};

/// Hands out keys unique within one build.
struct KeyGen {
    next: usize,
}

impl KeyGen {
    fn key(&mut self, node_type: &NodeType) -> String {
        let key = format!("{}_{}", self.next, node_type);
        self.next += 1;
        key
    }
}

/// Convert a normalized token stream into a list of top-level nodes.
///
/// Unbalanced closing tokens never fail: closing with nothing open resets
/// the current sibling list to an empty one, dropping later siblings.
pub fn tokens_to_ast(tokens: &[Token]) -> Vec<AstNode> {
    let mut keys = KeyGen { next: 0 };
    build(tokens, &mut keys)
}

fn build(tokens: &[Token], keys: &mut KeyGen) -> Vec<AstNode> {
    // Each entry is a parent's sibling list whose last node is the open scope.
    let mut stack: Vec<Vec<AstNode>> = Vec::new();
    let mut current: Vec<AstNode> = Vec::new();

    for (token_index, token) in tokens.iter().enumerate() {
        let mut node = create_node(token, token_index, keys);
        if node.is_empty_text() {
            continue;
        }
        node.index = current.len();

        match token.nesting {
            Nesting::Open => {
                stack.push(std::mem::take(&mut current));
                current = std::mem::take(&mut node.children);
                if let Some(parent) = stack.last_mut() {
                    parent.push(node);
                }
            }
            Nesting::Close => {
                let children = std::mem::take(&mut current);
                current = stack.pop().unwrap_or_default();
                if let Some(open) = current.last_mut() {
                    open.children = children;
                }
            }
            Nesting::SelfClosing => current.push(node),
        }
    }

    // Scopes left open at the end still own what was attached to them.
    while let Some(mut parent) = stack.pop() {
        let children = std::mem::take(&mut current);
        if let Some(open) = parent.last_mut() {
            open.children = children;
        }
        current = parent;
    }

    current
}

fn create_node(token: &Token, token_index: usize, keys: &mut KeyGen) -> AstNode {
    let node_type = NodeType::from(token_type_by_token(token));

    let attributes: Attributes = token
        .attrs
        .iter()
        .flatten()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let children = token
        .children
        .as_deref()
        .map(|children| build(children, keys))
        .unwrap_or_default();

    AstNode {
        key: keys.key(&node_type),
        node_type,
        source_type: token.token_type.clone(),
        source_info: token.info.clone(),
        source_meta: token.meta.clone(),
        block: token.block,
        content: Some(token.content.clone()),
        markup: Some(token.markup.clone()),
        token_index,
        index: 0,
        children,
        attributes,
    }
}
