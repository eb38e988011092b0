// Helpers shared by render functions.

use crate::ast::{AstNode, NodeKind, NodeType};
use crate::element::PressHandler;

/// The nearest `ordered_list` ancestor.
pub fn find_ordered_list_parent<'a>(parents: &[&'a AstNode]) -> Option<&'a AstNode> {
    parents
        .iter()
        .copied()
        .find(|parent| parent.node_type == NodeType::OrderedList)
}

/// The nearest list container (bullet or ordered) among the ancestors.
pub fn nearest_list_parent<'a>(parents: &[&'a AstNode]) -> Option<&'a AstNode> {
    parents.iter().copied().find(|parent| {
        matches!(
            parent.node_type,
            NodeType::BulletList | NodeType::OrderedList
        )
    })
}

/// Visible number of an ordered list item: list start (default 1) plus the
/// item's sibling index.
pub fn ordered_item_number(item: &AstNode, parents: &[&AstNode]) -> u64 {
    let start = find_ordered_list_parent(parents)
        .and_then(|list| match list.kind() {
            NodeKind::OrderedList { start } => start,
            _ => None,
        })
        .unwrap_or(1);
    u64::from(start) + item.index as u64
}

/// Handle a link activation. Returns whether the host should open `url`.
///
/// An empty url does nothing. A callback decides for itself; without one
/// the url is always opened.
pub fn open_url(url: &str, callback: Option<&PressHandler>) -> bool {
    if url.is_empty() {
        return false;
    }
    match callback {
        Some(callback) => callback(url),
        None => true,
    }
}
