// Inline flattening.
//
// Block-level `inline` tokens carry their phrasing content as a nested
// `children` sequence. Splicing that content into the flat stream lets the
// rest of the pipeline treat block and inline tokens uniformly.

use crate::token::Token;

/// Recursively replace every `inline` token that has children with its
/// (flattened) children, in order.
///
/// An `inline` token with no children, whether its children sequence is
/// empty or absent, is kept as-is.
pub fn flatten_inline_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    for mut token in tokens {
        if token.token_type == "inline" && token.children.as_ref().is_some_and(|c| !c.is_empty()) {
            if let Some(children) = token.children.take() {
                result.append(&mut flatten_inline_tokens(children));
                continue;
            }
        }
        result.push(token);
    }
    result
}
