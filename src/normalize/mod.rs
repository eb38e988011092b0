// Token normalization.
//
// Turns the raw tokenizer stream into the flat, canonically typed stream
// the AST builder consumes:
//
//   flatten inline → canonical types → block coercion → image alt text
//   → link repair → text-run grouping → list-item paragraph elision

pub(crate) mod alt_text;
pub(crate) mod flatten;
pub(crate) mod group;
pub(crate) mod links;
pub(crate) mod list_item;
pub(crate) mod token_type;

pub use alt_text::render_inline_as_text;
pub use flatten::flatten_inline_tokens;
pub use group::group_text_tokens;
pub use links::promote_block_links;
pub use list_item::omit_list_item_paragraph;
pub use token_type::token_type_by_token;

use crate::token::Token;

/// Flatten, retype and repair a token stream.
///
/// Every token keeps its position except `inline` groups, which are
/// replaced by their children. Running this twice is the same as once.
pub fn cleanup_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut tokens = flatten_inline_tokens(tokens);

    for token in tokens.iter_mut() {
        token.token_type = token_type_by_token(token);

        if token.token_type == "image" || token.token_type == "hardbreak" {
            token.block = true;
        }

        if token.token_type == "image" {
            let alt = render_inline_as_text(token.children.as_deref());
            token.attr_set("alt", alt);
        }
    }

    promote_block_links(tokens)
}

/// Full normalization: cleanup, text-run grouping and list-item elision.
pub fn normalize(tokens: Vec<Token>) -> Vec<Token> {
    let tokens = cleanup_tokens(tokens);
    let tokens = group_text_tokens(tokens);
    omit_list_item_paragraph(tokens)
}
