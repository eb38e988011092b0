// Plain-text rendering of inline children, used for image alt text.

use crate::token::Token;

/// Concatenate the content of every `text` token depth-first, descending
/// only into nested `image` tokens.
pub fn render_inline_as_text(tokens: Option<&[Token]>) -> String {
    let mut result = String::new();
    push_text(tokens.unwrap_or_default(), &mut result);
    result
}

fn push_text(tokens: &[Token], out: &mut String) {
    for token in tokens {
        match token.token_type.as_str() {
            "text" => out.push_str(&token.content),
            "image" => push_text(token.children.as_deref().unwrap_or_default(), out),
            _ => {}
        }
    }
}
