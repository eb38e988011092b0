// Link structural repair.
//
// A link whose content contains a block-level token (typically an image)
// cannot be laid out as an inline text run. Such links are promoted to
// `blocklink` so the renderer can give them block layout.

use crate::token::Token;

/// Retype `link` open/close pairs that enclose a block token to `blocklink`.
///
/// Tokens are never dropped or reordered; only `token_type` and `block`
/// change. Expects canonical types (`link`, not `link_open`).
pub fn promote_block_links(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for mut token in tokens {
        let is_link = token.token_type == "link";
        if is_link && token.is_open() && stack.is_empty() {
            stack.push(token);
        } else if is_link && token.is_close() && !stack.is_empty() {
            if stack.iter().any(|t| t.block) {
                if let Some(open) = stack.first_mut() {
                    open.token_type = "blocklink".to_string();
                    open.block = true;
                }
                token.token_type = "blocklink".to_string();
                token.block = true;
            }
            stack.push(token);
            result.append(&mut stack);
        } else if !stack.is_empty() {
            stack.push(token);
        } else {
            result.push(token);
        }
    }

    // Unterminated link scope: emit what was absorbed unchanged.
    result.append(&mut stack);
    result
}
