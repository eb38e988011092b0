// Text-run grouping.
//
// Consecutive inline tokens are wrapped in a synthetic `textgroup` scope so
// that a run of phrasing content renders as one text primitive.

use serde_json::Value;

use crate::token::{Nesting, Token};

/// Build a synthetic `textgroup` open or close token.
pub fn textgroup_token(nesting: Nesting) -> Token {
    let mut token = Token::new("textgroup", "", nesting);
    token.attrs = Some(Vec::new());
    token.meta = Value::Object(Default::default());
    token
}

/// Wrap every run of non-block tokens in `textgroup` open/close tokens.
///
/// A run still open at the end of the input is left unterminated; the AST
/// builder attaches its tokens to the open group regardless.
pub fn group_text_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() + 2);
    let mut grouping = false;

    for token in tokens {
        match (token.block, grouping) {
            (false, false) => {
                grouping = true;
                result.push(textgroup_token(Nesting::Open));
            }
            (true, true) => {
                grouping = false;
                result.push(textgroup_token(Nesting::Close));
            }
            _ => {}
        }
        result.push(token);
    }

    result
}
