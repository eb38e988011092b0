// List-item paragraph elision.
//
// A list item whose only content is a single paragraph would otherwise get
// the paragraph's vertical margins on top of the item's own spacing.

use crate::token::{Nesting, Token};

fn is(token: &Token, token_type: &str, nesting: Nesting) -> bool {
    token.token_type == token_type && token.nesting == nesting
}

/// Index of the `paragraph` close matching the `paragraph` open at `open`.
fn matching_paragraph_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.token_type != "paragraph" {
            continue;
        }
        match token.nesting {
            Nesting::Open => depth += 1,
            Nesting::Close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            Nesting::SelfClosing => {}
        }
    }
    None
}

/// Drop the paragraph wrapper of every list item whose sole child is that
/// paragraph. Items with further block siblings keep their paragraphs.
pub fn omit_list_item_paragraph(tokens: Vec<Token>) -> Vec<Token> {
    let mut drop = vec![false; tokens.len()];

    for (i, token) in tokens.iter().enumerate() {
        if !is(token, "list_item", Nesting::Open) {
            continue;
        }
        let open = i + 1;
        if !tokens.get(open).is_some_and(|t| is(t, "paragraph", Nesting::Open)) {
            continue;
        }
        let Some(close) = matching_paragraph_close(&tokens, open) else {
            continue;
        };
        if tokens
            .get(close + 1)
            .is_some_and(|t| is(t, "list_item", Nesting::Close))
        {
            drop[open] = true;
            drop[close] = true;
        }
    }

    tokens
        .into_iter()
        .zip(drop)
        .filter_map(|(token, dropped)| (!dropped).then_some(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(token_type: &str, nesting: Nesting) -> Token {
        let mut token = Token::new(token_type, "", nesting);
        token.block = true;
        token
    }

    fn types(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| format!("{}{:+}", t.token_type, i8::from(t.nesting)))
            .collect()
    }

    #[test]
    fn test_sole_paragraph_is_removed() {
        let result = omit_list_item_paragraph(vec![
            tok("bullet_list", Nesting::Open),
            tok("list_item", Nesting::Open),
            tok("paragraph", Nesting::Open),
            Token::text("one"),
            tok("paragraph", Nesting::Close),
            tok("list_item", Nesting::Close),
            tok("bullet_list", Nesting::Close),
        ]);
        assert_eq!(
            types(&result),
            [
                "bullet_list+1",
                "list_item+1",
                "text+0",
                "list_item-1",
                "bullet_list-1"
            ]
        );
    }

    #[test]
    fn test_paragraph_with_sibling_is_kept() {
        let tokens = vec![
            tok("list_item", Nesting::Open),
            tok("paragraph", Nesting::Open),
            Token::text("one"),
            tok("paragraph", Nesting::Close),
            tok("paragraph", Nesting::Open),
            Token::text("two"),
            tok("paragraph", Nesting::Close),
            tok("list_item", Nesting::Close),
        ];
        let result = omit_list_item_paragraph(tokens.clone());
        assert_eq!(result, tokens);
    }

    #[test]
    fn test_nested_lists_are_elided_independently() {
        let result = omit_list_item_paragraph(vec![
            tok("list_item", Nesting::Open),
            tok("paragraph", Nesting::Open),
            Token::text("outer"),
            tok("paragraph", Nesting::Close),
            tok("bullet_list", Nesting::Open),
            tok("list_item", Nesting::Open),
            tok("paragraph", Nesting::Open),
            Token::text("inner"),
            tok("paragraph", Nesting::Close),
            tok("list_item", Nesting::Close),
            tok("bullet_list", Nesting::Close),
            tok("list_item", Nesting::Close),
        ]);
        assert_eq!(
            types(&result),
            [
                "list_item+1",
                "paragraph+1",
                "text+0",
                "paragraph-1",
                "bullet_list+1",
                "list_item+1",
                "text+0",
                "list_item-1",
                "bullet_list-1",
                "list_item-1"
            ]
        );
    }

    #[test]
    fn test_unbalanced_paragraph_is_left_alone() {
        let tokens = vec![
            tok("list_item", Nesting::Open),
            tok("paragraph", Nesting::Open),
            Token::text("open"),
        ];
        assert_eq!(omit_list_item_paragraph(tokens.clone()).len(), 3);
    }
}
