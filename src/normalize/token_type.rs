// Canonical token types.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::Token;

static OPEN_CLOSE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(?:open|close)$").expect("valid suffix regex"));

/// Canonical type of a token: the type with any `_open`/`_close` suffix
/// stripped, and headings qualified with their level (`h2` → `heading2`).
pub fn token_type_by_token(token: &Token) -> String {
    let cleaned = OPEN_CLOSE_SUFFIX.replace(&token.token_type, "");
    if cleaned == "heading" {
        let level = token.tag.get(1..).unwrap_or_default();
        format!("heading{level}")
    } else {
        cleaned.into_owned()
    }
}
