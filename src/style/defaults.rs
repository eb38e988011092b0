// Default style table.
//
// Built fresh on each call and handed to the renderer at construction time,
// so there is no process-wide mutable default.

use super::{Style, StyleMap};

macro_rules! style {
    ($($property:literal : $value:expr),* $(,)?) => {
        Style::new()$(.with($property, $value))*
    };
}

/// The built-in styles for every known node type and the list-item
/// sub-components.
pub fn default_styles() -> StyleMap {
    let monospace = "monospace";

    StyleMap::new()
        // The main container
        .with("body", style! {})
        // Headings
        .with("heading1", style! { "flexDirection": "row", "fontSize": 32 })
        .with("heading2", style! { "flexDirection": "row", "fontSize": 24 })
        .with("heading3", style! { "flexDirection": "row", "fontSize": 18 })
        .with("heading4", style! { "flexDirection": "row", "fontSize": 16 })
        .with("heading5", style! { "flexDirection": "row", "fontSize": 13 })
        .with("heading6", style! { "flexDirection": "row", "fontSize": 11 })
        // Horizontal rule
        .with("hr", style! { "backgroundColor": "#000000", "height": 1 })
        // Emphasis
        .with("strong", style! { "fontWeight": "bold" })
        .with("em", style! { "fontStyle": "italic" })
        .with("s", style! { "textDecorationLine": "line-through" })
        // Blockquotes
        .with(
            "blockquote",
            style! {
                "backgroundColor": "#F5F5F5",
                "borderColor": "#CCC",
                "borderLeftWidth": 4,
                "marginLeft": 5,
                "paddingHorizontal": 5,
            },
        )
        // Lists
        .with("bullet_list", style! {})
        .with("ordered_list", style! {})
        .with(
            "list_item",
            style! { "flexDirection": "row", "justifyContent": "flex-start" },
        )
        .with("list_item_bullet_marker", style! { "marginLeft": 10, "marginRight": 10 })
        .with("list_item_bullet_content", style! { "flex": 1 })
        .with("list_item_ordered_marker", style! { "marginLeft": 10, "marginRight": 10 })
        .with("list_item_ordered_content", style! { "flex": 1 })
        // Code
        .with(
            "code_inline",
            style! {
                "borderWidth": 1,
                "borderColor": "#CCCCCC",
                "backgroundColor": "#f5f5f5",
                "padding": 10,
                "borderRadius": 4,
                "fontFamily": monospace,
            },
        )
        .with(
            "code_block",
            style! {
                "borderWidth": 1,
                "borderColor": "#CCCCCC",
                "backgroundColor": "#f5f5f5",
                "padding": 10,
                "borderRadius": 4,
                "fontFamily": monospace,
            },
        )
        .with(
            "fence",
            style! {
                "borderWidth": 1,
                "borderColor": "#CCCCCC",
                "backgroundColor": "#f5f5f5",
                "padding": 10,
                "borderRadius": 4,
                "fontFamily": monospace,
            },
        )
        // Tables
        .with(
            "table",
            style! { "borderWidth": 1, "borderColor": "#000000", "borderRadius": 3 },
        )
        .with("thead", style! {})
        .with("tbody", style! {})
        .with("th", style! { "flex": 1, "padding": 5 })
        .with(
            "tr",
            style! { "borderBottomWidth": 1, "borderColor": "#000000", "flexDirection": "row" },
        )
        .with("td", style! { "flex": 1, "padding": 5 })
        // Links
        .with("link", style! { "textDecorationLine": "underline" })
        .with(
            "blocklink",
            style! { "flex": 1, "borderColor": "#000000", "borderBottomWidth": 1 },
        )
        // Images
        .with("image", style! { "flex": 1 })
        // Text output
        .with("text", style! {})
        .with("textgroup", style! {})
        .with(
            "paragraph",
            style! {
                "marginTop": 10,
                "marginBottom": 10,
                "flexWrap": "wrap",
                "flexDirection": "row",
                "alignItems": "flex-start",
                "justifyContent": "flex-start",
                "width": "100%",
            },
        )
        .with("hardbreak", style! { "width": "100%", "height": 1 })
        .with("softbreak", style! {})
        // Rarely produced, kept for completeness
        .with("pre", style! {})
        .with("inline", style! {})
        .with("span", style! {})
}
