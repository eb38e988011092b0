// Text-only style properties.
//
// Inherited styles may only carry properties a text primitive understands;
// box properties (margins, borders, flex) stay on the node that declared them.

use super::Style;

/// Properties valid on text but not on generic boxes.
pub const TEXT_STYLE_ONLY_PROPS: [&str; 21] = [
    "color",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "letterSpacing",
    "lineHeight",
    "textAlign",
    "textDecorationLine",
    "textDecorationStyle",
    "textDecorationColor",
    "textShadowColor",
    "textShadowOffset",
    "textShadowRadius",
    "textTransform",
    "userSelect",
    "fontVariant",
    "writingDirection",
    "textAlignVertical",
    "verticalAlign",
    "includeFontPadding",
];

pub fn is_text_style_only_prop(property: &str) -> bool {
    TEXT_STYLE_ONLY_PROPS.contains(&property)
}

/// Keep only the text-only properties of `style`.
pub fn text_only_style(style: &Style) -> Style {
    let mut result = style.clone();
    result.retain(is_text_style_only_prop);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> Style {
        Style::new()
            .with("color", "red")
            .with("fontSize", 14)
            .with("marginTop", 10)
            .with("flexDirection", "row")
    }

    #[test]
    fn test_text_only_style() {
        let style = text_only_style(&mixed());
        let keys: Vec<&str> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["color", "fontSize"]);
    }
}
