// Inline CSS (`style="..."` attributes) → style objects.

use std::sync::LazyLock;

use regex::Regex;

use super::{Style, StyleValue};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))(?:px)?$").expect("valid number regex"));

/// Shorthands expanded into their four sides.
const BOX_SHORTHANDS: [&str; 2] = ["margin", "padding"];

/// Convert a CSS declaration string (`"color: red; font-size: 12px"`) into
/// a style object with camelCase property names.
///
/// Declarations without a name or a value are skipped. Pixel and unitless
/// numbers become numbers; everything else is kept as text.
pub fn convert_additional_styles(css: &str) -> Style {
    let mut style = Style::new();

    for rule in css.split(';') {
        let Some((name, value)) = rule.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }

        let property = camel_case(name);
        if BOX_SHORTHANDS.contains(&property.as_str()) {
            if let Some(sides) = expand_sides(value) {
                for (side, value) in ["Top", "Right", "Bottom", "Left"].iter().zip(sides) {
                    style.insert(format!("{property}{side}"), value);
                }
                continue;
            }
        }

        style.insert(property.clone(), convert_value(&property, value));
    }

    style
}

fn camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.trim_start_matches('-').chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            result.extend(ch.to_uppercase());
            upper = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

fn convert_value(property: &str, value: &str) -> StyleValue {
    // Font weights are strings ("bold", "700") in native toolkits.
    if property == "fontWeight" {
        return StyleValue::Text(value.to_string());
    }
    parse_number(value)
        .map(StyleValue::Number)
        .unwrap_or_else(|| StyleValue::Text(value.to_string()))
}

fn parse_number(value: &str) -> Option<f64> {
    let captures = NUMBER.captures(value)?;
    captures.get(1)?.as_str().parse().ok()
}

/// CSS box shorthand: 1–4 numeric values → top, right, bottom, left.
fn expand_sides(value: &str) -> Option<[f64; 4]> {
    let parts = value
        .split_whitespace()
        .map(parse_number)
        .collect::<Option<Vec<f64>>>()?;
    match parts.as_slice() {
        [all] => Some([*all; 4]),
        [vertical, horizontal] => Some([*vertical, *horizontal, *vertical, *horizontal]),
        [top, horizontal, bottom] => Some([*top, *horizontal, *bottom, *horizontal]),
        [top, right, bottom, left] => Some([*top, *right, *bottom, *left]),
        _ => None,
    }
}
