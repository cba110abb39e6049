//! Product records → prompt text.

use serde_json::Value;

/// Rendered for a missing category or material ("not specified").
pub const NOT_SPECIFIED: &str = "غير محدد";

/// Renders the raw `products` value as one line per named product:
///
/// ```text
/// - {name} | {category} | {material} | {price}$
/// ```
///
/// Records without a non-blank `name` produce no line. A non-array value
/// yields an empty string.
pub fn products_text(products: &Value) -> String {
    let Some(items) = products.as_array() else {
        return String::new();
    };

    items
        .iter()
        .filter_map(product_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn product_line(record: &Value) -> Option<String> {
    let name = scalar_text(record.get("name")?)?;

    let category = record
        .get("category_name")
        .and_then(scalar_text)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let material = record
        .get("material")
        .and_then(scalar_text)
        .or_else(|| record.get("material_name").and_then(scalar_text))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let price = record
        .get("price_usd")
        .and_then(scalar_text)
        .map(|p| format!("{p}$"))
        .unwrap_or_default();

    Some(format!("- {name} | {category} | {material} | {price}"))
}

/// Textual form of a string or number field; blank strings and other JSON
/// types count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn only_named_products_produce_lines() {
        let products = json!([
            { "name": "Ring A", "category_name": "rings", "price_usd": 20 },
            { "name": "" },
            { "price_usd": 5 }
        ]);
        let text = products_text(&products);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("- Ring A | rings | "));
    }

    #[test]
    fn full_record_renders_every_field() {
        let products = json!([{
            "name": "Pearl Necklace",
            "category_name": "necklaces",
            "material": "silver 925",
            "price_usd": "35.5"
        }]);
        assert_eq!(
            products_text(&products),
            "- Pearl Necklace | necklaces | silver 925 | 35.5$"
        );
    }

    #[test]
    fn missing_optional_fields_render_placeholder() {
        let products = json!([{ "name": "Ring A", "price_usd": 20 }]);
        assert_eq!(
            products_text(&products),
            format!("- Ring A | {NOT_SPECIFIED} | {NOT_SPECIFIED} | 20$")
        );
    }

    #[test]
    fn material_name_is_used_when_material_is_absent() {
        let products = json!([{ "name": "Hoops", "material_name": "gold plated" }]);
        assert!(products_text(&products).contains("| gold plated |"));
    }

    #[test]
    fn missing_price_renders_empty() {
        let products = json!([{ "name": "Bracelet", "category_name": "bracelets" }]);
        let text = products_text(&products);
        assert!(text.ends_with(" | "), "unexpected line: {text}");
        assert!(!text.contains('$'));
    }

    #[test]
    fn whitespace_name_is_dropped() {
        let products = json!([{ "name": "   " }, { "name": "Set B" }]);
        let text = products_text(&products);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("- Set B |"));
    }

    #[test]
    fn lines_keep_source_order() {
        let products = json!([{ "name": "First" }, { "name": "Second" }]);
        let lines: Vec<_> = products_text(&products).lines().map(str::to_owned).collect();
        assert!(lines[0].starts_with("- First"));
        assert!(lines[1].starts_with("- Second"));
    }

    #[test]
    fn empty_array_is_empty_text() {
        assert_eq!(products_text(&json!([])), "");
    }

    #[test]
    fn non_array_payload_is_empty_text() {
        assert_eq!(products_text(&json!({ "name": "Ring A" })), "");
        assert_eq!(products_text(&json!("Ring A")), "");
        assert_eq!(products_text(&Value::Null), "");
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let products = json!([42, "Ring", null, { "name": "Ring A" }]);
        assert_eq!(products_text(&products).lines().count(), 1);
    }
}
