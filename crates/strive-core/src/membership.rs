//! Normalization of loosely shaped member lists
//!
//! Team member lists and workout exercise lists arrive from clients (and
//! from older exports) in several shapes: a real JSON array, a string
//! containing an encoded array, or a bare string. Everything written to
//! storage goes through [`normalize_list`] so the stored form is always a
//! plain list of strings.

use serde_json::Value;

/// Normalize a raw payload value into a canonical list of strings.
///
/// Total over all inputs:
/// - an array yields its elements in order
/// - a string is decoded as JSON; if that produces an array, its elements
///   are used, otherwise the original string becomes the only element
/// - a string that fails to decode becomes the only element
/// - any other shape (null, number, bool, object) yields an empty list
pub fn normalize_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items.iter().map(element_text).collect(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items.iter().map(element_text).collect(),
            Ok(_) | Err(_) => vec![s.clone()],
        },
        _ => Vec::new(),
    }
}

/// Render one array element as a member name.
///
/// Strings are taken as-is; anything else keeps its JSON text so no
/// element is silently dropped.
fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_passes_through() {
        let raw = json!(["a", "b"]);
        assert_eq!(normalize_list(&raw), vec!["a", "b"]);
    }

    #[test]
    fn test_encoded_array_is_decoded() {
        let raw = json!("[\"a\", \"b\"]");
        assert_eq!(normalize_list(&raw), vec!["a", "b"]);
    }

    #[test]
    fn test_plain_string_becomes_single_element() {
        let raw = json!("not-a-list");
        assert_eq!(normalize_list(&raw), vec!["not-a-list"]);
    }

    #[test]
    fn test_string_decoding_to_non_array_is_kept_whole() {
        // "42" decodes as a number, so the original text is the element
        let raw = json!("42");
        assert_eq!(normalize_list(&raw), vec!["42"]);
    }

    #[test]
    fn test_non_list_shapes_yield_empty() {
        assert_eq!(normalize_list(&Value::Null), Vec::<String>::new());
        assert_eq!(normalize_list(&json!(7)), Vec::<String>::new());
        assert_eq!(normalize_list(&json!(true)), Vec::<String>::new());
        assert_eq!(normalize_list(&json!({"a": 1})), Vec::<String>::new());
    }

    #[test]
    fn test_non_string_elements_keep_their_text() {
        let raw = json!(["mara", 7, true]);
        assert_eq!(normalize_list(&raw), vec!["mara", "7", "true"]);
    }

    #[test]
    fn test_nested_arrays_are_rendered_not_flattened() {
        let raw = json!("[\"a\", [\"b\"]]");
        assert_eq!(normalize_list(&raw), vec!["a", "[\"b\"]"]);
    }

    #[test]
    fn test_empty_shapes() {
        assert_eq!(normalize_list(&json!([])), Vec::<String>::new());
        assert_eq!(normalize_list(&json!("[]")), Vec::<String>::new());
    }
}
