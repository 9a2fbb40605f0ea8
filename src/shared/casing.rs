//! Key-casing normalizer for remote payloads.
//!
//! The script endpoint answers with spreadsheet column names (`Title`,
//! `MapLink`, `ID`); the API speaks camelCase. Normalization lower-cases the
//! first character of every object key, depth-first, with `ID` in any casing
//! becoming `id`.

use serde_json::{Map, Value};

pub fn normalize_key(key: &str) -> String {
    if key.to_uppercase() == "ID" {
        return "id".to_string();
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the payload with every object key normalized. Non-container values
/// are returned unchanged.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .into_iter()
                .map(|(key, value)| (normalize_key(&key), normalize_keys(value)))
                .collect();
            Value::Object(normalized)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_special_case() {
        assert_eq!(normalize_key("ID"), "id");
        assert_eq!(normalize_key("Id"), "id");
        assert_eq!(normalize_key("iD"), "id");
        assert_eq!(normalize_key("id"), "id");
    }

    #[test]
    fn test_first_letter_lowercased() {
        assert_eq!(normalize_key("Title"), "title");
        assert_eq!(normalize_key("MapLink"), "mapLink");
        assert_eq!(normalize_key("ResolvedDate"), "resolvedDate");
        assert_eq!(normalize_key("already"), "already");
        assert_eq!(normalize_key("IDs"), "iDs");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_nested_payload() {
        let payload = json!([
            {
                "ID": "7",
                "Title": "Plumber",
                "Meta": { "CreatedBy": "Admin", "Tags": [{ "Name": "urgent" }] }
            },
            "Loose String",
            42
        ]);

        let normalized = normalize_keys(payload);

        assert_eq!(
            normalized,
            json!([
                {
                    "id": "7",
                    "title": "Plumber",
                    "meta": { "createdBy": "Admin", "tags": [{ "name": "urgent" }] }
                },
                "Loose String",
                42
            ])
        );
    }

    #[test]
    fn test_values_untouched() {
        assert_eq!(normalize_keys(json!("Title")), json!("Title"));
        assert_eq!(normalize_keys(json!(null)), json!(null));
        assert_eq!(
            normalize_keys(json!({ "Status": "Mart is Open" })),
            json!({ "status": "Mart is Open" })
        );
    }
}
