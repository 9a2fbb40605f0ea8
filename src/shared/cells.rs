//! Serde adapters for spreadsheet cells, which arrive loosely typed: ids may
//! be numbers, flags may be `"TRUE"`, empty cells may be `""` or null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any scalar as text; null reads as empty.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// `true`, `"TRUE"`, `"yes"`, `1` and friends read as true; anything else false.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    })
}

/// Non-negative counter; blanks and garbage read as zero.
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_text")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_flag")]
        noted: bool,
        #[serde(default, deserialize_with = "deserialize_count")]
        likes: u64,
    }

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_loose_cells() {
        let r = row(json!({ "id": 17, "noted": "TRUE", "likes": "4" }));
        assert_eq!(r.id, "17");
        assert!(r.noted);
        assert_eq!(r.likes, 4);

        let r = row(json!({ "id": null, "noted": "", "likes": "" }));
        assert_eq!(r.id, "");
        assert!(!r.noted);
        assert_eq!(r.likes, 0);
    }

    #[test]
    fn test_missing_cells_default() {
        let r = row(json!({}));
        assert_eq!(r.id, "");
        assert!(!r.noted);
        assert_eq!(r.likes, 0);
    }
}
