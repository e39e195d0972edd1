//! Free-text label lists (`skin_type`, `benefits`) as storage hands them over.
//!
//! Depending on the column they come from, labels arrive as a native JSON list,
//! as a JSON list serialized into a text column, as a comma-separated string,
//! or not at all. `LabelSet` accepts every shape and `labels()` reduces it to a
//! plain list. Malformed input never fails; it degrades to an empty list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Raw label list in whichever shape storage produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum LabelSet {
    /// Native list.
    List(Vec<String>),
    /// Text column holding a serialized list (or a comma-separated string).
    Encoded(String),
    /// Null, absent, or an unusable value.
    #[default]
    Missing,
}

impl LabelSet {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(labels.into_iter().map(Into::into).collect())
    }

    /// Normalize a loosely-typed JSON value.
    ///
    /// Non-string list entries are skipped; objects, numbers and booleans are
    /// treated as missing.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => Self::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        JsonValue::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            JsonValue::String(s) => Self::Encoded(s),
            _ => Self::Missing,
        }
    }

    /// Parse-or-default-to-empty. Entries are trimmed; blank entries dropped.
    pub fn labels(&self) -> Vec<String> {
        let raw = match self {
            LabelSet::List(items) => items.clone(),
            LabelSet::Encoded(text) => decode_text(text),
            LabelSet::Missing => Vec::new(),
        };

        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<JsonValue>::deserialize(deserializer)?;
        Ok(value.map(LabelSet::from_json).unwrap_or_default())
    }
}

fn decode_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        // A bracketed value that doesn't parse is corrupt, not a CSV.
        return match serde_json::from_str::<JsonValue>(trimmed) {
            Ok(value) => match LabelSet::from_json(value) {
                LabelSet::List(items) => items,
                _ => Vec::new(),
            },
            Err(_) => Vec::new(),
        };
    }

    trimmed.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn native_list_is_trimmed() {
        let set = LabelSet::from_labels([" Seca ", "", "Grasa"]);
        assert_eq!(set.labels(), vec!["Seca", "Grasa"]);
    }

    #[test]
    fn serialized_list_in_text_column_is_decoded() {
        let set = LabelSet::Encoded(r#"["Mixta","Todo tipo de piel"]"#.to_string());
        assert_eq!(set.labels(), vec!["Mixta", "Todo tipo de piel"]);
    }

    #[test]
    fn comma_separated_text_is_split() {
        let set = LabelSet::Encoded("Seca, Sensible".to_string());
        assert_eq!(set.labels(), vec!["Seca", "Sensible"]);
    }

    #[test]
    fn corrupt_serialized_list_degrades_to_empty() {
        let set = LabelSet::Encoded("[\"Seca\", ".to_string());
        assert!(set.labels().is_empty());
    }

    #[test]
    fn deserializes_every_storage_shape() {
        let list: LabelSet = serde_json::from_str(r#"["Seca"]"#).unwrap();
        let text: LabelSet = serde_json::from_str(r#""[\"Seca\"]""#).unwrap();
        let null: LabelSet = serde_json::from_str("null").unwrap();
        let number: LabelSet = serde_json::from_str("42").unwrap();
        let mixed: LabelSet = serde_json::from_str(r#"["Seca", 3, null]"#).unwrap();

        assert_eq!(list.labels(), vec!["Seca"]);
        assert_eq!(text.labels(), vec!["Seca"]);
        assert!(null.labels().is_empty());
        assert!(number.labels().is_empty());
        assert_eq!(mixed.labels(), vec!["Seca"]);
    }

    proptest! {
        #[test]
        fn any_text_normalizes_without_blank_entries(text in ".{0,40}") {
            let labels = LabelSet::Encoded(text).labels();
            prop_assert!(labels.iter().all(|l| !l.is_empty() && l.trim() == l));
        }
    }
}
