use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A declared property value on a resource node.
///
/// Values are either concrete (strings, numbers, booleans, lists, maps) or
/// deferred: `Token` stands for a placeholder that only resolves during
/// deployment, `Ref`/`GetAtt` encode references to another resource's
/// logical id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Str(String),
    Num(f64),
    Bool(bool),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
    Token(String),
    Ref { logical_id: String },
    GetAtt { logical_id: String, attribute: String },
}

impl PropertyValue {
    pub fn map(entries: impl IntoIterator<Item = (&'static str, PropertyValue)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    pub fn list(items: impl IntoIterator<Item = PropertyValue>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map-key lookup; `None` for non-map values and missing keys.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyValue;

    #[test]
    fn map_lookup_only_applies_to_maps() {
        let value = PropertyValue::map([("Enabled", PropertyValue::Bool(true))]);
        assert_eq!(value.get("Enabled"), Some(&PropertyValue::Bool(true)));
        assert_eq!(value.get("Missing"), None);
        assert_eq!(PropertyValue::Bool(true).get("Enabled"), None);
    }

    #[test]
    fn tokens_are_unresolved() {
        assert!(PropertyValue::Token("${Token[1]}".to_string()).is_unresolved());
        assert!(!PropertyValue::from("plain").is_unresolved());
    }
}
