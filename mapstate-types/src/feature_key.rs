use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier of a map feature inside a layer. Backends use both string and numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureKey {
    /// Numeric feature id.
    Number(i64),
    /// String feature id.
    Text(String),
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKey::Number(v) => write!(f, "{v}"),
            FeatureKey::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FeatureKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeatureKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FeatureKey {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_both_id_kinds() {
        let keys: Vec<FeatureKey> = serde_json::from_str(r#"["p1", 42]"#).expect("valid json");
        assert_eq!(keys, vec![FeatureKey::from("p1"), FeatureKey::Number(42)]);
        assert_eq!(keys[1].to_string(), "42");
    }
}
