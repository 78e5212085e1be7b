use serde::{Deserialize, Serialize};

/// Palette used for selections created without explicit colours.
pub const DEFAULT_DISTINCT_COLOURS: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// Configuration of the state engine.
///
/// ```
/// use mapstate::StateConfig;
///
/// let config: StateConfig =
///     serde_json::from_str(r##"{"distinctColours": ["#000000"]}"##).unwrap();
/// assert_eq!(config.distinct_colours, vec!["#000000"]);
/// assert!(config.distinct_items);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateConfig {
    /// Palette of newly created selections.
    pub distinct_colours: Vec<String>,
    /// Whether newly created selections give every feature its own palette slot.
    pub distinct_items: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            distinct_colours: DEFAULT_DISTINCT_COLOURS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            distinct_items: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config: StateConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config, StateConfig::default());
        assert_eq!(config.distinct_colours.len(), DEFAULT_DISTINCT_COLOURS.len());
    }
}
