//! Input configuration entities.
//!
//! An [`InputConfiguration`] is the unit the host persists (one JSON file per
//! configuration), serves over the API, and executes actions from. Field
//! names are camelCase on the wire to match the browser-facing protocol.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default)]` tolerate older or hand-edited
//! files that omit them, so a configuration written by a previous version
//! still loads.

use serde::{Deserialize, Serialize};

/// One step inside an [`InputAction`]: a key (or button) identifier plus an
/// optional hold duration. The identifier is opaque to the core; the input
/// simulator capability interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    /// Key or button identifier, e.g. `"VK_RETURN"` or `"mouse:left"`.
    pub key: String,
    /// How long the key is held down, in milliseconds. Zero means tap.
    #[serde(default)]
    pub hold_ms: u64,
}

/// A named, ordered sequence of input steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAction {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ActionEntry>,
}

/// A named, persisted bundle of automatable actions plus optional UI-view
/// metadata.
///
/// Identity is `name`, compared case-sensitively. `file_name` records where
/// the record was loaded from; it is stamped by the load pipeline and is not
/// part of the user-editable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputConfiguration {
    pub name: String,
    /// Ordered actions this configuration exposes.
    #[serde(default)]
    pub actions: Vec<InputAction>,
    /// Whether a companion UI view/media bundle exists for this configuration.
    #[serde(default)]
    pub has_view: bool,
    /// Backing file the record was loaded from, set at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl InputConfiguration {
    /// Creates an empty configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            has_view: false,
            file_name: None,
        }
    }

    /// Returns the action with the given name, if present.
    pub fn find_action(&self, name: &str) -> Option<&InputAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_configuration() {
        let cfg = InputConfiguration::new("demo");
        assert_eq!(cfg.name, "demo");
        assert!(cfg.actions.is_empty());
        assert!(!cfg.has_view);
        assert!(cfg.file_name.is_none());
    }

    #[test]
    fn test_find_action_matches_exact_name() {
        // Arrange
        let mut cfg = InputConfiguration::new("demo");
        cfg.actions.push(InputAction {
            name: "open-menu".to_string(),
            entries: vec![ActionEntry {
                key: "VK_F10".to_string(),
                hold_ms: 0,
            }],
        });

        // Act / Assert — lookup is case-sensitive
        assert!(cfg.find_action("open-menu").is_some());
        assert!(cfg.find_action("Open-Menu").is_none());
    }

    #[test]
    fn test_deserializes_minimal_json_with_defaults() {
        // A file containing only a name must still load.
        let json = r#"{"name":"bare"}"#;
        let cfg: InputConfiguration = serde_json::from_str(json).expect("deserialize");
        assert_eq!(cfg.name, "bare");
        assert!(cfg.actions.is_empty());
        assert!(!cfg.has_view);
    }

    #[test]
    fn test_serializes_camel_case_and_omits_unset_file_name() {
        // Arrange
        let mut cfg = InputConfiguration::new("demo");
        cfg.has_view = true;

        // Act
        let json = serde_json::to_string(&cfg).expect("serialize");

        // Assert
        assert!(json.contains("\"hasView\":true"));
        assert!(!json.contains("fileName"), "unset fileName must be omitted");
    }

    #[test]
    fn test_round_trips_through_json() {
        // Arrange
        let mut cfg = InputConfiguration::new("demo");
        cfg.file_name = Some("demo.json".to_string());
        cfg.actions.push(InputAction {
            name: "greet".to_string(),
            entries: vec![
                ActionEntry {
                    key: "h".to_string(),
                    hold_ms: 0,
                },
                ActionEntry {
                    key: "i".to_string(),
                    hold_ms: 50,
                },
            ],
        });

        // Act
        let json = serde_json::to_string(&cfg).expect("serialize");
        let restored: InputConfiguration = serde_json::from_str(&json).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
        assert_eq!(restored.actions[0].entries.len(), 2);
    }
}
