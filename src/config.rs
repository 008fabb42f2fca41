/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::links::LinkRegistry;

/// Configuration for taab.
///
/// Persisted as JSON; key names follow the persisted-store convention
/// (`defaultCommand`, `bgColor`, `gistID`, ...) so an exported blob from any
/// taab install, or a gist written by hand, loads unchanged. Keys this
/// version doesn't recognize are kept in `extras` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaabConfig {
    /// Character splitting an input line into command and argument tokens.
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Command invoked when the input matches no builtin, shortcut, or URL.
    #[serde(default = "default_command")]
    pub default_command: String,

    /// Open every navigation in a new tab, regardless of the per-input flag.
    #[serde(default)]
    pub always_new_tab: bool,

    /// Page colors and font sizes: pass-through values for the UI.
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default = "default_clock_size")]
    pub clock_size: String,

    #[serde(default = "default_true")]
    pub show_clock: bool,
    #[serde(default)]
    pub military_clock: bool,

    /// User-defined shortcuts, in insertion order.
    #[serde(default)]
    pub links: LinkRegistry,

    /// Last imported/exported gist, if any.
    #[serde(rename = "gistID", default, skip_serializing_if = "Option::is_none")]
    pub gist_id: Option<String>,

    #[serde(default = "default_msg_color")]
    pub default_msg_color: String,
    #[serde(default = "default_error_msg_color")]
    pub error_msg_color: String,

    /// Custom command aliases resolving to builtin commands.
    /// Example: "searx" = "g"
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub aliases: HashMap<String, String>,

    /// Unrecognized keys, preserved across load/save round trips.
    #[serde(flatten)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

impl Default for TaabConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            default_command: default_command(),
            always_new_tab: false,
            bg_color: default_bg_color(),
            text_color: default_text_color(),
            font_size: default_font_size(),
            clock_size: default_clock_size(),
            show_clock: true,
            military_clock: false,
            links: LinkRegistry::default(),
            gist_id: None,
            default_msg_color: default_msg_color(),
            error_msg_color: default_error_msg_color(),
            aliases: HashMap::new(),
            extras: serde_json::Map::new(),
        }
    }
}

fn default_separator() -> char {
    ';'
}

fn default_command() -> String {
    "g".to_string()
}

fn default_bg_color() -> String {
    "#000000".to_string()
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_font_size() -> String {
    "18px".to_string()
}

fn default_clock_size() -> String {
    "48px".to_string()
}

fn default_true() -> bool {
    true
}

fn default_msg_color() -> String {
    "#ffffff".to_string()
}

fn default_error_msg_color() -> String {
    "#cc6666".to_string()
}

impl TaabConfig {
    /// Get the XDG config directory path for taab
    /// Returns: $XDG_CONFIG_HOME/taab (defaults to ~/.config/taab)
    pub fn get_config_dir() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(crate::APP_PREFIX).get_config_home()
    }

    /// Get the full path to the config file
    /// Returns: $XDG_CONFIG_HOME/taab/config.json
    pub fn get_config_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load configuration from the config file.
    /// If the file doesn't exist, creates it with default configuration.
    /// If the file exists but is invalid, returns an error.
    pub fn load() -> Result<Self, String> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(Self::default());
        };

        if !config_path.exists() {
            let default_config = Self::default();
            if let Err(e) = default_config.save() {
                eprintln!("Warning: failed to write default config file: {}", e);
                eprintln!("Continuing with default configuration...");
            }
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file {:?}: {}", config_path, e))?;

        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {:?}: {}", config_path, e))
    }

    /// Write configuration back to the config file.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::get_config_path() else {
            return Err("Could not determine config file location".to_string());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let contents = self
            .to_json()
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Serialize to the persisted JSON form (pretty-printed, stable keys).
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /// Shallow-merge a JSON config fragment into this configuration.
    ///
    /// Recognized keys replace their current values wholesale (arrays
    /// included); unrecognized keys land in `extras`. On any parse or type
    /// error the configuration is left untouched.
    pub fn merge_fragment(&mut self, fragment: &str) -> Result<(), String> {
        let patch: serde_json::Value = serde_json::from_str(fragment)
            .map_err(|e| format!("Error parsing config: {}", e))?;

        let Some(patch_obj) = patch.as_object() else {
            return Err("Error parsing config: expected a JSON object".to_string());
        };

        let mut current = serde_json::to_value(&*self)
            .map_err(|e| format!("Error serializing config: {}", e))?;
        let Some(current_obj) = current.as_object_mut() else {
            return Err("Error serializing config: expected a JSON object".to_string());
        };

        for (key, value) in patch_obj {
            current_obj.insert(key.clone(), value.clone());
        }

        let merged: TaabConfig = serde_json::from_value(current)
            .map_err(|e| format!("Error parsing config: {}", e))?;

        *self = merged;
        Ok(())
    }

    /// Resolve a user-defined alias to its target command, if one is set.
    pub fn resolve_alias(&self, command: &str) -> Option<&str> {
        self.aliases.get(command).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Link;

    #[test]
    fn default_config() {
        let config = TaabConfig::default();
        assert_eq!(config.separator, ';');
        assert_eq!(config.default_command, "g");
        assert!(!config.always_new_tab);
        assert!(config.show_clock);
        assert!(!config.military_clock);
        assert!(config.links.is_empty());
        assert_eq!(config.gist_id, None);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn persisted_keys_are_canonical() {
        let mut config = TaabConfig::default();
        config.gist_id = Some("d8fff6368b4f6b45b0b0cbc46f0a846b".to_string());
        let json = config.to_json().unwrap();
        assert!(json.contains("\"defaultCommand\""));
        assert!(json.contains("\"alwaysNewTab\""));
        assert!(json.contains("\"bgColor\""));
        assert!(json.contains("\"militaryClock\""));
        assert!(json.contains("\"gistID\""));
    }

    #[test]
    fn parses_a_full_blob() {
        let blob = r##"{
            "separator": ",",
            "defaultCommand": "dg",
            "alwaysNewTab": true,
            "bgColor": "#282828",
            "links": [{"command": "hb", "url": "https://hub.example.com", "search": "/q/"}]
        }"##;

        let config: TaabConfig = serde_json::from_str(blob).unwrap();
        assert_eq!(config.separator, ',');
        assert_eq!(config.default_command, "dg");
        assert!(config.always_new_tab);
        assert_eq!(config.bg_color, "#282828");
        assert_eq!(config.links.find("hb").unwrap().search, "/q/");
        // Missing keys fall back to defaults.
        assert_eq!(config.font_size, "18px");
    }

    #[test]
    fn merge_fragment_overwrites_shallowly() {
        let mut config = TaabConfig::default();
        config.links.upsert(Link::new("old", "http://old.example.com", ""));

        config
            .merge_fragment(
                r##"{"bgColor": "#111111", "links": [{"command": "new", "url": "http://new.example.com", "search": ""}]}"##,
            )
            .unwrap();

        assert_eq!(config.bg_color, "#111111");
        // Arrays are replaced wholesale, not merged element-wise.
        assert!(config.links.find("old").is_none());
        assert!(config.links.find("new").is_some());
        // Untouched keys keep their values.
        assert_eq!(config.default_command, "g");
    }

    #[test]
    fn merge_fragment_keeps_unrecognized_keys() {
        let mut config = TaabConfig::default();
        config.merge_fragment(r#"{"futureSetting": [1, 2, 3]}"#).unwrap();
        assert_eq!(
            config.extras.get("futureSetting"),
            Some(&serde_json::json!([1, 2, 3]))
        );

        // And they survive a serialize round trip.
        let json = config.to_json().unwrap();
        let reloaded: TaabConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.extras.get("futureSetting"), config.extras.get("futureSetting"));
    }

    #[test]
    fn merge_fragment_rejects_malformed_input_untouched() {
        let mut config = TaabConfig::default();
        let before = config.clone();

        assert!(config.merge_fragment("{not json").is_err());
        assert_eq!(config, before);

        assert!(config.merge_fragment("[1, 2]").is_err());
        assert_eq!(config, before);

        // Type error on a recognized key also leaves the config untouched.
        assert!(config.merge_fragment(r#"{"separator": "too long"}"#).is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn merge_fragment_is_idempotent() {
        let fragment = r##"{"defaultCommand": "r", "bgColor": "#222222", "links": []}"##;

        let mut config = TaabConfig::default();
        config.merge_fragment(fragment).unwrap();
        let after_once = config.clone();
        config.merge_fragment(fragment).unwrap();
        assert_eq!(config, after_once);
    }

    #[test]
    fn resolve_alias() {
        let mut config = TaabConfig::default();
        config.aliases.insert("searx".to_string(), "g".to_string());
        assert_eq!(config.resolve_alias("searx"), Some("g"));
        assert_eq!(config.resolve_alias("g"), None);
    }
}
