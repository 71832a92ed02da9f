//! Spotlight configuration: debounce interval and keyboard chords.
//!
//! Loaded from a JSON file; any missing field falls back to its default
//! and a missing or corrupt file falls back to `SpotlightConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default delay between the last keystroke and a search re-run.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Window-management chords. Each binding is a `modifier+key` string,
/// e.g. `"cmd+e"`. The modifier is mandatory so chords never collide
/// with normal text entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChordBindings {
    #[serde(default = "default_edit_chord", rename = "editPrompt")]
    pub edit_prompt: String,
    #[serde(default = "default_new_chord", rename = "newPrompt")]
    pub new_prompt: String,
    #[serde(default = "default_settings_chord", rename = "openSettings")]
    pub open_settings: String,
}

fn default_edit_chord() -> String {
    "cmd+e".to_string()
}
fn default_new_chord() -> String {
    "cmd+n".to_string()
}
fn default_settings_chord() -> String {
    "cmd+,".to_string()
}

impl Default for ChordBindings {
    fn default() -> Self {
        ChordBindings {
            edit_prompt: default_edit_chord(),
            new_prompt: default_new_chord(),
            open_settings: default_settings_chord(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotlightConfig {
    /// Delay applied to the query before re-running the search (ms)
    #[serde(default = "default_debounce_ms", rename = "debounceMs")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub chords: ChordBindings,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        SpotlightConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            chords: ChordBindings::default(),
        }
    }
}

/// Load configuration from a JSON file.
///
/// Returns `SpotlightConfig::default()` if the file is missing or invalid.
pub fn load_config(path: &Path) -> SpotlightConfig {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return SpotlightConfig::default();
    }

    match std::fs::read_to_string(path) {
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to read config, using defaults");
            SpotlightConfig::default()
        }
        Ok(contents) => match serde_json::from_str::<SpotlightConfig>(&contents) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded spotlight config");
                config
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Invalid config JSON, using defaults");
                SpotlightConfig::default()
            }
        },
    }
}
