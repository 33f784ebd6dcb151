//! Host-level preferences read by capture and apply.

use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};

/// User preferences owned by the host.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Comma-separated rig names captured when no rig is active in pose mode.
    pub armature_names: String,
    /// Reset bones missing from a pose to the identity transform when applying it.
    pub reset_unsaved_bones: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            armature_names: String::new(),
            reset_unsaved_bones: true,
        }
    }
}

impl Preferences {
    /// Parse preferences from JSON; absent keys keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| PoseError::format(format!("preferences: {e}")))
    }

    /// `armature_names` split on commas, trimmed, empties dropped.
    pub fn default_rig_names(&self) -> Vec<String> {
        self.armature_names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}
