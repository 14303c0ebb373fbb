use log::trace;
use std::fs;
use std::path::Path;

use super::PatternViewMode;
use crate::error::Result;

/// Saved state of a pattern engine, restorable after the host view is torn
/// down and rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatternLockSnapshot {
    pub serialized_pattern: String,
    pub display_mode: PatternViewMode,
    pub input_enabled: bool,
    pub in_stealth_mode: bool,
    pub tactile_feedback_enabled: bool,
}

impl PatternLockSnapshot {
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        trace!(target: "snapshot", "Saving snapshot to {:?}: {}", path, contents);
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
