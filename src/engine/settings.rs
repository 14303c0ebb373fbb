use crate::error::{PatternLockError, Result};
use crate::model::AspectRatio;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "PATTERNLOCK_CONFIG";

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineSettings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_dot_count")]
    pub dot_count: usize,

    /// Centred fraction of each cell that accepts touches.
    #[serde(default = "default_hit_factor")]
    pub hit_factor: f32,

    #[serde(default = "default_path_width")]
    pub path_width: f32,

    #[serde(default = "default_dot_normal_size")]
    pub dot_normal_size: f32,

    #[serde(default = "default_dot_selected_size")]
    pub dot_selected_size: f32,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_dot_animation_duration")]
    pub dot_animation_duration: Duration,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_path_end_animation_duration")]
    pub path_end_animation_duration: Duration,

    #[serde(default)]
    pub aspect_ratio_enabled: bool,

    #[serde(default)]
    pub aspect_ratio: AspectRatio,

    #[serde(default = "default_true")]
    pub input_enabled: bool,

    #[serde(default)]
    pub stealth_mode: bool,

    #[serde(default = "default_true")]
    pub tactile_feedback_enabled: bool,

    /// Pointer travel below which a move does not request a redraw.
    #[serde(default)]
    pub drag_threshold: f32,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_dot_count() -> usize {
    3
}
fn default_hit_factor() -> f32 {
    0.6
}
fn default_path_width() -> f32 {
    3.0
}
fn default_dot_normal_size() -> f32 {
    10.0
}
fn default_dot_selected_size() -> f32 {
    24.0
}
fn default_dot_animation_duration() -> Duration {
    Duration::from_millis(190)
}
fn default_path_end_animation_duration() -> Duration {
    Duration::from_millis(100)
}
fn default_true() -> bool {
    true
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            version: default_version(),
            dot_count: default_dot_count(),
            hit_factor: default_hit_factor(),
            path_width: default_path_width(),
            dot_normal_size: default_dot_normal_size(),
            dot_selected_size: default_dot_selected_size(),
            dot_animation_duration: default_dot_animation_duration(),
            path_end_animation_duration: default_path_end_animation_duration(),
            aspect_ratio_enabled: false,
            aspect_ratio: AspectRatio::default(),
            input_enabled: true,
            stealth_mode: false,
            tactile_feedback_enabled: true,
            drag_threshold: 0.0,
        }
    }
}

impl EngineSettings {
    pub fn with_dot_count(dot_count: usize) -> Self {
        Self {
            dot_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dot_count < 1 {
            return Err(PatternLockError::InvalidGridSize(self.dot_count));
        }
        if !(self.hit_factor > 0.0 && self.hit_factor <= 1.0) {
            return Err(PatternLockError::InvalidHitFactor(self.hit_factor));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut settings = serde_json::from_str::<EngineSettings>(&contents)?;
        settings.migrate();
        settings.validate()?;
        trace!(target: "settings", "Loaded settings from {:?}: {:?}", path, settings);
        Ok(settings)
    }

    /// Falls back to defaults when the file is missing or unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(target: "settings", "Using default settings; {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn from_env() -> Self {
        match Self::path_from_env() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    pub fn path_from_env() -> Option<PathBuf> {
        std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn migrate(&mut self) {
        match self.version {
            // version 1 files used the narrower 0.4 touch band
            0 | 1 => {
                if self.hit_factor == 0.4 {
                    self.hit_factor = default_hit_factor();
                }
                self.version = 2;
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("patternlock-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{"version": 2}"#).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.dot_animation_duration, Duration::from_millis(190));
    }

    #[test]
    fn test_durations_are_milliseconds() {
        let settings: EngineSettings = serde_json::from_str(
            r#"{"dot_count": 4, "dot_animation_duration": 250, "stealth_mode": true}"#,
        )
        .unwrap();
        assert_eq!(settings.dot_count, 4);
        assert_eq!(settings.dot_animation_duration, Duration::from_millis(250));
        assert!(settings.stealth_mode);

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["path_end_animation_duration"], 100);
    }

    #[test]
    fn test_validate() {
        assert!(EngineSettings::default().validate().is_ok());
        assert!(matches!(
            EngineSettings::with_dot_count(0).validate(),
            Err(PatternLockError::InvalidGridSize(0))
        ));
        let settings = EngineSettings {
            hit_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PatternLockError::InvalidHitFactor(_))
        ));
    }

    #[test]
    fn test_migrate_old_hit_factor() {
        let mut settings: EngineSettings =
            serde_json::from_str(r#"{"version": 1, "hit_factor": 0.4}"#).unwrap();
        settings.migrate();
        assert_eq!(settings.hit_factor, 0.6);
        assert_eq!(settings.version, 2);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.json");
        let settings = EngineSettings {
            dot_count: 5,
            tactile_feedback_enabled: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(EngineSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"dot_count": 0}"#).unwrap();
        assert!(EngineSettings::load(&path).is_err());
        assert_eq!(
            EngineSettings::load_or_default(&path),
            EngineSettings::default()
        );
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let path = temp_path("env.json");
        EngineSettings::with_dot_count(4).save(&path).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, &path);
        assert_eq!(EngineSettings::from_env().dot_count, 4);

        std::env::remove_var(CONFIG_PATH_ENV);
        assert_eq!(EngineSettings::from_env().dot_count, 3);
    }
}
