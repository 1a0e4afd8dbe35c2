//! Runtime configuration
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! partial file is fine and a missing or broken one falls back entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, MAX_WAVES};
use crate::debug::DEFAULT_HISTORY;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "zombie_fighters.json";
/// Environment variable overriding the config file path
pub const CONFIG_ENV_VAR: &str = "ZOMBIE_FIGHTERS_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug ===
    /// Start with collision outlines and the debug panel visible
    pub debug_mode: bool,
    /// Debug messages kept on screen
    pub debug_history: usize,
    /// Append every debug message to this file
    pub debug_log_file: Option<PathBuf>,

    // === Content ===
    /// Root of the sprite directories (`player/`, `enemies/`, `background/`)
    pub asset_root: PathBuf,
    /// Directory with `level_<n>.json` overrides
    pub level_dir: Option<PathBuf>,
    /// Waves to clear for victory
    pub max_waves: u32,

    // === Loop ===
    pub target_fps: u32,
    /// Seed for session RNGs; random when absent
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub idle_mode: bool,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            debug_history: DEFAULT_HISTORY,
            debug_log_file: None,

            asset_root: PathBuf::from("assets"),
            level_dir: None,
            max_waves: MAX_WAVES,

            target_fps: FPS,
            seed: None,
            idle_mode: false,
            max_frames: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read settings from a file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config path from the environment, or the default file name
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Adjust for a run with no window attached: an uncapped run forces
    /// `idle_mode` on, a capped one keeps the configured value. Returns
    /// whether the override applied.
    pub fn prepare_headless(&mut self) -> bool {
        if self.idle_mode {
            return false;
        }
        if self.max_frames.is_some() {
            log::info!("idle_mode off: the player stands still until the frame cap");
            return false;
        }
        log::info!("No window backend and no frame cap, enabling idle mode");
        self.idle_mode = true;
        true
    }

    /// Frame budget in seconds
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(!s.debug_mode);
        assert_eq!(s.debug_history, 10);
        assert_eq!(s.max_waves, 10);
        assert_eq!(s.target_fps, 60);
        assert_eq!(s.asset_root, PathBuf::from("assets"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"debug_mode": true, "seed": 42}"#).unwrap();
        assert!(s.debug_mode);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.max_waves, MAX_WAVES);
    }

    #[test]
    fn test_roundtrip() {
        let s = Settings {
            idle_mode: true,
            max_frames: Some(600),
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = std::env::temp_dir().join(format!(
            "zombie_fighters_settings_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_default() {
        let s = Settings::load(Path::new("no/such/settings.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_headless_enables_idle_without_cap() {
        let mut s = Settings::default();
        assert!(s.prepare_headless());
        assert!(s.idle_mode);
    }

    #[test]
    fn test_headless_keeps_idle_setting_with_cap() {
        let mut s = Settings {
            max_frames: Some(300),
            ..Default::default()
        };
        assert!(!s.prepare_headless());
        assert!(!s.idle_mode);

        let mut s = Settings {
            idle_mode: true,
            ..Default::default()
        };
        assert!(!s.prepare_headless());
        assert!(s.idle_mode);
    }

    #[test]
    fn test_frame_time() {
        let s = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(s.frame_time(), 1.0);
    }
}
