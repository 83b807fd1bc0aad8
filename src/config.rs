//! Persisted presentation settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_geometry() -> String {
    "510x440".into()
}

fn default_width() -> u16 {
    100
}

fn default_newest_first() -> bool {
    true
}

/// Viewer layout settings, read once at startup and written once at shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default = "default_geometry")]
    pub window_geometry: String,
    #[serde(default = "default_width")]
    pub date_width: u16,
    #[serde(default = "default_width")]
    pub wordcount_width: u16,
    #[serde(default = "default_width")]
    pub wordcount_delta_width: u16,
    #[serde(default = "default_width")]
    pub totalcount_width: u16,
    #[serde(default = "default_width")]
    pub totalcount_delta_width: u16,
    #[serde(default = "default_newest_first")]
    pub newest_first: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_geometry: default_geometry(),
            date_width: default_width(),
            wordcount_width: default_width(),
            wordcount_delta_width: default_width(),
            totalcount_width: default_width(),
            totalcount_delta_width: default_width(),
            newest_first: default_newest_first(),
        }
    }
}

impl ViewerSettings {
    /// Load settings, falling back to defaults if the file is missing or
    /// unreadable. A broken settings file must not block startup.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("ignoring malformed settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, data)
    }
}

/// Default settings location: `$XDG_CONFIG_HOME/novel-progress-tui/progress.json`,
/// with a `~/.config` fallback and the current directory as a last resort.
pub fn default_config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("HOME").ok().map(|h| format!("{}/.config", h)))
        .unwrap_or_else(|| ".".to_string());
    PathBuf::from(config_dir)
        .join("novel-progress-tui")
        .join("progress.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_plugin() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.window_geometry, "510x440");
        assert_eq!(settings.date_width, 100);
        assert_eq!(settings.totalcount_delta_width, 100);
        assert!(settings.newest_first);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ViewerSettings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(ViewerSettings::load(&path), ViewerSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("progress.json");
        let settings = ViewerSettings {
            window_geometry: "120x40".into(),
            date_width: 14,
            ..ViewerSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(ViewerSettings::load(&path), settings);
    }

    #[test]
    fn partial_file_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"date_width": 12}"#).unwrap();
        let settings = ViewerSettings::load(&path);
        assert_eq!(settings.date_width, 12);
        assert_eq!(settings.wordcount_width, 100);
    }
}
