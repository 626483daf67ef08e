use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{JournalError, Result, DEFAULT_KEY_PREFIX};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the key-value files
    pub data_dir: PathBuf,

    /// Prefix shared by every journal key
    pub key_prefix: String,

    /// Editor used by `write --edit`; falls back to $EDITOR
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("", "", "mindful")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".mindful"));

        Config {
            data_dir,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            editor_command: None,
        }
    }
}

impl Config {
    /// Where the configuration file lives when no path is given.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mindful").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the configuration at `path`, or the defaults if the file does
    /// not exist. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            JournalError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| JournalError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Applies one `key=value` setting.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| JournalError::ConfigError {
                message: format!("expected key=value, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "key_prefix" => self.key_prefix = value.to_string(),
            "editor_command" => {
                self.editor_command = (!value.is_empty()).then(|| value.to_string())
            }
            other => {
                return Err(JournalError::ConfigError {
                    message: format!("unknown setting '{}'", other),
                })
            }
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.key_prefix.is_empty() {
            return Err(JournalError::ConfigError {
                message: "key_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    // Smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
