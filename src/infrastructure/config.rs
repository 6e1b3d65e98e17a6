//! Configuration management

use crate::domain::NoteFormat;
use crate::error::{Result, TextnoteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Directory under the notes root holding textnote's own files
pub const CONFIG_DIR: &str = ".textnote";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub editor: String,
    /// Section names in file order
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    #[serde(default)]
    pub format: NoteFormat,
}

fn default_sections() -> Vec<String> {
    ["TODO", "DONE", "NOTES"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: Self::detect_default_editor(),
            sections: default_sections(),
            format: NoteFormat::default(),
        }
    }
}

impl Config {
    /// Create a config with the given sections, or the default ones when empty
    pub fn new(sections: Vec<String>) -> Self {
        let mut config = Config::default();
        if !sections.is_empty() {
            config.sections = sections;
        }
        config
    }

    /// Load config from .textnote/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TextnoteError::NotNotesDirectory(path.to_path_buf())
            } else {
                TextnoteError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            TextnoteError::Config(format!("Failed to parse config.toml: {}", e))
        })?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save config to .textnote/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let config_dir = path.join(CONFIG_DIR);

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Section names must be usable inside a marker line and unique
    pub fn validate(&self) -> Result<()> {
        self.format.validate()?;
        for (i, name) in self.sections.iter().enumerate() {
            if name.trim().is_empty() || name.contains('\n') {
                return Err(TextnoteError::Config(format!(
                    "Invalid section name: '{}'",
                    name
                )));
            }
            if self.sections[..i].contains(name) {
                return Err(TextnoteError::Config(format!(
                    "Duplicate section name: '{}'",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "vi".to_string()
                }
            })
    }
}
