//! Config management use case

use crate::error::{Result, TextnoteError};
use crate::infrastructure::{Config, FileSystemRepository};

const KEYS: &str = "editor, sections, extension, file_date_format, header_date_format";

/// Service for managing notes directory configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "editor" => Ok(config.editor),
            "sections" => Ok(config.sections.join(",")),
            "extension" => Ok(config.format.extension),
            "file_date_format" => Ok(config.format.file_date_format),
            "header_date_format" => Ok(config.format.header_date_format),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value. Sections are given comma-separated.
    ///
    /// Changing sections or file naming does not rewrite existing notes, so
    /// notes written under the old settings may no longer load.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "editor" => config.editor = value.to_string(),
            "sections" => {
                config.sections = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if config.sections.is_empty() {
                    return Err(TextnoteError::Config(
                        "At least one section is required".to_string(),
                    ));
                }
            }
            "extension" => config.format.extension = value.trim_start_matches('.').to_string(),
            "file_date_format" => config.format.file_date_format = value.to_string(),
            "header_date_format" => config.format.header_date_format = value.to_string(),
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        tracing::info!("Set {} = {}", key, value);
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> TextnoteError {
    TextnoteError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, KEYS
    ))
}
