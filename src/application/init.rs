//! Initialize notes directory use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository};
use std::fs;
use std::path::Path;

/// Initialize a new notes directory at the specified path.
/// An empty `sections` list keeps the default sections.
pub fn init(path: &Path, sections: Vec<String>) -> Result<Config> {
    let config = Config::new(sections);
    config.validate()?;

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&config)?;

    println!("Initialized textnote directory at {}", path.display());
    println!("Sections: {}", config.sections.join(", "));

    Ok(config)
}
