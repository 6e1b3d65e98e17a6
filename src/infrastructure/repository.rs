//! File system repository

use crate::domain::NoteFormat;
use crate::error::{Result, TextnoteError};
use crate::infrastructure::config::{Config, CONFIG_DIR};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the notes root
pub const ROOT_ENV: &str = "TEXTNOTE_ROOT";

/// Byte-level storage used to load and persist note files
pub trait NoteStore {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> io::Result<String>;

    /// Create or overwrite `path` with `contents`
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Represents a note file with its date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub filename: String,
    pub date: NaiveDate,
}

impl NoteEntry {
    pub fn new(filename: String, date: NaiveDate) -> Self {
        NoteEntry { filename, date }
    }
}

/// Notes directory on disk
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the notes root: TEXTNOTE_ROOT if set, otherwise the nearest
    /// ancestor of the current directory holding a .textnote directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(TextnoteError::Config(format!(
                "{} is set to '{}' but no {} directory found. \
                Run 'textnote init' in that directory or unset {}.",
                ROOT_ENV,
                path.display(),
                CONFIG_DIR,
                ROOT_ENV
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory with .textnote is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_config_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| TextnoteError::NotNotesDirectory(start.to_path_buf()))
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    /// Create the .textnote directory; fails if it already exists
    pub fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(TextnoteError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&config_dir)?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Note files in the root, newest first, optionally bounded by date and count
    pub fn list_notes(
        &self,
        format: &NoteFormat,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<NoteEntry>> {
        let mut notes = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if let Some(date) = format.date_from_file_name(&name) {
                notes.push(NoteEntry::new(name, date));
            }
        }

        notes.retain(|e| from.map_or(true, |d| e.date >= d) && to.map_or(true, |d| e.date <= d));
        notes.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.filename.cmp(&b.filename)));

        if let Some(n) = limit {
            notes.truncate(n);
        }

        Ok(notes)
    }
}

impl NoteStore for FileSystemRepository {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Write to a temp file next to `path`, then rename into place
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.textnote-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("note"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;

        // rename does not replace an existing file on Windows
        #[cfg(windows)]
        {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }

        fs::rename(&tmp_path, path)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
