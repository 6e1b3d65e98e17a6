//! Error types for textnote

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which template of a transfer an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSide {
    Source,
    Target,
}

impl fmt::Display for TemplateSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSide::Source => write!(f, "source"),
            TemplateSide::Target => write!(f, "target"),
        }
    }
}

/// Storage step that failed while opening or transferring notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    CreateTarget,
    ReadSource,
    ReadTarget,
    WriteSource,
    WriteTarget,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageOperation::CreateTarget => "create-target",
            StorageOperation::ReadSource => "read-source",
            StorageOperation::ReadTarget => "read-target",
            StorageOperation::WriteSource => "write-source",
            StorageOperation::WriteTarget => "write-target",
        };
        f.write_str(name)
    }
}

/// Main error type for textnote
#[derive(Debug, Error)]
pub enum TextnoteError {
    #[error("Section '{section}' not found in {side} template")]
    SectionNotFound { section: String, side: TemplateSide },

    /// `note` names the file the marker was found in
    #[error("Unknown section '{section}' in {note}")]
    UnknownSection { section: String, note: String },

    #[error("Malformed note: {0}")]
    MalformedDocument(String),

    #[error("Section '{0}' already exists in template")]
    DuplicateSection(String),

    #[error("{operation} failed for {}: {source}", .path.display())]
    Storage {
        operation: StorageOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a textnote directory: {0}")]
    NotNotesDirectory(PathBuf),

    #[error("Invalid time reference: {0}")]
    InvalidTimeReference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TextnoteError {
    /// Wrap an I/O failure with the storage step it happened in
    pub fn storage(
        operation: StorageOperation,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        TextnoteError::Storage {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TextnoteError::NotNotesDirectory(_) => 2,
            TextnoteError::InvalidTimeReference(_) => 3,
            TextnoteError::SectionNotFound { .. } | TextnoteError::UnknownSection { .. } => 4,
            TextnoteError::MalformedDocument(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TextnoteError::NotNotesDirectory(path) => {
                format!(
                    "Not a textnote directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'textnote init' in this directory to start taking notes\n\
                    • Navigate to an existing notes directory\n\
                    • Set TEXTNOTE_ROOT environment variable to your notes path",
                    path.display()
                )
            }
            TextnoteError::InvalidTimeReference(ref_str) => {
                format!(
                    "Invalid time reference: '{}'\n\n\
                    Valid time references:\n\
                    • today, yesterday, tomorrow\n\
                    • 3 days ago, in 2 days\n\
                    • monday, ..., sunday, last friday\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2020-12-20)",
                    ref_str
                )
            }
            TextnoteError::SectionNotFound { section, .. }
            | TextnoteError::UnknownSection { section, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Section names are case-sensitive: '{}'\n\
                    • Check configured sections: textnote config sections",
                    self, section
                )
            }
            TextnoteError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=vim)\n\
                    • Configure editor: textnote config editor 'vim'",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TextnoteError
pub type Result<T> = std::result::Result<T, TextnoteError>;
