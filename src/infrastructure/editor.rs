//! Editor integration for opening note files

use crate::error::{Result, TextnoteError};
use std::path::Path;
use std::process::Command;

/// Session for editing a note in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Open a file in the editor and wait until the editor exits
    pub fn open(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command()?;
        tracing::info!("Opening {} with {}", file_path.display(), program);

        let status = Command::new(&program)
            .args(&args)
            .arg(file_path)
            .status()
            .map_err(|e| {
                TextnoteError::Editor(format!("Failed to launch editor '{}': {}", program, e))
            })?;

        if !status.success() {
            return Err(TextnoteError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Split the command into program and arguments
    fn parse_command(&self) -> Result<(String, Vec<String>)> {
        let mut parts = self.command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| TextnoteError::Editor("No editor configured".to_string()))?;
        Ok((program, parts.collect()))
    }
}
