//! Output formatting utilities

use crate::infrastructure::{Config, NoteEntry};

/// Format a list of note entries for display
pub fn format_note_list(notes: &[NoteEntry]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for entry in notes {
        output.push_str(&format!(
            "{}  {}\n",
            entry.date.format("%a %d %b %Y"),
            entry.filename
        ));
    }
    output
}

/// Format every config value as `key = value` lines
pub fn format_config(config: &Config) -> String {
    format!(
        "editor = {}\nsections = {}\nextension = {}\nfile_date_format = {}\nheader_date_format = {}\n",
        config.editor,
        config.sections.join(","),
        config.format.extension,
        config.format.file_date_format,
        config.format.header_date_format
    )
}
