//! Note file grammar shared by parsing and rendering

use crate::error::{Result, TextnoteError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Wrapping applied to a marker line, plus the blank lines that follow it
/// when nothing else is written after the marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub prefix: String,
    pub suffix: String,
    pub trailing_newlines: usize,
}

impl Delimiters {
    pub fn new(prefix: &str, suffix: &str, trailing_newlines: usize) -> Self {
        Delimiters {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            trailing_newlines,
        }
    }

    /// Wrap `inner` in this prefix and suffix
    pub fn wrap(&self, inner: &str) -> String {
        format!("{}{}{}", self.prefix, inner, self.suffix)
    }

    /// Return the wrapped text if `line` starts with the prefix and ends with the suffix
    pub fn strip<'a>(&self, line: &'a str) -> Option<&'a str> {
        if line.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        line.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    fn spacing(&self) -> String {
        "\n".repeat(self.trailing_newlines)
    }
}

/// Layout of a note file: marker delimiters, date patterns and file extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteFormat {
    /// chrono pattern for the date shown in the header line
    pub header_date_format: String,
    /// chrono pattern for the file name
    pub file_date_format: String,
    pub extension: String,
    pub header: Delimiters,
    pub section: Delimiters,
}

impl Default for NoteFormat {
    fn default() -> Self {
        NoteFormat {
            header_date_format: "[%a] %d %b %Y".to_string(),
            file_date_format: "%Y-%m-%d".to_string(),
            extension: "txt".to_string(),
            header: Delimiters::new("-^-", "-v-", 1),
            section: Delimiters::new("_p_", "_q_", 3),
        }
    }
}

impl NoteFormat {
    /// Reject settings that would make notes unrenderable or unparseable.
    ///
    /// Date patterns must format a plain date, so time and offset specifiers
    /// such as `%H` or `%z` are rejected along with malformed ones.
    ///
    /// Any body line that starts with the section prefix is read as a marker,
    /// so a short prefix like `[` turns a line such as `[ ] task` into a
    /// malformed marker. Pick a prefix that note text will not start with.
    pub fn validate(&self) -> Result<()> {
        for (key, pattern) in [
            ("header_date_format", &self.header_date_format),
            ("file_date_format", &self.file_date_format),
        ] {
            if pattern.is_empty() || !formats_date(pattern) {
                return Err(TextnoteError::Config(format!(
                    "Invalid date format for {}: '{}'",
                    key, pattern
                )));
            }
        }
        if self.section.prefix.is_empty() {
            return Err(TextnoteError::Config(
                "Section prefix must not be empty".to_string(),
            ));
        }
        if self.header.prefix.is_empty() && self.header.suffix.is_empty() {
            return Err(TextnoteError::Config(
                "Header needs a prefix or a suffix".to_string(),
            ));
        }
        if self.extension.is_empty() {
            return Err(TextnoteError::Config("Extension must not be empty".to_string()));
        }
        Ok(())
    }

    /// The date as shown between the header delimiters
    pub fn header_date(&self, date: NaiveDate) -> String {
        date.format(&self.header_date_format).to_string()
    }

    /// Header block: the wrapped date line followed by its spacing
    pub fn header_block(&self, date: NaiveDate) -> String {
        format!(
            "{}\n{}",
            self.header.wrap(&self.header_date(date)),
            self.header.spacing()
        )
    }

    pub fn section_marker(&self, name: &str) -> String {
        self.section.wrap(name)
    }

    /// Spacing written after the marker of a section with no contents
    pub fn empty_section_spacing(&self) -> String {
        self.section.spacing()
    }

    /// Date text of a header line, or `None` if the line is not a header
    pub fn parse_header_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.header.strip(line)
    }

    /// Classify a line as a section marker.
    ///
    /// Returns `None` for ordinary lines, the section name for a marker, and
    /// an error for a line that opens a marker but never closes it properly.
    pub fn parse_section_marker<'a>(&self, line: &'a str) -> Option<Result<&'a str>> {
        if !line.starts_with(self.section.prefix.as_str()) {
            return None;
        }
        match self.section.strip(line) {
            Some(name) if !name.trim().is_empty() => Some(Ok(name)),
            _ => Some(Err(TextnoteError::MalformedDocument(format!(
                "ill-formed section marker: '{}'",
                line
            )))),
        }
    }

    /// File name of the note for `date`, e.g. `2020-12-20.txt`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}.{}", date.format(&self.file_date_format), self.extension)
    }

    /// Inverse of [`NoteFormat::file_name`]; `None` for files that are not notes
    pub fn date_from_file_name(&self, file_name: &str) -> Option<NaiveDate> {
        let stem = file_name.strip_suffix(&format!(".{}", self.extension))?;
        NaiveDate::parse_from_str(stem, &self.file_date_format).ok()
    }
}

/// Whether `pattern` can render a date without a time or zone
fn formats_date(pattern: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2020, 12, 20) else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(pattern)).is_ok()
}
