//! List notes use case

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, NoteEntry};
use chrono::NaiveDate;

/// List notes with optional date range and limit, using the configured file naming.
pub fn list_notes(
    repository: &FileSystemRepository,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: Option<usize>,
) -> Result<Vec<NoteEntry>> {
    let config = repository.load_config()?;
    repository.list_notes(&config.format, from, to, limit)
}
