//! Dated note template: sections, parsing and rendering

use crate::domain::format::NoteFormat;
use crate::domain::section::{ContentItem, Section};
use crate::error::{Result, TemplateSide, TextnoteError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// In-memory model of one day's note file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    date: NaiveDate,
    format: NoteFormat,
    sections: Vec<Section>,
    // name -> position in `sections`; updated together with every push
    section_idx: HashMap<String, usize>,
}

impl Template {
    /// Create a template with one empty section per name, in the given order.
    ///
    /// Names are not deduplicated: a repeated name keeps both sections but
    /// only the last one is reachable by name.
    pub fn new<I, S>(section_names: I, date: NaiveDate, format: NoteFormat) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections: Vec<Section> = section_names.into_iter().map(Section::new).collect();
        let section_idx = sections
            .iter()
            .enumerate()
            .map(|(i, section)| (section.name().to_string(), i))
            .collect();

        Template {
            date,
            format,
            sections,
            section_idx,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn format(&self) -> &NoteFormat {
        &self.format
    }

    /// Sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.section_idx.get(name).copied()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.section_index(name).map(|i| &self.sections[i])
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        let idx = self.section_index(name)?;
        Some(&mut self.sections[idx])
    }

    /// Add a section after the configured ones and index it
    pub fn append_section(&mut self, section: Section) -> Result<()> {
        if self.section_idx.contains_key(section.name()) {
            return Err(TextnoteError::DuplicateSection(section.name().to_string()));
        }
        self.section_idx
            .insert(section.name().to_string(), self.sections.len());
        self.sections.push(section);
        Ok(())
    }

    /// File name of this note, e.g. `2020-12-20.txt`
    pub fn file_name(&self) -> String {
        self.format.file_name(self.date)
    }

    /// `<root>/<formatted date>.<extension>`
    pub fn canonical_path(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }

    /// Replace the contents of every section with what `raw` holds.
    ///
    /// The template is left untouched when parsing fails.
    pub fn populate(&mut self, raw: &str) -> Result<()> {
        let mut lines = raw.lines().skip_while(|line| line.trim().is_empty());

        let header = lines.next().ok_or_else(|| {
            TextnoteError::MalformedDocument("missing date header".to_string())
        })?;
        let header_date = self.format.parse_header_line(header).ok_or_else(|| {
            TextnoteError::MalformedDocument(format!("expected date header, found '{}'", header))
        })?;
        let expected = self.format.header_date(self.date);
        if header_date != expected {
            tracing::warn!(
                "Note header '{}' does not match template date '{}'",
                header_date,
                expected
            );
        }

        let mut parsed: Vec<Vec<ContentItem>> = vec![Vec::new(); self.sections.len()];
        let mut current: Option<(usize, Vec<&str>)> = None;

        for line in lines {
            if let Some(marker) = self.format.parse_section_marker(line) {
                let name = marker?;
                let idx = self
                    .section_index(name)
                    .ok_or_else(|| TextnoteError::UnknownSection {
                        section: name.to_string(),
                        note: self.file_name(),
                    })?;
                if let Some((prev, body)) = current.replace((idx, Vec::new())) {
                    parsed[prev].extend(parse_block(&body));
                }
                continue;
            }

            match current.as_mut() {
                Some((_, body)) => body.push(line),
                None if line.trim().is_empty() => {}
                None => {
                    return Err(TextnoteError::MalformedDocument(format!(
                        "text before first section marker: '{}'",
                        line
                    )))
                }
            }
        }
        if let Some((prev, body)) = current {
            parsed[prev].extend(parse_block(&body));
        }

        for (section, contents) in self.sections.iter_mut().zip(parsed) {
            section.replace_contents(contents);
        }
        tracing::debug!("Parsed note for {}", self.date);
        Ok(())
    }

    /// Serialize to the note file format; same state always gives the same bytes
    pub fn render(&self) -> String {
        let mut out = self.format.header_block(self.date);
        let spacing = self.format.empty_section_spacing();
        for section in &self.sections {
            out.push_str(&self.format.section_marker(section.name()));
            out.push('\n');
            section.render_body_into(&mut out, &spacing);
        }
        out
    }

    /// Append the contents of `src`'s section to the same section here.
    ///
    /// Both sides are checked before anything is mutated.
    pub fn copy_section_contents(&mut self, src: &Template, name: &str) -> Result<()> {
        let src_idx = src.lookup(name, TemplateSide::Source)?;
        let tgt_idx = self.lookup(name, TemplateSide::Target)?;

        let items = src.sections[src_idx].contents().to_vec();
        tracing::debug!(
            "Copying {} item(s) of section '{}' from {} to {}",
            items.len(),
            name,
            src.date,
            self.date
        );
        self.sections[tgt_idx].extend(items);
        Ok(())
    }

    /// Copy `src`'s section here, then empty it in `src`
    pub fn move_section_contents(&mut self, src: &mut Template, name: &str) -> Result<()> {
        self.copy_section_contents(src, name)?;
        src.delete_section_contents(name)
    }

    /// Empty a section; deleting an empty section is not an error
    pub fn delete_section_contents(&mut self, name: &str) -> Result<()> {
        let idx = self.lookup(name, TemplateSide::Target)?;
        self.sections[idx].clear();
        Ok(())
    }

    fn lookup(&self, name: &str, side: TemplateSide) -> Result<usize> {
        self.section_index(name)
            .ok_or_else(|| TextnoteError::SectionNotFound {
                section: name.to_string(),
                side,
            })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Body lines of one section marker become a single header-less item, with
/// surrounding blank lines dropped
fn parse_block(lines: &[&str]) -> Option<ContentItem> {
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let end = lines.iter().rposition(|line| !line.trim().is_empty())?;
    Some(ContentItem::plain(lines[start..=end].join("\n")))
}
