//! Open note use case

use crate::domain::Template;
use crate::error::{Result, StorageOperation, TemplateSide, TextnoteError};
use crate::infrastructure::{Config, EditorSession, NoteStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// What to do when opening the note for a day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub date: NaiveDate,
    /// Sections to bring over from the source note
    pub sections: Vec<String>,
    /// Day to take sections from; the previous day when unset
    pub source_date: Option<NaiveDate>,
    /// Empty the copied sections in the source note afterwards
    pub move_sections: bool,
}

impl OpenRequest {
    pub fn new(date: NaiveDate) -> Self {
        OpenRequest {
            date,
            sections: Vec::new(),
            source_date: None,
            move_sections: false,
        }
    }

    fn source_date(&self) -> Result<NaiveDate> {
        match self.source_date {
            Some(date) => Ok(date),
            None => self.date.pred_opt().ok_or_else(|| {
                TextnoteError::InvalidTimeReference(format!("no day before {}", self.date))
            }),
        }
    }
}

/// Service for creating, updating and opening daily notes
pub struct OpenNoteService<S: NoteStore> {
    store: S,
    root: PathBuf,
    config: Config,
}

impl<S: NoteStore> OpenNoteService<S> {
    pub fn new(store: S, root: PathBuf, config: Config) -> Self {
        OpenNoteService {
            store,
            root,
            config,
        }
    }

    /// Prepare the note and open it in the editor when requested.
    /// Returns the path of the note.
    pub fn execute(&self, request: &OpenRequest, open_in_editor: bool) -> Result<PathBuf> {
        let path = self.prepare(request)?;

        if open_in_editor {
            EditorSession::new(self.config.get_editor()).open(&path)?;
        }

        Ok(path)
    }

    /// Create the note if it is missing, then apply the requested section
    /// transfers. Nothing is written unless every transfer succeeded.
    pub fn prepare(&self, request: &OpenRequest) -> Result<PathBuf> {
        let mut target = self.template(request.date);
        let target_path = target.canonical_path(&self.root);

        if !self.store.exists(&target_path) {
            tracing::info!("Creating {}", target_path.display());
            self.store
                .write(&target_path, &target.render())
                .map_err(|e| {
                    TextnoteError::storage(StorageOperation::CreateTarget, &target_path, e)
                })?;
        }

        if request.sections.is_empty() {
            return Ok(target_path);
        }

        let source_date = request.source_date()?;
        if source_date == request.date {
            return Err(TextnoteError::Config(format!(
                "Cannot copy sections of {} into itself",
                target.file_name()
            )));
        }
        let mut source = self.template(source_date);
        let source_path = source.canonical_path(&self.root);

        self.load(&mut source, &source_path, TemplateSide::Source)?;
        self.load(&mut target, &target_path, TemplateSide::Target)?;

        for name in &request.sections {
            if request.move_sections {
                target.move_section_contents(&mut source, name)?;
            } else {
                target.copy_section_contents(&source, name)?;
            }
        }

        // Target first: if it fails the source still holds the moved items
        self.save(&target, &target_path, StorageOperation::WriteTarget)?;
        if request.move_sections {
            self.save(&source, &source_path, StorageOperation::WriteSource)?;
        }

        tracing::info!(
            "{} {} section(s) from {} to {}",
            if request.move_sections { "Moved" } else { "Copied" },
            request.sections.len(),
            source.file_name(),
            target.file_name()
        );
        Ok(target_path)
    }

    fn template(&self, date: NaiveDate) -> Template {
        Template::new(
            self.config.sections.iter().cloned(),
            date,
            self.config.format.clone(),
        )
    }

    /// Read and parse a note; parse errors name the side and the file
    fn load(&self, template: &mut Template, path: &Path, side: TemplateSide) -> Result<()> {
        let operation = match side {
            TemplateSide::Source => StorageOperation::ReadSource,
            TemplateSide::Target => StorageOperation::ReadTarget,
        };
        let raw = self
            .store
            .read(path)
            .map_err(|e| TextnoteError::storage(operation, path, e))?;

        let note = format!("{} note {}", side, path.display());
        template.populate(&raw).map_err(|e| match e {
            TextnoteError::MalformedDocument(msg) => {
                TextnoteError::MalformedDocument(format!("{}: {}", note, msg))
            }
            TextnoteError::UnknownSection { section, .. } => {
                TextnoteError::UnknownSection { section, note }
            }
            other => {
                tracing::error!("Could not load {}", note);
                other
            }
        })
    }

    fn save(&self, template: &Template, path: &Path, operation: StorageOperation) -> Result<()> {
        self.store
            .write(path, &template.render())
            .map_err(|e| TextnoteError::storage(operation, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentItem;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        failing_writes: Vec<PathBuf>,
    }

    impl MemoryStore {
        fn get(&self, path: &Path) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        fn put(&self, path: &Path, contents: &str) {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
        }
    }

    impl NoteStore for MemoryStore {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn read(&self, path: &Path) -> io::Result<String> {
            self.get(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such note"))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            if self.failing_writes.iter().any(|p| p == path) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.put(path, contents);
            Ok(())
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 12, d).unwrap()
    }

    fn config() -> Config {
        Config::new(vec!["TODO".to_string(), "NOTES".to_string()])
    }

    fn root() -> PathBuf {
        PathBuf::from("/notes")
    }

    fn note_path(d: u32) -> PathBuf {
        root().join(format!("2020-12-{:02}.txt", d))
    }

    fn note(date: NaiveDate, todo: Option<&str>, notes: Option<&str>) -> Template {
        let config = config();
        let mut t = Template::new(config.sections, date, config.format);
        if let Some(text) = todo {
            t.section_mut("TODO").unwrap().push(ContentItem::plain(text));
        }
        if let Some(text) = notes {
            t.section_mut("NOTES").unwrap().push(ContentItem::plain(text));
        }
        t
    }

    fn service(store: &MemoryStore) -> OpenNoteService<&MemoryStore> {
        OpenNoteService::new(store, root(), config())
    }

    fn transfer(date: u32, sections: &[&str], move_sections: bool) -> OpenRequest {
        OpenRequest {
            sections: sections.iter().map(|s| s.to_string()).collect(),
            move_sections,
            ..OpenRequest::new(day(date))
        }
    }

    #[test]
    fn test_creates_missing_note() {
        let store = MemoryStore::default();
        let path = service(&store).prepare(&OpenRequest::new(day(20))).unwrap();

        assert_eq!(path, note_path(20));
        assert_eq!(
            store.get(&path).unwrap(),
            "-^-[Sun] 20 Dec 2020-v-\n\n_p_TODO_q_\n\n\n\n_p_NOTES_q_\n\n\n\n"
        );
    }

    #[test]
    fn test_existing_note_is_not_overwritten() {
        let store = MemoryStore::default();
        store.put(&note_path(20), "hand edited");

        service(&store).prepare(&OpenRequest::new(day(20))).unwrap();
        assert_eq!(store.get(&note_path(20)).unwrap(), "hand edited");
    }

    #[test]
    fn test_copy_appends_previous_day_sections() {
        let store = MemoryStore::default();
        let yesterday = note(day(19), Some("- carry me"), Some("stay here"));
        store.put(&note_path(19), &yesterday.render());
        store.put(&note_path(20), &note(day(20), Some("- new task"), None).render());

        service(&store)
            .prepare(&transfer(20, &["TODO"], false))
            .unwrap();

        let mut expected = note(day(20), Some("- new task"), None);
        expected
            .section_mut("TODO")
            .unwrap()
            .push(ContentItem::plain("- carry me"));
        assert_eq!(store.get(&note_path(20)).unwrap(), expected.render());
        assert_eq!(store.get(&note_path(19)).unwrap(), yesterday.render());
    }

    #[test]
    fn test_move_empties_source_sections() {
        let store = MemoryStore::default();
        store.put(
            &note_path(19),
            &note(day(19), Some("- carry me"), Some("moved too")).render(),
        );

        service(&store)
            .prepare(&transfer(20, &["TODO", "NOTES"], true))
            .unwrap();

        assert_eq!(
            store.get(&note_path(20)).unwrap(),
            note(day(20), Some("- carry me"), Some("moved too")).render()
        );
        assert_eq!(
            store.get(&note_path(19)).unwrap(),
            note(day(19), None, None).render()
        );
    }

    #[test]
    fn test_explicit_source_date() {
        let store = MemoryStore::default();
        store.put(&note_path(15), &note(day(15), Some("old"), None).render());

        let request = OpenRequest {
            source_date: Some(day(15)),
            ..transfer(20, &["TODO"], false)
        };
        service(&store).prepare(&request).unwrap();

        assert_eq!(
            store.get(&note_path(20)).unwrap(),
            note(day(20), Some("old"), None).render()
        );
    }

    #[test]
    fn test_failing_section_writes_nothing() {
        let store = MemoryStore::default();
        let yesterday = note(day(19), Some("- carry me"), None).render();
        store.put(&note_path(19), &yesterday);

        let err = service(&store)
            .prepare(&transfer(20, &["TODO", "Ideas"], true))
            .unwrap_err();

        assert!(matches!(
            err,
            TextnoteError::SectionNotFound { ref section, side: TemplateSide::Source } if section == "Ideas"
        ));
        assert_eq!(store.get(&note_path(20)).unwrap(), note(day(20), None, None).render());
        assert_eq!(store.get(&note_path(19)).unwrap(), yesterday);
    }

    #[test]
    fn test_missing_source_note() {
        let store = MemoryStore::default();
        let err = service(&store)
            .prepare(&transfer(20, &["TODO"], false))
            .unwrap_err();

        match err {
            TextnoteError::Storage {
                operation, path, ..
            } => {
                assert_eq!(operation, StorageOperation::ReadSource);
                assert_eq!(path, note_path(19));
            }
            other => panic!("Expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_source_names_file() {
        let store = MemoryStore::default();
        store.put(&note_path(19), "just some text\n");

        let err = service(&store)
            .prepare(&transfer(20, &["TODO"], false))
            .unwrap_err();
        match err {
            TextnoteError::MalformedDocument(msg) => {
                assert!(msg.starts_with("source note "));
                assert!(msg.contains("2020-12-19.txt"));
            }
            other => panic!("Expected malformed document, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_section_in_target_names_note() {
        let store = MemoryStore::default();
        store.put(&note_path(19), &note(day(19), Some("- carry me"), None).render());
        let stale = "-^-[Sun] 20 Dec 2020-v-\n\n_p_Ideas_q_\nold layout\n";
        store.put(&note_path(20), stale);

        let err = service(&store)
            .prepare(&transfer(20, &["TODO"], false))
            .unwrap_err();

        match err {
            TextnoteError::UnknownSection { section, note } => {
                assert_eq!(section, "Ideas");
                assert!(note.starts_with("target note "));
                assert!(note.contains("2020-12-20.txt"));
            }
            other => panic!("Expected unknown section, got {:?}", other),
        }
        assert_eq!(store.get(&note_path(20)).unwrap(), stale);
    }

    #[test]
    fn test_no_day_before_first_date() {
        let store = MemoryStore::default();
        let request = OpenRequest {
            sections: vec!["TODO".to_string()],
            ..OpenRequest::new(NaiveDate::MIN)
        };

        let err = service(&store).prepare(&request).unwrap_err();
        assert!(matches!(err, TextnoteError::InvalidTimeReference(_)));
    }

    #[test]
    fn test_target_write_failure_keeps_source() {
        let store = MemoryStore {
            failing_writes: vec![note_path(20)],
            ..MemoryStore::default()
        };
        let yesterday = note(day(19), Some("- carry me"), None).render();
        store.put(&note_path(19), &yesterday);
        store.put(&note_path(20), &note(day(20), None, None).render());

        let err = service(&store)
            .prepare(&transfer(20, &["TODO"], true))
            .unwrap_err();

        assert!(matches!(
            err,
            TextnoteError::Storage {
                operation: StorageOperation::WriteTarget,
                ..
            }
        ));
        assert_eq!(store.get(&note_path(19)).unwrap(), yesterday);
    }

    #[test]
    fn test_create_failure_is_reported() {
        let store = MemoryStore {
            failing_writes: vec![note_path(20)],
            ..MemoryStore::default()
        };
        let err = service(&store)
            .prepare(&OpenRequest::new(day(20)))
            .unwrap_err();
        assert!(err.to_string().starts_with("create-target failed"));
    }

    #[test]
    fn test_copy_into_same_day_is_rejected() {
        let store = MemoryStore::default();
        let request = OpenRequest {
            source_date: Some(day(20)),
            ..transfer(20, &["TODO"], false)
        };
        let err = service(&store).prepare(&request).unwrap_err();
        assert!(matches!(err, TextnoteError::Config(_)));
    }
}
