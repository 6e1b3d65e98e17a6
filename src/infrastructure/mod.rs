//! Infrastructure layer - Configuration, storage and editor

pub mod config;
pub mod editor;
pub mod repository;

pub use config::Config;
pub use editor::EditorSession;
pub use repository::{FileSystemRepository, NoteEntry, NoteStore};
