//! Domain layer - Note model, file grammar and date handling

pub mod format;
pub mod section;
pub mod template;
pub mod time_ref;

pub use format::{Delimiters, NoteFormat};
pub use section::{ContentItem, Section};
pub use template::Template;
pub use time_ref::TimeReference;
