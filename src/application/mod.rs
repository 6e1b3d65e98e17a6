//! Application layer - Use cases and orchestration

pub mod init;
pub mod list_notes;
pub mod manage_config;
pub mod open_note;

pub use manage_config::ConfigService;
pub use open_note::{OpenNoteService, OpenRequest};
