//! textnote - Plain text daily notes
//!
//! A command-line note-taking application that keeps one plain text file per
//! day, split into named sections that can be copied or moved between days.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TextnoteError;
