//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "textnote")]
#[command(about = "Plain text daily notes with sections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Day to open (e.g., today, yesterday, last monday, 3 days ago, 2020-12-20)
    #[arg(value_name = "TIME_REF")]
    pub time_ref: Option<String>,

    /// Sections to copy from the source note, comma-separated
    #[arg(short, long, value_delimiter = ',', value_name = "SECTION")]
    pub copy: Vec<String>,

    /// Delete copied sections from the source note (move instead of copy)
    #[arg(short, long, requires = "copy")]
    pub delete: bool,

    /// Day to copy sections from (default: the day before TIME_REF)
    #[arg(long, value_name = "TIME_REF", requires = "copy")]
    pub from: Option<String>,

    /// Create or update the note without opening the editor
    #[arg(long)]
    pub no_edit: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new notes directory
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Section names in file order (repeatable; default: TODO, DONE, NOTES)
        #[arg(short, long = "section", value_name = "NAME")]
        sections: Vec<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// List notes, newest first
    List {
        /// Earliest day to include
        #[arg(long, value_name = "TIME_REF")]
        from: Option<String>,

        /// Latest day to include
        #[arg(long, value_name = "TIME_REF")]
        to: Option<String>,

        /// Maximum number of notes to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}
