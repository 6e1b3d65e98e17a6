#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn textnote_cmd() -> Command {
    let mut cmd = Command::cargo_bin("textnote").unwrap();
    cmd.env_remove("TEXTNOTE_ROOT");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize `root` with the given sections through the CLI
pub fn init_notes(root: &Path, sections: &[&str]) {
    let mut cmd = textnote_cmd();
    cmd.arg("init").arg(root);
    for section in sections {
        cmd.arg("--section").arg(section);
    }
    cmd.assert().success();
}
