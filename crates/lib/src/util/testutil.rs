//! Test utilities for trubuild-lib.
//!
//! Cross-platform shell helpers and fake tools that stand in for the real
//! Python, Qt and deploy toolchain.

use std::path::{Path, PathBuf};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Write an executable `/bin/sh` script to `dir/name` and return its path.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Read the lines a fake tool appended to a log file, or nothing if it never ran.
pub fn logged_lines(path: &Path) -> Vec<String> {
  std::fs::read_to_string(path)
    .map(|content| content.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
