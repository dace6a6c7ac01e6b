//! Dependency manifest parsing.
//!
//! The manifest is a pip requirements file with one `name==version` entry per
//! line. Blank lines and `#` comments are ignored.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::TOOLKIT_PACKAGE;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("line {line}: requirement has no package name: {text:?}")]
  MissingName { line: usize, text: String },
}

/// A single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
  pub name: String,
  /// The entry as written, handed to pip verbatim.
  pub specifier: String,
}

impl Requirement {
  /// Whether this entry is the GUI toolkit, which the sysroot provides.
  pub fn is_toolkit(&self) -> bool {
    normalize(&self.name) == TOOLKIT_PACKAGE
  }
}

/// PEP 503 style comparison key: lowercase, `_` and `.` folded to `-`.
///
/// Separators are kept, so `PyQt_5` names a different project than `PyQt5`.
fn normalize(name: &str) -> String {
  name.to_ascii_lowercase().replace(['_', '.'], "-")
}

pub fn parse_requirements(content: &str) -> Result<Vec<Requirement>, ManifestError> {
  let mut requirements = Vec::new();
  for (index, raw) in content.lines().enumerate() {
    let text = raw.split('#').next().unwrap_or_default().trim();
    if text.is_empty() {
      continue;
    }

    let end = text
      .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
      .unwrap_or(text.len());
    let name = &text[..end];
    if name.is_empty() {
      return Err(ManifestError::MissingName {
        line: index + 1,
        text: text.to_string(),
      });
    }

    requirements.push(Requirement {
      name: name.to_string(),
      specifier: text.to_string(),
    });
  }
  Ok(requirements)
}

pub fn load_requirements(path: &Path) -> Result<Vec<Requirement>, ManifestError> {
  let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  parse_requirements(&content)
}
