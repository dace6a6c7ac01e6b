//! Paths the pipeline reads and writes under the project directory.
//!
//! # Layout
//!
//! ```text
//! {project}/
//! ├── build-sysroot.py          # sysroot construction script (input)
//! ├── TruFont.pdy               # deploy project descriptor (input)
//! ├── trufont/requirements.txt  # dependency manifest (input)
//! ├── root/                     # built sysroot
//! │   └── src/                  # downloaded source archives
//! ├── modules/                  # pip-installed pure dependencies
//! ├── dist/                     # deploy output, native build tree
//! └── TruFont.zip               # final bundle (Linux)
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::{
  ARCHIVE_FILENAME, BINARY_NAME, DIST_DIR, MODULES_DIR, PROJECT_FILE, REQUIREMENTS_FILE, SOURCES_DIR, SYSROOT_DIR,
};
use crate::platform::Os;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  project_dir: PathBuf,
  os: Os,
}

impl Layout {
  pub fn new(project_dir: impl Into<PathBuf>, os: Os) -> Self {
    Self {
      project_dir: project_dir.into(),
      os,
    }
  }

  pub fn project_dir(&self) -> &Path {
    &self.project_dir
  }

  pub fn sysroot(&self) -> PathBuf {
    self.project_dir.join(SYSROOT_DIR)
  }

  pub fn sources(&self) -> PathBuf {
    self.sysroot().join(SOURCES_DIR)
  }

  pub fn modules(&self) -> PathBuf {
    self.project_dir.join(MODULES_DIR)
  }

  pub fn dist(&self) -> PathBuf {
    self.project_dir.join(DIST_DIR)
  }

  pub fn archive(&self) -> PathBuf {
    self.project_dir.join(ARCHIVE_FILENAME)
  }

  pub fn project_file(&self) -> PathBuf {
    self.project_dir.join(PROJECT_FILE)
  }

  pub fn requirements(&self) -> PathBuf {
    self.project_dir.join(REQUIREMENTS_FILE)
  }

  /// Interpreter produced by the sysroot build.
  pub fn target_python(&self) -> PathBuf {
    self
      .sysroot()
      .join("bin")
      .join(format!("python{}", self.os.exe_suffix()))
  }

  /// Executable left in `dist/` by the native build.
  pub fn binary(&self) -> PathBuf {
    self.dist().join(format!("{}{}", BINARY_NAME, self.os.exe_suffix()))
  }

  /// Remove every generated artifact, returning the paths that existed.
  ///
  /// Inputs (script, descriptor, manifest) are left alone.
  pub fn remove_artifacts(&self) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in [self.sysroot(), self.modules(), self.dist()] {
      if dir.exists() {
        info!(path = %dir.display(), "deleting directory");
        std::fs::remove_dir_all(&dir)?;
        removed.push(dir);
      }
    }
    let archive = self.archive();
    if archive.exists() {
      info!(path = %archive.display(), "deleting archive");
      std::fs::remove_file(&archive)?;
      removed.push(archive);
    }
    Ok(removed)
  }
}
