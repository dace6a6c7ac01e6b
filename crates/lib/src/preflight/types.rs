//! Types for host validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Toolchain;
use crate::consts::{QT_VERSION, QT_VERSION_MARKER};
use crate::platform::Os;
use crate::process::ToolError;

/// A `major.minor.patch` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PythonVersion {
  pub major: u32,
  pub minor: u32,
  pub patch: u32,
}

impl PythonVersion {
  pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
    Self { major, minor, patch }
  }
}

impl fmt::Display for PythonVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.patch == 0 {
      write!(f, "{}.{}", self.major, self.minor)
    } else {
      write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
  }
}

impl FromStr for PythonVersion {
  type Err = PreflightError;

  /// Parses `3`, `3.6` or `3.6.1`; missing components are zero.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || PreflightError::InvalidPythonVersion(s.to_string());
    let mut parts = s.trim().split('.');
    let mut next = |required: bool| -> Result<u32, PreflightError> {
      match parts.next() {
        Some(part) => part.parse().map_err(|_| invalid()),
        None if required => Err(invalid()),
        None => Ok(0),
      }
    };
    let version = Self::new(next(true)?, next(false)?, next(false)?);
    if parts.next().is_some() {
      return Err(invalid());
    }
    Ok(version)
  }
}

/// What the host needs to provide before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRequirements {
  pub min_python: PythonVersion,
  /// Substring expected in `qmake -v` output.
  pub qt_marker: String,
  /// Display name of the native build tool.
  pub make_name: String,
}

impl HostRequirements {
  /// Requirements for `os`, naming the build tool the way `toolchain` does.
  pub fn new(os: Os, toolchain: &Toolchain) -> Self {
    let make_name = toolchain
      .make
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| os.make_tool().to_string());
    Self {
      min_python: os.min_python(),
      qt_marker: QT_VERSION_MARKER.to_string(),
      make_name,
    }
  }
}

/// Facts gathered about the host, validated by [`super::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
  /// Pointer width of the host Python, in bits.
  pub pointer_width: u32,
  pub python_version: PythonVersion,
  pub has_deploy_library: bool,
  pub qmake: Option<PathBuf>,
  pub qmake_version: Option<String>,
  pub make: Option<PathBuf>,
}

/// Unmet host preconditions.
///
/// Each variant is reported before the pipeline touches the filesystem.
#[derive(Debug, Error)]
pub enum PreflightError {
  #[error("A 64-bit Python build is required to build TruFont.")]
  PointerWidth(u32),

  #[error("Python {required}+ is required to build TruFont.")]
  PythonTooOld {
    required: PythonVersion,
    found: PythonVersion,
  },

  #[error("pyqtdeploy is required to build TruFont.")]
  MissingDeployLibrary,

  #[error("qmake is required to build TruFont. Add Qt bin/ directory to PATH!")]
  MissingQmake,

  #[error("Qt {} is required to build TruFont.", QT_VERSION)]
  WrongQtVersion { found: String },

  #[error("{0} is required to build TruFont.")]
  MissingMake(String),

  #[error("host Python could not be run: {0}")]
  HostPython(#[source] ToolError),

  #[error("unexpected interpreter report: {0:?}")]
  InvalidProbeOutput(String),

  #[error("invalid Python version: {0:?}")]
  InvalidPythonVersion(String),
}
