//! Top-level pipeline error.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::manifest::ManifestError;
use crate::package::PackageError;
use crate::preflight::PreflightError;
use crate::process::ToolError;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Any failure that aborts the build. Nothing is retried or rolled back.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Preflight(#[from] PreflightError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error(transparent)]
  Tool(#[from] ToolError),

  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Package(#[from] PackageError),

  /// The sysroot build finished without leaving an interpreter behind.
  #[error("sysroot interpreter not found: {0}")]
  MissingTargetPython(PathBuf),

  /// The deploy tool finished without producing its output directory.
  #[error("deploy output directory not found: {0}")]
  MissingDist(PathBuf),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
