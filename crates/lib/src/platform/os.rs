use std::fmt;

use serde::Serialize;

use crate::consts::{PYQT_VERSION, PYTHON_VERSION, SIP_VERSION};
use crate::preflight::PythonVersion;

/// Operating system families the build distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  /// Linux and every other host that is neither macOS nor Windows.
  Linux,
  #[serde(rename = "darwin")]
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Self {
    Self::from_name(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` name onto the build's three branches.
  pub fn from_name(name: &str) -> Self {
    match name {
      "macos" => Self::MacOs,
      "windows" => Self::Windows,
      _ => Self::Linux,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// Extension of the PyQt/sip source archives published for this OS.
  pub fn archive_ext(&self) -> &'static str {
    match self {
      Self::Windows => "zip",
      Self::Linux | Self::MacOs => "tar.gz",
    }
  }

  /// Oldest host Python able to drive the sysroot build.
  pub fn min_python(&self) -> PythonVersion {
    match self {
      Self::Windows => PythonVersion::new(3, 6, 1),
      Self::Linux | Self::MacOs => PythonVersion::new(3, 5, 0),
    }
  }

  /// Native build tool that consumes the qmake-generated makefiles.
  pub fn make_tool(&self) -> &'static str {
    match self {
      Self::Windows => "nmake",
      Self::Linux | Self::MacOs => "make",
    }
  }

  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      Self::Linux | Self::MacOs => "",
    }
  }

  /// Whether the finished binary is zipped into a distributable archive.
  pub fn bundles_archive(&self) -> bool {
    matches!(self, Self::Linux)
  }

  /// Source archives fetched into the sysroot source directory.
  ///
  /// Windows links against a system Python, so only PyQt and sip are fetched there.
  pub fn default_packages(&self) -> Vec<String> {
    let ext = self.archive_ext();
    let mut packages = vec![
      format!(
        "https://sourceforge.net/projects/pyqt/files/PyQt5/PyQt-{v}/PyQt5_gpl-{v}.{ext}/download",
        v = PYQT_VERSION
      ),
      format!(
        "https://sourceforge.net/projects/pyqt/files/sip/sip-{v}/sip-{v}.{ext}/download",
        v = SIP_VERSION
      ),
    ];
    if !self.is_windows() {
      packages.push(format!(
        "https://www.python.org/ftp/python/{v}/Python-{v}.tgz",
        v = PYTHON_VERSION
      ));
    }
    packages
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
