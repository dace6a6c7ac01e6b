use std::fmt;

use serde::{Serialize, Serializer};

/// CPU architecture of the host, reported for information only.
///
/// Whether the build is 64-bit is decided by the host Python, not by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  /// Any other architecture, by its `std::env::consts::ARCH` name.
  Other(&'static str),
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Self {
    Self::from_name(std::env::consts::ARCH)
  }

  pub fn from_name(name: &'static str) -> Self {
    match name {
      "x86_64" => Self::X86_64,
      "aarch64" => Self::Aarch64,
      other => Self::Other(other),
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other(name) => *name,
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl Serialize for Arch {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}
