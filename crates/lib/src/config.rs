//! Build configuration.
//!
//! A [`BuildConfig`] is assembled from platform defaults, then an optional
//! `trubuild.toml`, then command-line overrides, and passed by value into the
//! pipeline. Nothing is read from global state once the build starts.
//!
//! ```toml
//! packages = ["https://example.com/sip-4.19.1.tar.gz"]
//!
//! [options]
//! refresh_sources = false
//!
//! [tools]
//! qmake = "/opt/Qt5.8.0/5.8/gcc_64/bin/qmake"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::CONFIG_FILENAME;
use crate::layout::Layout;
use crate::platform::{Os, Platform};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: Box<toml::de::Error>,
  },

  #[error("project directory not found: {0}")]
  ProjectDir(PathBuf),
}

/// Stage-skip switches. Each stage runs unless its flag is turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
  /// Wipe `root/` and download the source archives again.
  pub refresh_sources: bool,
  /// Run the sysroot script over the downloaded sources.
  pub rebuild_sysroot: bool,
  /// Wipe `modules/` and reinstall every manifest entry.
  pub reinstall_modules: bool,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      refresh_sources: true,
      rebuild_sysroot: true,
      reinstall_modules: true,
    }
  }
}

/// External programs the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
  /// Host interpreter that runs the sysroot script.
  pub python: PathBuf,
  pub deploy: PathBuf,
  pub qmake: PathBuf,
  pub make: PathBuf,
}

impl Toolchain {
  pub fn for_os(os: Os) -> Self {
    let python = if os.is_windows() { "python" } else { "python3" };
    Self {
      python: PathBuf::from(python),
      deploy: PathBuf::from("pyqtdeploycli"),
      qmake: PathBuf::from("qmake"),
      make: PathBuf::from(os.make_tool()),
    }
  }
}

/// On-disk overrides. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub options: OptionsOverride,
  pub tools: ToolsOverride,
  pub packages: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverride {
  pub refresh_sources: Option<bool>,
  pub rebuild_sysroot: Option<bool>,
  pub reinstall_modules: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsOverride {
  pub python: Option<PathBuf>,
  pub deploy: Option<PathBuf>,
  pub qmake: Option<PathBuf>,
  pub make: Option<PathBuf>,
}

impl ConfigFile {
  pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source: Box::new(source),
    })
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content, path)
  }
}

impl OptionsOverride {
  pub fn apply(&self, options: &mut BuildOptions) {
    if let Some(value) = self.refresh_sources {
      options.refresh_sources = value;
    }
    if let Some(value) = self.rebuild_sysroot {
      options.rebuild_sysroot = value;
    }
    if let Some(value) = self.reinstall_modules {
      options.reinstall_modules = value;
    }
  }
}

/// Everything the pipeline needs to know, fixed before it starts.
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfig {
  pub project_dir: PathBuf,
  pub platform: Platform,
  pub options: BuildOptions,
  pub toolchain: Toolchain,
  /// Source archive URLs, downloaded in order.
  pub packages: Vec<String>,
}

impl BuildConfig {
  /// Platform defaults rooted at `project_dir`.
  pub fn new(project_dir: impl Into<PathBuf>, platform: Platform) -> Self {
    Self {
      project_dir: project_dir.into(),
      platform,
      options: BuildOptions::default(),
      toolchain: Toolchain::for_os(platform.os),
      packages: platform.os.default_packages(),
    }
  }

  /// Resolve `project_dir`, then layer `trubuild.toml` (or `explicit`) over the defaults.
  ///
  /// An explicit path must exist; the implicit one is optional.
  pub fn load(project_dir: &Path, platform: Platform, explicit: Option<&Path>) -> Result<Self, ConfigError> {
    let project_dir =
      dunce::canonicalize(project_dir).map_err(|_| ConfigError::ProjectDir(project_dir.to_path_buf()))?;
    let mut config = Self::new(&project_dir, platform);

    let file = match explicit {
      Some(path) => Some(ConfigFile::load(path)?),
      None => {
        let implicit = project_dir.join(CONFIG_FILENAME);
        if implicit.is_file() {
          Some(ConfigFile::load(&implicit)?)
        } else {
          None
        }
      }
    };
    if let Some(file) = file {
      config.merge(file);
    }
    debug!(?config, "configuration loaded");
    Ok(config)
  }

  /// Layer `file` over the current values.
  ///
  /// Tool paths with more than one component are taken relative to the
  /// project directory; bare names are left for `PATH` lookup.
  pub fn merge(&mut self, file: ConfigFile) {
    file.options.apply(&mut self.options);
    let tools = file.tools;
    if let Some(python) = tools.python {
      self.toolchain.python = self.resolve_tool(python);
    }
    if let Some(deploy) = tools.deploy {
      self.toolchain.deploy = self.resolve_tool(deploy);
    }
    if let Some(qmake) = tools.qmake {
      self.toolchain.qmake = self.resolve_tool(qmake);
    }
    if let Some(make) = tools.make {
      self.toolchain.make = self.resolve_tool(make);
    }
    if let Some(packages) = file.packages {
      self.packages = packages;
    }
  }

  fn resolve_tool(&self, tool: PathBuf) -> PathBuf {
    if tool.is_absolute() || tool.components().count() <= 1 {
      tool
    } else {
      self.project_dir.join(tool)
    }
  }

  pub fn layout(&self) -> Layout {
    Layout::new(&self.project_dir, self.platform.os)
  }
}
