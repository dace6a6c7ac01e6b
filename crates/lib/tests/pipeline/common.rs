//! Shared fixtures for pipeline tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trubuild_lib::config::{BuildConfig, Toolchain};
use trubuild_lib::platform::Platform;

pub const REQUIREMENTS: &str = "pyqt5==5.8.1\nfonttools==3.9.1\npyclipper==1.0.6\n";

/// Qt version reported by the fake `qmake -v`.
pub const GOOD_QT: &str = "Using Qt version 5.8.0 in /opt/qt/lib";

/// Isolated project directory with fake tools that log every call to `calls.log`.
pub struct Project {
  pub temp: TempDir,
  pub dir: PathBuf,
}

impl Project {
  pub fn new() -> Self {
    Self::with_qt(GOOD_QT)
  }

  pub fn with_qt(qt_version: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let dir = dunce::canonicalize(temp.path()).unwrap();
    let project = Self { temp, dir };

    project.write("trufont/requirements.txt", REQUIREMENTS);
    project.write("TruFont.pdy", "<project/>");
    project.write("build-sysroot.py", "# sysroot script");

    let log = project.log_path();
    let log = log.display();
    let tools = project.tools_dir();
    project.tool(
      "target-python",
      &format!(
        r#"echo "target $*" >> '{log}'
case "$*" in *pyclipper*) touch modules/pyclipper.cpython-36m-x86_64-linux-gnu.so ;; esac"#
      ),
    );
    project.tool(
      "python3",
      &format!(
        r#"case "$2" in
  *calcsize*) printf '64\n3.6.1\n'; exit 0 ;;
  "import pyqtdeploy") exit 0 ;;
esac
echo "sysroot $*" >> '{log}'
mkdir -p root/bin && cp '{tools}/target-python' root/bin/python"#,
        tools = tools.display()
      ),
    );
    project.tool(
      "pyqtdeploycli",
      &format!(r#"echo "deploy $* SYSROOT=$SYSROOT" >> '{log}'; mkdir -p dist"#),
    );
    project.tool(
      "qmake",
      &format!(
        r#"if [ "$1" = "-v" ]; then echo 'QMake version 3.1'; echo '{qt_version}'; exit 0; fi
echo "qmake $(pwd)" >> '{log}'"#
      ),
    );
    project.tool(
      "make",
      &format!(r#"echo "make $(pwd)" >> '{log}'; printf 'binary' > TruFont"#),
    );
    project
  }

  pub fn write(&self, relative: &str, content: &str) {
    let path = self.dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  /// Replace (or create) a fake tool with the given shell body.
  pub fn tool(&self, name: &str, body: &str) -> PathBuf {
    let path = self.tools_dir().join(name);
    std::fs::create_dir_all(self.tools_dir()).unwrap();
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn tools_dir(&self) -> PathBuf {
    self.dir.join("tools")
  }

  pub fn log_path(&self) -> PathBuf {
    self.dir.join("calls.log")
  }

  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .map(|content| content.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.dir.join(relative)
  }

  /// Config wired to the fake tools, fetching `packages`.
  pub fn config(&self, packages: Vec<String>) -> BuildConfig {
    let platform = Platform::current();
    let mut config = BuildConfig::new(&self.dir, platform);
    let tools = self.tools_dir();
    config.toolchain = Toolchain {
      python: tools.join("python3"),
      deploy: tools.join("pyqtdeploycli"),
      qmake: tools.join("qmake"),
      make: tools.join("make"),
    };
    config.packages = packages;
    config
  }

  pub fn exists(&self, relative: &str) -> bool {
    Path::new(&self.dir).join(relative).exists()
  }
}
