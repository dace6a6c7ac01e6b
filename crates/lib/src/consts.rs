//! Fixed names and versions the build is pinned to.

pub const APP_NAME: &str = "trubuild";

/// Optional configuration file looked up in the project directory.
pub const CONFIG_FILENAME: &str = "trubuild.toml";

pub const SYSROOT_DIR: &str = "root";
pub const SOURCES_DIR: &str = "src";
pub const MODULES_DIR: &str = "modules";
pub const DIST_DIR: &str = "dist";

pub const SYSROOT_SCRIPT: &str = "build-sysroot.py";
pub const PROJECT_FILE: &str = "TruFont.pdy";
pub const REQUIREMENTS_FILE: &str = "trufont/requirements.txt";

/// Name of the executable `qmake`/`make` leave in the dist directory.
pub const BINARY_NAME: &str = "TruFont";
pub const ARCHIVE_FILENAME: &str = "TruFont.zip";
pub const ARCHIVE_BINARY_NAME: &str = "TruFont.run";

/// Native extension shipped next to the binary when present in the modules directory.
pub const EXTENSION_PREFIX: &str = "pyclipper";
pub const EXTENSION_SUFFIX: &str = ".so";
pub const ARCHIVE_EXTENSION_NAME: &str = "pyclipper.so";

/// Manifest entry installed by the sysroot build rather than pip.
pub const TOOLKIT_PACKAGE: &str = "pyqt5";

/// Python library that provides `pyqtdeploycli`.
pub const DEPLOY_LIBRARY: &str = "pyqtdeploy";
pub const QT_VERSION_MARKER: &str = "Qt version 5.8";
pub const QT_VERSION: &str = "5.8";

/// Environment variable pointing the deploy tool at the sysroot.
pub const SYSROOT_ENV: &str = "SYSROOT";

pub const PYQT_VERSION: &str = "5.8.1";
pub const SIP_VERSION: &str = "4.19.1";
pub const PYTHON_VERSION: &str = "3.6.1";

/// System Python the Windows sysroot links against.
pub const WINDOWS_SYSTEM_PYTHON: &str = "3.6";
