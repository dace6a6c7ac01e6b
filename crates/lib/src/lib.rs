//! trubuild-lib: the TruFont bundle pipeline.
//!
//! Stages, in order:
//! - `preflight`: validate the host Python, Qt and native toolchain
//! - `fetch`: download PyQt5, sip and Python sources into `root/src/`
//! - `sysroot`: build the isolated runtime into `root/`
//! - `modules`: pip-install pure dependencies into `modules/`
//! - `deploy`: freeze the application with `pyqtdeploycli` into `dist/`
//! - `native`: run `qmake` and `make` in `dist/`
//! - `package`: zip the binary into `TruFont.zip` (Linux)
//!
//! [`pipeline::run`] drives them from a [`config::BuildConfig`].

pub mod config;
pub mod consts;
pub mod deploy;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod modules;
pub mod native;
pub mod package;
pub mod pipeline;
pub mod platform;
pub mod preflight;
pub mod process;
pub mod sysroot;
pub mod util;

pub use config::{BuildConfig, BuildOptions, Toolchain};
pub use error::{BuildError, Result};
pub use layout::Layout;
pub use pipeline::{BuildReport, Stage, StageOutcome};
