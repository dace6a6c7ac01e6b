//! Gathering a [`HostReport`] from the real host.
//!
//! Probing only launches read-only subprocesses and searches `PATH`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{HostReport, PreflightError, PythonVersion};
use crate::config::Toolchain;
use crate::consts::DEPLOY_LIBRARY;
use crate::process::ToolCommand;

/// Prints the pointer width in bits, then the dotted interpreter version.
const INTERPRETER_PROBE: &str =
  "import struct, sys; print(struct.calcsize('P') * 8); print('.'.join(str(n) for n in sys.version_info[:3]))";

/// Probe the host Python, Qt and native build tools named by `toolchain`.
pub async fn probe_host(toolchain: &Toolchain) -> Result<HostReport, PreflightError> {
  let report = ToolCommand::new(&toolchain.python)
    .args(["-c", INTERPRETER_PROBE])
    .stdout()
    .await
    .map_err(PreflightError::HostPython)?;
  let (pointer_width, python_version) = parse_interpreter_report(&report)?;

  let has_deploy_library = ToolCommand::new(&toolchain.python)
    .args(["-c".to_string(), format!("import {}", DEPLOY_LIBRARY)])
    .output()
    .await
    .map_err(PreflightError::HostPython)?
    .status
    .success();

  let qmake = locate(&toolchain.qmake);
  let qmake_version = match &qmake {
    Some(path) => ToolCommand::new(path)
      .arg("-v")
      .output()
      .await
      .ok()
      .map(|output| String::from_utf8_lossy(&output.stdout).into_owned()),
    None => None,
  };

  let make = locate(&toolchain.make);

  let report = HostReport {
    pointer_width,
    python_version,
    has_deploy_library,
    qmake,
    qmake_version,
    make,
  };
  debug!(?report, "host probed");
  Ok(report)
}

/// Resolve a tool through `PATH`, keeping it only if the file exists.
pub fn locate(tool: &Path) -> Option<PathBuf> {
  which::which(tool).ok().filter(|path| path.exists())
}

fn parse_interpreter_report(report: &str) -> Result<(u32, PythonVersion), PreflightError> {
  let invalid = || PreflightError::InvalidProbeOutput(report.to_string());
  let mut lines = report.lines().map(str::trim).filter(|line| !line.is_empty());
  let width = lines.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
  let version = lines.next().ok_or_else(invalid)?.parse()?;
  Ok((width, version))
}
