//! Host validation.
//!
//! Checks run in a fixed order and stop at the first unmet condition:
//! pointer width, interpreter version, deploy library, `qmake` presence,
//! Qt version, native build tool presence.

mod probe;
mod types;

pub use probe::{locate, probe_host};
pub use types::{HostReport, HostRequirements, PreflightError, PythonVersion};

use tracing::info;

use crate::config::Toolchain;

/// Validate a probed host against the requirements.
///
/// Pure: reads only the report, so a failing check leaves no trace on disk.
pub fn validate(report: &HostReport, requirements: &HostRequirements) -> Result<(), PreflightError> {
  if report.pointer_width <= 32 {
    return Err(PreflightError::PointerWidth(report.pointer_width));
  }
  if report.python_version < requirements.min_python {
    return Err(PreflightError::PythonTooOld {
      required: requirements.min_python,
      found: report.python_version,
    });
  }
  if !report.has_deploy_library {
    return Err(PreflightError::MissingDeployLibrary);
  }
  if report.qmake.is_none() {
    return Err(PreflightError::MissingQmake);
  }
  match &report.qmake_version {
    Some(version) if version.contains(&requirements.qt_marker) => {}
    other => {
      return Err(PreflightError::WrongQtVersion {
        found: other.clone().unwrap_or_default(),
      });
    }
  }
  if report.make.is_none() {
    return Err(PreflightError::MissingMake(requirements.make_name.clone()));
  }
  Ok(())
}

/// Probe the host and validate it in one step.
pub async fn check(toolchain: &Toolchain, requirements: &HostRequirements) -> Result<HostReport, PreflightError> {
  let report = probe_host(toolchain).await?;
  validate(&report, requirements)?;
  info!(python = %report.python_version, "preflight checks passed");
  Ok(report)
}
