//! Sysroot construction.
//!
//! Runs the project's `build-sysroot.py` with the host interpreter to compile
//! Python, PyQt5 and sip from `root/src/` into `root/`.

use std::ffi::OsString;
use std::path::Path;

use tracing::info;

use crate::consts::{SYSROOT_DIR, SYSROOT_SCRIPT, WINDOWS_SYSTEM_PYTHON};
use crate::error::BuildError;
use crate::layout::Layout;
use crate::pipeline::StageOutcome;
use crate::platform::Os;
use crate::process::ToolCommand;

/// Components the sysroot script is asked to build.
const COMPONENTS: &[&str] = &["python", "pyqt5", "sip"];

/// Arguments passed to the host interpreter, script name first.
pub fn sysroot_args(os: Os) -> Vec<OsString> {
  let mut args: Vec<OsString> = vec![SYSROOT_SCRIPT.into(), "--build".into()];
  args.extend(COMPONENTS.iter().map(OsString::from));
  if os.is_windows() {
    args.push(format!("--sysroot={}", SYSROOT_DIR).into());
    args.push(format!("--use-system-python={}", WINDOWS_SYSTEM_PYTHON).into());
  } else {
    args.push("--enable-dynamic-loading".into());
    args.push(format!("--sysroot={}", SYSROOT_DIR).into());
  }
  args
}

pub fn sysroot_command(python: &Path, layout: &Layout, os: Os) -> ToolCommand {
  ToolCommand::new(python)
    .args(sysroot_args(os))
    .current_dir(layout.project_dir())
}

/// Build the sysroot unless `rebuild` is off, then require its interpreter.
pub async fn build_sysroot(
  rebuild: bool,
  python: &Path,
  layout: &Layout,
  os: Os,
) -> Result<StageOutcome, BuildError> {
  let outcome = if rebuild {
    info!("building sysroot, this takes a while");
    sysroot_command(python, layout, os).run().await?;
    StageOutcome::Ran
  } else {
    info!("keeping existing sysroot");
    StageOutcome::Skipped
  };

  let target = layout.target_python();
  if !target.exists() {
    return Err(BuildError::MissingTargetPython(target));
  }
  Ok(outcome)
}
