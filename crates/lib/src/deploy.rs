//! Freezing the application with `pyqtdeploycli`.

use std::path::Path;

use tracing::info;

use crate::consts::{DIST_DIR, PROJECT_FILE, SYSROOT_ENV};
use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::ToolCommand;

/// `pyqtdeploycli` invocation with `SYSROOT` set for the child only.
pub fn deploy_command(deploy: &Path, layout: &Layout, sysroot: &Path) -> ToolCommand {
  ToolCommand::new(deploy)
    .args(["--verbose", "--output", DIST_DIR, "--project", PROJECT_FILE, "build"])
    .env(SYSROOT_ENV, sysroot)
    .current_dir(layout.project_dir())
}

pub async fn run_deploy(deploy: &Path, layout: &Layout) -> Result<(), BuildError> {
  let sysroot = dunce::canonicalize(layout.sysroot())?;
  info!(sysroot = %sysroot.display(), "running pyqtdeploy");
  deploy_command(deploy, layout, &sysroot).run().await?;
  Ok(())
}
