//! Pure-Python dependency installation.
//!
//! Dependencies are installed with the sysroot's own interpreter so that any
//! compiled parts match the frozen runtime.

use std::path::Path;

use tracing::{debug, info};

use crate::consts::MODULES_DIR;
use crate::error::BuildError;
use crate::layout::Layout;
use crate::manifest::{Requirement, load_requirements};
use crate::pipeline::StageOutcome;
use crate::process::ToolCommand;

/// The requirements pip is asked for, in manifest order, toolkit excluded.
pub fn installable(requirements: &[Requirement]) -> impl Iterator<Item = &Requirement> {
  requirements.iter().filter(|req| {
    if req.is_toolkit() {
      debug!(name = %req.name, "toolkit comes from the sysroot, skipping");
      false
    } else {
      true
    }
  })
}

pub fn pip_install_command(target_python: &Path, layout: &Layout, requirement: &Requirement) -> ToolCommand {
  ToolCommand::new(target_python)
    .args(["-m", "pip", "install", "--target", MODULES_DIR])
    .arg(&requirement.specifier)
    .current_dir(layout.project_dir())
}

/// Recreate `modules/` and install every manifest entry into it.
pub async fn install_modules(reinstall: bool, target_python: &Path, layout: &Layout) -> Result<StageOutcome, BuildError> {
  if !reinstall {
    info!("keeping existing modules");
    return Ok(StageOutcome::Skipped);
  }

  // Read the manifest first so a missing file leaves the old modules in place.
  let requirements = load_requirements(&layout.requirements())?;

  let modules = layout.modules();
  if tokio::fs::try_exists(&modules).await? {
    info!(path = %modules.display(), "deleting modules directory");
    tokio::fs::remove_dir_all(&modules).await?;
  }
  info!(path = %modules.display(), "creating modules directory");
  tokio::fs::create_dir(&modules).await?;

  ToolCommand::new(target_python)
    .args(["-m", "ensurepip"])
    .current_dir(layout.project_dir())
    .run()
    .await?;

  for requirement in installable(&requirements) {
    info!(requirement = %requirement.specifier, "installing module");
    pip_install_command(target_python, layout, requirement).run().await?;
  }
  Ok(StageOutcome::Ran)
}
