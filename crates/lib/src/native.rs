//! Native build of the frozen project.
//!
//! `qmake` and the native build tool both run with `dist/` as their working
//! directory. The orchestrator never changes its own working directory, so
//! nothing needs restoring when either step fails.

use std::path::Path;

use tracing::info;

use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::ToolCommand;

pub async fn native_build(qmake: &Path, make: &Path, layout: &Layout) -> Result<(), BuildError> {
  let dist = layout.dist();
  if !dist.is_dir() {
    return Err(BuildError::MissingDist(dist));
  }

  info!("running qmake");
  ToolCommand::new(qmake).current_dir(&dist).run().await?;

  info!(tool = %make.display(), "running native build");
  ToolCommand::new(make).current_dir(&dist).run().await?;
  Ok(())
}
