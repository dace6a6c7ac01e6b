use anyhow::{Context, Result};

use trubuild_lib::config::BuildConfig;
use trubuild_lib::preflight::{self, HostRequirements};

use crate::output::{print_stat, print_success};

/// Run only the host validation stage.
pub fn cmd_check(config: &BuildConfig) -> Result<()> {
  let requirements = HostRequirements::new(config.platform.os, &config.toolchain);
  let report = super::block_on(preflight::check(&config.toolchain, &requirements))?
    .context("Preflight checks failed")?;

  print_success("Host is ready to build TruFont");
  print_stat("Python", &format!("{} ({}-bit)", report.python_version, report.pointer_width));
  if let Some(qmake) = &report.qmake {
    print_stat("qmake", &qmake.display().to_string());
  }
  if let Some(make) = &report.make {
    print_stat(&requirements.make_name, &make.display().to_string());
  }
  Ok(())
}
