use anyhow::{Context, Result};

use trubuild_lib::config::BuildConfig;

use crate::output::{print_info, print_success, symbols};

/// Remove `root/`, `modules/`, `dist/` and the bundle.
pub fn cmd_clean(config: &BuildConfig) -> Result<()> {
  let removed = config
    .layout()
    .remove_artifacts()
    .context("Failed to remove build artifacts")?;

  if removed.is_empty() {
    print_info("Nothing to clean");
    return Ok(());
  }
  for path in &removed {
    println!("  {} {}", symbols::REMOVE, path.display());
  }
  print_success(&format!("Removed {} item(s)", removed.len()));
  Ok(())
}
