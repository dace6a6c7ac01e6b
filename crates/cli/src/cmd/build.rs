//! Implementation of the `trubuild build` command.
//!
//! Runs the whole pipeline: preflight, fetch, sysroot, modules, deploy,
//! native build and packaging. Each `--no-*` flag bypasses one stage so that
//! a failed run can be resumed from the output already on disk.

use anyhow::{Context, Result};
use clap::Args;

use trubuild_lib::config::BuildConfig;
use trubuild_lib::pipeline::{self, StageOutcome};

use crate::output::{OutputFormat, format_duration, print_json, print_skipped, print_stat, print_success};

#[derive(Debug, Default, Args)]
pub struct BuildArgs {
  /// Keep root/ and the downloaded archives instead of fetching them again
  #[arg(long)]
  pub no_refresh_sources: bool,

  /// Reuse the existing sysroot instead of rebuilding it
  #[arg(long)]
  pub no_rebuild_sysroot: bool,

  /// Keep the installed modules/ directory
  #[arg(long)]
  pub no_reinstall_modules: bool,

  /// Output format for the build summary
  #[arg(short, long, value_enum, default_value_t)]
  pub output: OutputFormat,
}

impl BuildArgs {
  /// Command-line flags only ever turn stages off.
  pub fn apply(&self, config: &mut BuildConfig) {
    if self.no_refresh_sources {
      config.options.refresh_sources = false;
    }
    if self.no_rebuild_sysroot {
      config.options.rebuild_sysroot = false;
    }
    if self.no_reinstall_modules {
      config.options.reinstall_modules = false;
    }
  }
}

pub fn cmd_build(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let report = super::block_on(pipeline::run(&config))?.context("Build failed")?;

  if output.is_json() {
    return print_json(&report);
  }

  for record in &report.stages {
    match record.outcome {
      StageOutcome::Ran => print_success(&format!("{} ({})", record.stage, format_duration(record.elapsed))),
      StageOutcome::Skipped => print_skipped(&format!("{} skipped", record.stage)),
    }
  }
  println!();
  if let Some(archive) = &report.archive {
    print_stat("Archive", &archive.display().to_string());
  }
  print_stat("Binary", &config.layout().binary().display().to_string());
  print_stat("Elapsed", &format_duration(report.elapsed));

  Ok(())
}
