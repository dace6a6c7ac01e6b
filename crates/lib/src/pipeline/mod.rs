//! The build orchestrator.
//!
//! Stages run strictly in order. The first error aborts the remaining stages
//! and whatever earlier stages left on disk stays there; rerunning with the
//! stage-skip flags off resumes from existing output.

mod types;

pub use types::{BuildReport, Stage, StageOutcome, StageRecord};

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::preflight::{self, HostRequirements};
use crate::{deploy, fetch, modules, native, package, sysroot};

/// Run every stage for `config`.
pub async fn run(config: &BuildConfig) -> Result<BuildReport> {
  let started = Instant::now();
  let layout = config.layout();
  let os = config.platform.os;
  let tools = &config.toolchain;
  let mut report = BuildReport::default();

  info!(project = %layout.project_dir().display(), platform = %config.platform, "starting build");

  stage(&mut report, Stage::Preflight, async {
    preflight::check(tools, &HostRequirements::new(os, tools)).await?;
    Ok::<_, BuildError>(StageOutcome::Ran)
  })
  .await?;

  stage(&mut report, Stage::FetchSources, async {
    Ok::<_, BuildError>(fetch::fetch_sources(&config.options, &layout, &config.packages).await?)
  })
  .await?;

  stage(
    &mut report,
    Stage::BuildSysroot,
    sysroot::build_sysroot(config.options.rebuild_sysroot, &tools.python, &layout, os),
  )
  .await?;

  let target_python = layout.target_python();
  stage(
    &mut report,
    Stage::InstallModules,
    modules::install_modules(config.options.reinstall_modules, &target_python, &layout),
  )
  .await?;

  stage(&mut report, Stage::Deploy, async {
    deploy::run_deploy(&tools.deploy, &layout).await?;
    Ok::<_, BuildError>(StageOutcome::Ran)
  })
  .await?;

  stage(&mut report, Stage::NativeBuild, async {
    native::native_build(&tools.qmake, &tools.make, &layout).await?;
    Ok::<_, BuildError>(StageOutcome::Ran)
  })
  .await?;

  let mut archive = None;
  stage(&mut report, Stage::Package, async {
    let (outcome, written) = package::package(os, &layout)?;
    archive = written;
    Ok::<_, BuildError>(outcome)
  })
  .await?;

  report.archive = archive;
  report.elapsed = started.elapsed();
  info!(elapsed = ?report.elapsed, "build finished");
  Ok(report)
}

async fn stage<F>(report: &mut BuildReport, stage: Stage, work: F) -> Result<()>
where
  F: Future<Output = Result<StageOutcome>>,
{
  let started = Instant::now();
  let outcome = work.instrument(info_span!("stage", name = stage.as_str())).await?;
  report.stages.push(StageRecord {
    stage,
    outcome,
    elapsed: started.elapsed(),
  });
  Ok(())
}
