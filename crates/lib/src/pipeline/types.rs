//! Types describing a pipeline run.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Preflight,
  FetchSources,
  BuildSysroot,
  InstallModules,
  Deploy,
  NativeBuild,
  Package,
}

impl Stage {
  pub const ALL: [Stage; 7] = [
    Stage::Preflight,
    Stage::FetchSources,
    Stage::BuildSysroot,
    Stage::InstallModules,
    Stage::Deploy,
    Stage::NativeBuild,
    Stage::Package,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::Preflight => "preflight",
      Stage::FetchSources => "fetch sources",
      Stage::BuildSysroot => "build sysroot",
      Stage::InstallModules => "install modules",
      Stage::Deploy => "deploy",
      Stage::NativeBuild => "native build",
      Stage::Package => "package",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Whether a stage did its work or was bypassed by a stage-skip flag or platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
  Ran,
  Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
  pub stage: Stage,
  pub outcome: StageOutcome,
  pub elapsed: Duration,
}

/// Summary of a completed build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
  pub stages: Vec<StageRecord>,
  /// Bundle written by the package stage, if any.
  pub archive: Option<PathBuf>,
  pub elapsed: Duration,
}

impl BuildReport {
  pub fn outcome(&self, stage: Stage) -> Option<StageOutcome> {
    self.stages.iter().find(|r| r.stage == stage).map(|r| r.outcome)
  }

  pub fn ran(&self) -> impl Iterator<Item = Stage> + '_ {
    self
      .stages
      .iter()
      .filter(|r| r.outcome == StageOutcome::Ran)
      .map(|r| r.stage)
  }
}
